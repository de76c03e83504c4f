// Based on the insert scenarios of the original store test suite
use halite::doc;
use halite::errors::ErrorKind;
use halite_int_test::test_util::{cleanup, create_test_context, run_test};
use serde_json::json;
use std::fs;
use std::path::Path;

#[test]
fn test_insert_with_id_returns_the_id() {
    run_test(
        create_test_context,
        |ctx| {
            let id = ctx
                .db()
                .insert("workers", doc! { "_id": "mark", name: "mark" })?;
            assert_eq!(id, "mark");

            // one file per document, named by the identifier
            let file = Path::new(ctx.path()).join("workers").join("mark.json");
            assert!(file.is_file());

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_then_get_round_trip() {
    run_test(
        create_test_context,
        |ctx| {
            let inserted = doc! { "_id": "matilda", name: "matilda", age: 31 };
            ctx.db().insert("workers", inserted.clone())?;

            let found = ctx.db().get("workers", "matilda")?;
            assert_eq!(found, Some(inserted));

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_without_id_generates_one() {
    run_test(
        create_test_context,
        |ctx| {
            let id = ctx.db().insert("workers", doc! { name: "mark" })?;
            assert!(!id.is_empty());

            // the stored document carries the generated identifier as a field
            let found = ctx.db().get("workers", &id)?.expect("document exists");
            assert_eq!(found.id(), Some(id.as_str()));
            assert_eq!(found.get("name"), Some(&json!("mark")));

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_generated_ids_are_distinct() {
    run_test(
        create_test_context,
        |ctx| {
            let mut ids = Vec::new();
            for i in 0..25 {
                ids.push(ctx.db().insert("workers", doc! { seq: i })?);
            }

            let mut unique_ids = ids.clone();
            unique_ids.sort();
            unique_ids.dedup();
            assert_eq!(unique_ids.len(), ids.len());

            let all = ctx.db().find("workers", |_| true)?;
            assert_eq!(all.len(), 25);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_with_existing_id_overwrites() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.db()
                .insert("workers", doc! { "_id": "mark", version: 1 })?;
            ctx.db()
                .insert("workers", doc! { "_id": "mark", version: 2 })?;

            let found = ctx.db().get("workers", "mark")?.expect("document exists");
            assert_eq!(found.get("version"), Some(&json!(2)));

            // still exactly one document
            let all = ctx.db().find("workers", |_| true)?;
            assert_eq!(all.len(), 1);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_empty_document() {
    run_test(
        create_test_context,
        |ctx| {
            let id = ctx.db().insert("workers", doc! {})?;
            let found = ctx.db().get("workers", &id)?.expect("document exists");
            // the only field is the generated identifier
            assert_eq!(found.size(), 1);
            assert_eq!(found.id(), Some(id.as_str()));

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_creates_the_collection_lazily() {
    run_test(
        create_test_context,
        |ctx| {
            let collection_dir = Path::new(ctx.path()).join("workers");
            assert!(!collection_dir.exists());

            ctx.db().insert("workers", doc! { name: "mark" })?;
            assert!(collection_dir.is_dir());

            // a second insert reuses the directory
            ctx.db().insert("workers", doc! { name: "matilda" })?;
            assert_eq!(ctx.db().find("workers", |_| true)?.len(), 2);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_into_file_collection_fails() {
    run_test(
        create_test_context,
        |ctx| {
            fs::write(Path::new(ctx.path()).join("someFile"), "")?;

            // with a caller-supplied id
            let with_id = ctx.db().insert("someFile", doc! { "_id": "mark" });
            assert!(with_id.is_err());
            assert_eq!(
                with_id.unwrap_err().message(),
                "collection is not a directory"
            );

            // and with a generated one
            let without_id = ctx.db().insert("someFile", doc! { name: "mark" });
            assert!(without_id.is_err());
            assert_eq!(
                without_id.unwrap_err().kind(),
                &ErrorKind::NotADirectory
            );

            Ok(())
        },
        cleanup,
    )
}
