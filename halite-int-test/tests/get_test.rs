// Based on the get scenarios of the original store test suite
use halite::doc;
use halite::errors::ErrorKind;
use halite_int_test::test_util::{cleanup, create_test_context, run_test};
use serde_json::json;
use std::fs;
use std::path::Path;

#[test]
fn test_get_from_absent_collection_is_none() {
    run_test(
        create_test_context,
        |ctx| {
            let found = ctx.db().get("nobody", "mark")?;
            assert!(found.is_none());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_absent_id_is_none() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.db().insert("workers", doc! { "_id": "mark" })?;
            let found = ctx.db().get("workers", "matilda")?;
            assert!(found.is_none());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_returns_the_document_as_stored() {
    run_test(
        create_test_context,
        |ctx| {
            let inserted = doc! {
                "_id": "matilda",
                name: "matilda",
                skills: ["typing", "filing"],
                address: { city: "New York", zip: 10001 }
            };
            ctx.db().insert("workers", inserted.clone())?;

            let found = ctx.db().get("workers", "matilda")?.expect("document exists");
            assert_eq!(found, inserted);
            assert_eq!(found.get("skills"), Some(&json!(["typing", "filing"])));

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_unparsable_document_is_an_error() {
    run_test(
        create_test_context,
        |ctx| {
            let collection_dir = Path::new(ctx.path()).join("workers");
            fs::create_dir(&collection_dir)?;
            fs::write(collection_dir.join("matilda.json"), "matilda")?;

            let result = ctx.db().get("workers", "matilda");
            assert!(result.is_err());
            let err = result.unwrap_err();
            assert_eq!(err.message(), "document is not parsable");
            assert_eq!(err.kind(), &ErrorKind::DocumentCorrupted);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_through_file_collection_is_an_error() {
    run_test(
        create_test_context,
        |ctx| {
            fs::write(Path::new(ctx.path()).join("someFile"), "")?;

            let result = ctx.db().get("someFile", "mark");
            assert!(result.is_err());
            assert_eq!(
                result.unwrap_err().message(),
                "collection is not a directory"
            );

            Ok(())
        },
        cleanup,
    )
}
