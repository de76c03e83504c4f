use crate::collection::{Document, IdGenerator};
use crate::common::{validate_collection_name, validate_document_id, Value};
use crate::errors::HaliteResult;
use crate::store::{Store, WriteOutcome};
use crate::ID_GENERATOR;

/// Write pipeline: insert (with either caller-supplied or generated
/// identifiers) and delete.
#[derive(Clone)]
pub(crate) struct WriteOperations {
    store: Store,
}

impl WriteOperations {
    pub fn new(store: Store) -> Self {
        WriteOperations { store }
    }

    /// Inserts a record into a collection and returns the identifier used.
    ///
    /// Validation runs before any disk access: the collection name first,
    /// then the record shape, then the `_id` field type. The collection
    /// directory is created lazily. A record with a string `_id` is an
    /// upsert (truncating write); a record without one goes through the
    /// allocator loop.
    pub fn insert(&self, collection: &str, record: Value) -> HaliteResult<String> {
        validate_collection_name(collection)?;
        let document = Document::try_from(record)?;
        let id = document.validated_id()?.map(str::to_string);

        self.store.ensure_collection(collection)?;

        match id {
            Some(id) => {
                let payload = document.to_json()?;
                self.store.write_document(collection, &id, &payload)?;
                log::debug!("Inserted document {} into collection {}", id, collection);
                Ok(id)
            }
            None => insert_with_generated_id(&self.store, &ID_GENERATOR, collection, document),
        }
    }

    /// Deletes a document by identifier. Deleting an absent document or an
    /// absent collection succeeds.
    pub fn remove(&self, collection: &str, id: &str) -> HaliteResult<()> {
        validate_collection_name(collection)?;
        validate_document_id(id)?;
        self.store.remove_document(collection, id)?;
        log::debug!("Removed document {} from collection {}", id, collection);
        Ok(())
    }
}

/// The identifier allocation loop.
///
/// Generates a candidate identifier, stamps it into the document, and
/// attempts an exclusive create. A taken identifier discards the candidate
/// and retries with a fresh one, unboundedly; the caller supplied no
/// identifier and expects eventual success. Any non-collision failure aborts
/// the loop and surfaces.
///
/// A pure function of its inputs so tests can drive it with a fake store
/// that reports collisions for the first K candidates.
pub(crate) fn insert_with_generated_id(
    store: &Store,
    generator: &IdGenerator,
    collection: &str,
    mut document: Document,
) -> HaliteResult<String> {
    loop {
        let candidate = generator.next_id();
        document.set_id(&candidate);
        let payload = document.to_json()?;

        match store.write_document_exclusive(collection, &candidate, &payload)? {
            WriteOutcome::Written => {
                log::debug!(
                    "Inserted document {} into collection {}",
                    candidate,
                    collection
                );
                return Ok(candidate);
            }
            WriteOutcome::IdExists => {
                log::warn!(
                    "Generated id {} already in use in collection {}, retrying",
                    candidate,
                    collection
                );
            }
        }
    }
}
