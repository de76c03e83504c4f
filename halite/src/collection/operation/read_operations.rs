use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::collection::Document;
use crate::common::{validate_collection_name, validate_document_id};
use crate::errors::HaliteResult;
use crate::store::Store;

/// Read pipeline: point lookups and predicate scans.
#[derive(Clone)]
pub(crate) struct ReadOperations {
    store: Store,
}

impl ReadOperations {
    pub fn new(store: Store) -> Self {
        ReadOperations { store }
    }

    /// Looks up a document by identifier.
    ///
    /// An absent document (or collection) is `Ok(None)`, not an error. A
    /// present document that does not parse is a hard
    /// `document is not parsable` error, unlike find's tolerant skip.
    pub fn get(&self, collection: &str, id: &str) -> HaliteResult<Option<Document>> {
        validate_collection_name(collection)?;
        validate_document_id(id)?;

        match self.store.read_document(collection, id)? {
            None => Ok(None),
            Some(payload) => Document::from_json(&payload).map(Some),
        }
    }

    /// Scans a collection and returns every document the predicate affirms,
    /// in directory-enumeration order.
    ///
    /// The scan never aborts because one entry misbehaves: unreadable or
    /// unparsable entries are skipped, and a predicate that panics counts as
    /// "does not match" for that entry only. An absent collection yields an
    /// empty result.
    pub fn find<F>(&self, collection: &str, query: F) -> HaliteResult<Vec<Document>>
    where
        F: Fn(&Document) -> bool,
    {
        validate_collection_name(collection)?;

        let payloads = self.store.scan_documents(collection)?;
        let mut matches = Vec::new();
        for payload in payloads {
            let document = match Document::from_json(&payload) {
                Ok(document) => document,
                Err(_) => {
                    log::debug!("Skipping unparsable document in collection {}", collection);
                    continue;
                }
            };
            if evaluate(&query, &document) {
                matches.push(document);
            }
        }

        log::debug!(
            "Found {} matching documents in collection {}",
            matches.len(),
            collection
        );
        Ok(matches)
    }
}

/// Invokes the predicate through a call wrapper that coerces any panic to
/// "no match", so one failing evaluation cannot abort the whole scan.
fn evaluate<F>(query: &F, document: &Document) -> bool
where
    F: Fn(&Document) -> bool,
{
    catch_unwind(AssertUnwindSafe(|| query(document))).unwrap_or(false)
}
