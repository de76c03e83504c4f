use super::operation::CollectionOperations;
use super::Document;
use crate::common::Value;
use crate::errors::HaliteResult;

/// A named handle onto one collection of a Halite store.
///
/// A collection is a directory under the store root holding one JSON file
/// per document. The handle is a convenience over the store-level
/// operations: it carries the collection name so callers do not repeat it on
/// every call. Handles are cheap to clone and do not pin any on-disk state;
/// the directory itself is only created by the first insert, and read
/// operations treat a missing directory as an empty collection.
///
/// # Examples
///
/// ```rust,ignore
/// use halite::{doc, Halite};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let db = Halite::connect("/var/lib/myapp/data")?;
/// let workers = db.collection("workers")?;
///
/// let id = workers.insert(doc!{ name: "matilda" })?;
/// let found = workers.get(&id)?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HaliteCollection {
    name: String,
    operations: CollectionOperations,
}

impl std::fmt::Debug for HaliteCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HaliteCollection")
            .field("name", &self.name)
            .finish()
    }
}

impl HaliteCollection {
    pub(crate) fn new(name: &str, operations: CollectionOperations) -> Self {
        HaliteCollection {
            name: name.to_string(),
            operations,
        }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a record into this collection and returns the identifier
    /// used, generating one when the record has no `_id` field.
    pub fn insert(&self, record: impl Into<Value>) -> HaliteResult<String> {
        self.operations.insert(&self.name, record.into())
    }

    /// Looks up a document by identifier. `None` when absent.
    pub fn get(&self, id: &str) -> HaliteResult<Option<Document>> {
        self.operations.get(&self.name, id)
    }

    /// Deletes a document by identifier. Deleting an absent document
    /// succeeds.
    pub fn delete(&self, id: &str) -> HaliteResult<()> {
        self.operations.remove(&self.name, id)
    }

    /// Returns every document the predicate affirms.
    pub fn find<F>(&self, query: F) -> HaliteResult<Vec<Document>>
    where
        F: Fn(&Document) -> bool,
    {
        self.operations.find(&self.name, query)
    }
}
