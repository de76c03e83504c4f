mod read_operations;
mod write_operations;

pub(crate) use read_operations::ReadOperations;
pub(crate) use write_operations::WriteOperations;

use crate::collection::Document;
use crate::common::Value;
use crate::errors::HaliteResult;
use crate::store::Store;

/// Facade over the write and read pipelines of the four public operations.
///
/// Each operation validates its own arguments first, resolves the collection
/// against the store, and performs its disk action; the facade only does the
/// wiring.
#[derive(Clone)]
pub(crate) struct CollectionOperations {
    write_operations: WriteOperations,
    read_operations: ReadOperations,
}

impl CollectionOperations {
    pub fn new(store: Store) -> Self {
        CollectionOperations {
            write_operations: WriteOperations::new(store.clone()),
            read_operations: ReadOperations::new(store),
        }
    }

    pub fn insert(&self, collection: &str, record: Value) -> HaliteResult<String> {
        self.write_operations.insert(collection, record)
    }

    pub fn get(&self, collection: &str, id: &str) -> HaliteResult<Option<Document>> {
        self.read_operations.get(collection, id)
    }

    pub fn remove(&self, collection: &str, id: &str) -> HaliteResult<()> {
        self.write_operations.remove(collection, id)
    }

    pub fn find<F>(&self, collection: &str, query: F) -> HaliteResult<Vec<Document>>
    where
        F: Fn(&Document) -> bool,
    {
        self.read_operations.find(collection, query)
    }
}
