mod fs_store;

pub use fs_store::FsStore;

use crate::errors::HaliteResult;
use std::ops::Deref;
use std::sync::Arc;

/// Outcome of an exclusive document write.
///
/// Exclusive creation is the atomic primitive the identifier allocator relies
/// on: it either creates the backing file or reports that the identifier is
/// already taken, never overwriting an existing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The document file was created and written.
    Written,
    /// A document with this identifier already exists; nothing was written.
    IdExists,
}

/// Low-level interface for the persistence layer of a Halite store.
///
/// # Purpose
/// Defines the contract the engine operates against: lazily created
/// collection directories holding one serialized document per file. The
/// filesystem implementation is [FsStore]; tests inject fakes to exercise
/// paths that are hard to reach through a real disk (for example an
/// identifier collision streak).
///
/// # Absence policy
/// Read-side methods model absence as a normal outcome, not an error: a
/// missing document reads as `None` and a missing collection scans as an
/// empty list. Only a collection path that resolves to a non-directory entry
/// is an error.
///
/// # Thread Safety
/// Implementers must be `Send + Sync` for safe use in concurrent contexts.
pub trait StoreProvider: Send + Sync {
    /// Creates the collection directory if it does not exist.
    ///
    /// "Already exists" counts as success; any other creation failure is
    /// surfaced.
    fn ensure_collection(&self, collection: &str) -> HaliteResult<()>;

    /// Writes a document payload, truncating any existing file at the
    /// identifier's path. This is the upsert path for caller-supplied
    /// identifiers.
    fn write_document(&self, collection: &str, id: &str, payload: &str) -> HaliteResult<()>;

    /// Writes a document payload in exclusive mode.
    ///
    /// Fails over to [WriteOutcome::IdExists] when the identifier's file
    /// already exists instead of overwriting it.
    fn write_document_exclusive(
        &self,
        collection: &str,
        id: &str,
        payload: &str,
    ) -> HaliteResult<WriteOutcome>;

    /// Reads a document payload. `None` when the document (or its whole
    /// collection) does not exist.
    fn read_document(&self, collection: &str, id: &str) -> HaliteResult<Option<String>>;

    /// Removes a document. Removing an absent document (or from an absent
    /// collection) is a success.
    fn remove_document(&self, collection: &str, id: &str) -> HaliteResult<()>;

    /// Returns the payloads of every readable entry in the collection, in
    /// directory-enumeration order. Entries that cannot be read are skipped;
    /// an absent collection yields an empty list.
    fn scan_documents(&self, collection: &str) -> HaliteResult<Vec<String>>;
}

/// A persistence backend for a Halite store.
///
/// `Store` wraps a [StoreProvider] implementation behind a cheaply cloneable
/// handle.
#[derive(Clone)]
pub struct Store {
    inner: Arc<dyn StoreProvider>,
}

impl Store {
    /// Creates a new `Store` from a provider implementation.
    pub fn new<T: StoreProvider + 'static>(inner: T) -> Self {
        Store {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for Store {
    type Target = Arc<dyn StoreProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
