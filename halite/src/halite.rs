use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::collection::operation::CollectionOperations;
use crate::collection::{Document, HaliteCollection};
use crate::common::{validate_collection_name, Value};
use crate::errors::{ErrorKind, HaliteError, HaliteResult};
use crate::store::{FsStore, Store};

/// A Halite document store.
///
/// `Halite` is a handle onto a root directory whose subdirectories are
/// collections and whose files are documents. The handle is created with
/// [Halite::connect], which verifies the root exists and is a directory; the
/// root is fixed for the lifetime of the handle and never mutated.
///
/// All clones share the same underlying state through `Arc`, so a `Halite`
/// can be passed freely between threads.
///
/// # Examples
///
/// ```rust,ignore
/// use halite::{doc, Halite};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let db = Halite::connect("/var/lib/myapp/data")?;
///
/// // Insert a document; the store allocates an identifier
/// let id = db.insert("workers", doc!{ name: "matilda", age: 30 })?;
///
/// // Read it back
/// let worker = db.get("workers", &id)?;
/// assert!(worker.is_some());
///
/// // Scan with a predicate
/// let adults = db.find("workers", |doc| {
///     doc.get("age").and_then(|v| v.as_i64()).unwrap_or(0) >= 18
/// })?;
///
/// // Remove it
/// db.delete("workers", &id)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Halite {
    inner: Arc<HaliteInner>,
}

impl std::fmt::Debug for Halite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Halite")
            .field("root", &self.inner.root)
            .finish()
    }
}

struct HaliteInner {
    root: PathBuf,
    operations: CollectionOperations,
}

impl Halite {
    /// Connects to the document store rooted at `path`.
    ///
    /// The root must already exist and be a directory; Halite never creates
    /// it. Failures:
    ///
    /// * empty path → `root path is missing`
    /// * path cannot be inspected → the underlying io error, unmodified
    /// * path is not a directory → `root path is not a directory`
    pub fn connect(path: impl AsRef<Path>) -> HaliteResult<Halite> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            log::error!("root path is missing");
            return Err(HaliteError::new(
                "root path is missing",
                ErrorKind::ValidationError,
            ));
        }

        let metadata = fs::metadata(path)?;
        if !metadata.is_dir() {
            log::error!("root path is not a directory: {:?}", path);
            return Err(HaliteError::new(
                "root path is not a directory",
                ErrorKind::NotADirectory,
            ));
        }

        log::info!("Connected to document store at {:?}", path);
        let store = Store::new(FsStore::new(path));
        Ok(Halite {
            inner: Arc::new(HaliteInner {
                root: path.to_path_buf(),
                operations: CollectionOperations::new(store),
            }),
        })
    }

    /// Returns the root directory of this store.
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Returns a handle onto the named collection.
    ///
    /// The name is validated eagerly; the collection directory itself is
    /// only created by the first insert.
    pub fn collection(&self, name: &str) -> HaliteResult<HaliteCollection> {
        validate_collection_name(name)?;
        Ok(HaliteCollection::new(name, self.inner.operations.clone()))
    }

    /// Inserts a record into a collection, creating the collection directory
    /// if needed, and returns the identifier used.
    ///
    /// A record with a string `_id` field is an upsert: it overwrites any
    /// existing document with that identifier. A record without one gets a
    /// generated identifier, allocated with an exclusive create so no
    /// existing document is ever silently overwritten.
    pub fn insert(&self, collection: &str, record: impl Into<Value>) -> HaliteResult<String> {
        self.inner.operations.insert(collection, record.into())
    }

    /// Looks up a document by identifier.
    ///
    /// Returns `Ok(None)` when the document (or the whole collection) does
    /// not exist. A document that exists but does not parse is a
    /// `document is not parsable` error.
    pub fn get(&self, collection: &str, id: &str) -> HaliteResult<Option<Document>> {
        self.inner.operations.get(collection, id)
    }

    /// Deletes a document by identifier.
    ///
    /// Idempotent: deleting an absent document, or from an absent
    /// collection, succeeds.
    pub fn delete(&self, collection: &str, id: &str) -> HaliteResult<()> {
        self.inner.operations.remove(collection, id)
    }

    /// Scans a collection and returns every document the predicate affirms.
    ///
    /// An absent collection yields an empty result. Unparsable documents are
    /// skipped, and a predicate that panics counts as "no match" for that
    /// document only.
    pub fn find<F>(&self, collection: &str, query: F) -> HaliteResult<Vec<Document>>
    where
        F: Fn(&Document) -> bool,
    {
        self.inner.operations.find(collection, query)
    }
}
