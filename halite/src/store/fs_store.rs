use once_cell::sync::Lazy;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{StoreProvider, WriteOutcome};
use crate::common::DOC_FILE_EXT;
use crate::errors::{ErrorKind, HaliteError, HaliteResult};

static COLLECTION_NOT_A_DIRECTORY_ERROR: Lazy<HaliteError> =
    Lazy::new(|| HaliteError::new("collection is not a directory", ErrorKind::NotADirectory));

/// Filesystem-backed store.
///
/// Collections are directories directly under the store root; documents are
/// `<id>.json` files inside them. The directory listing of a collection is
/// its only index. All consistency guarantees are the filesystem's own: the
/// exclusive create used for generated identifiers is atomic, plain writes
/// are last-writer-wins.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Creates a store over an existing root directory.
    ///
    /// The root is validated by [crate::Halite::connect]; `FsStore` itself
    /// never creates or checks it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }

    fn document_path(&self, collection: &str, id: &str) -> PathBuf {
        self.collection_path(collection)
            .join(format!("{}.{}", id, DOC_FILE_EXT))
    }
}

/// Maps an io error to the store error taxonomy. A path component that turns
/// out not to be a directory means the collection name resolves to a plain
/// file; everything else keeps its io classification.
fn classify(err: io::Error) -> HaliteError {
    if err.kind() == io::ErrorKind::NotADirectory {
        log::error!("collection is not a directory");
        return COLLECTION_NOT_A_DIRECTORY_ERROR.clone();
    }
    err.into()
}

impl StoreProvider for FsStore {
    fn ensure_collection(&self, collection: &str) -> HaliteResult<()> {
        let path = self.collection_path(collection);
        match fs::create_dir(&path) {
            Ok(()) => {
                log::debug!("Created collection directory {:?}", path);
                Ok(())
            }
            // a pre-existing entry is fine here; a file squatting on the name
            // surfaces as NotADirectory on the subsequent write
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(err) => {
                log::error!("Failed to create collection directory {:?}: {}", path, err);
                Err(classify(err))
            }
        }
    }

    fn write_document(&self, collection: &str, id: &str, payload: &str) -> HaliteResult<()> {
        let path = self.document_path(collection, id);
        fs::write(&path, payload).map_err(|err| {
            log::error!("Failed to write document {:?}: {}", path, err);
            classify(err)
        })
    }

    fn write_document_exclusive(
        &self,
        collection: &str,
        id: &str,
        payload: &str,
    ) -> HaliteResult<WriteOutcome> {
        let path = self.document_path(collection, id);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(payload.as_bytes()).map_err(|err| {
                    log::error!("Failed to write document {:?}: {}", path, err);
                    classify(err)
                })?;
                Ok(WriteOutcome::Written)
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(WriteOutcome::IdExists),
            Err(err) => {
                log::error!("Failed to create document {:?}: {}", path, err);
                Err(classify(err))
            }
        }
    }

    fn read_document(&self, collection: &str, id: &str) -> HaliteResult<Option<String>> {
        let path = self.document_path(collection, id);
        match fs::read_to_string(&path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                log::error!("Failed to read document {:?}: {}", path, err);
                Err(classify(err))
            }
        }
    }

    fn remove_document(&self, collection: &str, id: &str) -> HaliteResult<()> {
        let path = self.document_path(collection, id);
        match fs::remove_file(&path) {
            Ok(()) => {
                log::debug!("Removed document {:?}", path);
                Ok(())
            }
            // deleting an absent document is a no-op
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                log::error!("Failed to remove document {:?}: {}", path, err);
                Err(classify(err))
            }
        }
    }

    fn scan_documents(&self, collection: &str) -> HaliteResult<Vec<String>> {
        let path = self.collection_path(collection);
        let entries = match fs::read_dir(&path) {
            Ok(entries) => entries,
            // an absent collection has no documents
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                log::error!("Failed to list collection {:?}: {}", path, err);
                return Err(classify(err));
            }
        };

        let mut payloads = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::debug!("Skipping unreadable entry in {:?}: {}", path, err);
                    continue;
                }
            };
            match fs::read_to_string(entry.path()) {
                Ok(payload) => payloads.push(payload),
                Err(err) => {
                    log::debug!("Skipping unreadable entry {:?}: {}", entry.path(), err);
                }
            }
        }
        Ok(payloads)
    }
}
