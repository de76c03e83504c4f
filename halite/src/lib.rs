//! # Halite - Embedded File-Backed Document Store
//!
//! Halite is a lightweight embedded document store written in Rust. It keeps
//! every document as one JSON file inside the directory of its collection,
//! under a root directory you point it at. The directory listing of a
//! collection is its only index.
//!
//! ## Key Features
//!
//! - **Embedded**: No separate server process required
//! - **Plain files**: One UTF-8 JSON file per document; inspect or edit the
//!   store with nothing but a shell
//! - **Lazy collections**: A collection directory appears on first insert;
//!   reading or deleting from an absent collection is a normal outcome, not
//!   an error
//! - **Safe identifier allocation**: Generated identifiers are claimed with
//!   an atomic exclusive create, so a collision can never silently
//!   overwrite an existing document
//! - **Resilient scans**: `find` skips unreadable or corrupt files and
//!   contains panicking predicates instead of aborting the scan
//! - **Clean API**: PIMPL pattern provides a stable, cheaply cloneable
//!   handle
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use halite::{doc, Halite};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Connect to an existing directory
//! let db = Halite::connect("/var/lib/myapp/data")?;
//!
//! // Insert documents; ids are generated when absent
//! let id = db.insert("workers", doc!{ name: "matilda", age: 30 })?;
//! db.insert("workers", doc!{ "_id": "mark", name: "mark" })?;
//!
//! // Point lookups
//! let worker = db.get("workers", &id)?;
//!
//! // Predicate scans
//! let adults = db.find("workers", |doc| {
//!     doc.get("age").and_then(|v| v.as_i64()).unwrap_or(0) >= 18
//! })?;
//!
//! // Deletes are idempotent
//! db.delete("workers", &id)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## On-Disk Layout
//!
//! ```text
//! <root>/                   the directory given to connect()
//!   workers/                one directory per collection
//!     1469946205839vpps.json   one JSON file per document
//!     mark.json
//! ```
//!
//! There is no manifest, index, or metadata file. Cross-operation
//! consistency is exactly what the filesystem provides: exclusive create is
//! atomic, plain writes are last-writer-wins.
//!
//! ## Module Organization
//!
//! - [`collection`] - Documents, collection handles, and identifier
//!   generation
//! - [`common`] - Constants, helpers, and the JSON value types
//! - [`errors`] - Error types and result definitions
//! - [`halite`] - Core store interface
//! - [`store`] - Storage backend abstraction and the filesystem backend

use crate::collection::IdGenerator;
use std::sync::LazyLock;

pub mod collection;
pub mod common;
pub mod errors;
pub mod halite;
pub mod store;

pub(crate) static ID_GENERATOR: LazyLock<IdGenerator> = LazyLock::new(IdGenerator::new);

pub use crate::collection::{Document, HaliteCollection};
pub use crate::errors::{ErrorKind, HaliteError, HaliteResult};
pub use crate::halite::Halite;
