mod document;
mod halite_collection;
mod id_generator;
pub(crate) mod operation;

pub use document::{normalize, Document};
pub use halite_collection::HaliteCollection;
pub use id_generator::IdGenerator;
