pub mod constants;
mod date_utils;
mod type_utils;
mod validation;

pub use constants::*;
pub use date_utils::*;
pub use type_utils::*;
pub(crate) use validation::*;

// Documents are plain JSON objects; the JSON value and object map types are
// part of the public API surface.
pub use serde_json::{Map, Value};
