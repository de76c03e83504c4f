use once_cell::sync::Lazy;
use serde_json::Value;

use crate::errors::{ErrorKind, HaliteError, HaliteResult};

static COLLECTION_MISSING_ERROR: Lazy<HaliteError> =
    Lazy::new(|| HaliteError::new("collection is missing", ErrorKind::ValidationError));

static ID_MISSING_ERROR: Lazy<HaliteError> =
    Lazy::new(|| HaliteError::new("id is missing", ErrorKind::ValidationError));

static OBJECT_MISSING_ERROR: Lazy<HaliteError> =
    Lazy::new(|| HaliteError::new("object is missing", ErrorKind::ValidationError));

static OBJECT_NOT_AN_OBJECT_ERROR: Lazy<HaliteError> =
    Lazy::new(|| HaliteError::new("object is not an object", ErrorKind::ValidationError));

pub(crate) static OBJECT_ID_NOT_A_STRING_ERROR: Lazy<HaliteError> =
    Lazy::new(|| HaliteError::new("object id is not a string", ErrorKind::InvalidId));

/// Validates a collection name before any I/O is attempted.
///
/// An empty name is rejected with the fixed message `collection is missing`.
/// Anything else is accepted; the name is only interpreted as a directory
/// name under the store root.
pub(crate) fn validate_collection_name(name: &str) -> HaliteResult<()> {
    if name.is_empty() {
        log::error!("collection is missing");
        return Err(COLLECTION_MISSING_ERROR.clone());
    }
    Ok(())
}

/// Validates a document identifier before any I/O is attempted.
///
/// An empty identifier is rejected with the fixed message `id is missing`.
/// No format check beyond that; identifiers are arbitrary strings.
pub(crate) fn validate_document_id(id: &str) -> HaliteResult<()> {
    if id.is_empty() {
        log::error!("id is missing");
        return Err(ID_MISSING_ERROR.clone());
    }
    Ok(())
}

/// Validates that a record value is a JSON object.
///
/// `Null` maps to `object is missing`, any other non-object value to
/// `object is not an object`.
pub(crate) fn validate_record(value: &Value) -> HaliteResult<()> {
    if value.is_null() {
        log::error!("object is missing");
        return Err(OBJECT_MISSING_ERROR.clone());
    }
    if !value.is_object() {
        log::error!("object is not an object");
        return Err(OBJECT_NOT_AN_OBJECT_ERROR.clone());
    }
    Ok(())
}
