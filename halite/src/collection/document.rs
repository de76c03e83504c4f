use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Map;
use std::fmt::Display;

use crate::common::{Value, DOC_ID, OBJECT_ID_NOT_A_STRING_ERROR};
use crate::errors::{ErrorKind, HaliteError, HaliteResult};

/// Represents a document in a Halite store.
///
/// A Halite document is a set of key-value pairs. The key is always a
/// [String] and the value is a JSON [Value]. Documents are persisted as
/// canonical JSON text, one file per document, inside the directory of the
/// collection they belong to.
///
/// The `_id` field is reserved for the document identifier. It may be
/// supplied by the caller (any string) or generated by the store during
/// insertion. When present, its value must be a JSON string; the identifier
/// doubles as the file stem of the persisted document.
///
/// # Examples
///
/// ```rust,ignore
/// use halite::doc;
///
/// let mut doc = doc!{
///     name: "Alice",
///     age: 30
/// };
/// doc.put("team", "storage")?;
/// assert_eq!(doc.get("name").and_then(|v| v.as_str()), Some("Alice"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    data: Map<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = Document::new();
    /// assert!(doc.is_empty());
    /// assert_eq!(doc.size(), 0);
    /// ```
    pub fn new() -> Self {
        Document { data: Map::new() }
    }

    /// Creates a document from an existing JSON object map.
    pub fn from_map(data: Map<String, Value>) -> Self {
        Document { data }
    }

    /// Consumes the document and returns the underlying JSON object map.
    pub fn into_map(self) -> Map<String, Value> {
        self.data
    }

    /// Checks if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of fields in the document.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates the specified value with the specified key in this document.
    ///
    /// If the key already exists, its value is replaced. The reserved `_id`
    /// field only accepts string values, since the identifier names the
    /// document's file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The key is empty
    /// * The key is `_id` and the value is not a JSON string
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice")?;
    /// doc.put("age", 30)?;
    /// assert_eq!(doc.size(), 2);
    /// ```
    pub fn put<T: Into<Value>>(&mut self, key: impl Into<String>, value: T) -> HaliteResult<()> {
        let key = key.into();
        // key cannot be empty
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(HaliteError::new(
                "Document does not support empty key",
                ErrorKind::ValidationError,
            ));
        }

        let value = value.into();

        // validate the _id field
        if key == DOC_ID && !value.is_string() {
            log::error!("object id is not a string");
            return Err(OBJECT_ID_NOT_A_STRING_ERROR.clone());
        }

        self.data.insert(key, value);
        Ok(())
    }

    /// Returns the value associated with the key, or `None` if this document
    /// contains no mapping for the key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Removes the mapping for the key, returning the previous value if the
    /// key was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// Checks whether the document carries an `_id` field (of any type).
    pub fn has_id(&self) -> bool {
        self.data.contains_key(DOC_ID)
    }

    /// Returns the document identifier, if present and a string.
    pub fn id(&self) -> Option<&str> {
        self.data.get(DOC_ID).and_then(Value::as_str)
    }

    /// Returns the identifier if present, enforcing the string constraint.
    ///
    /// * no `_id` field → `Ok(None)`
    /// * `_id` is a JSON string → `Ok(Some(id))`
    /// * `_id` is any other JSON type → `object id is not a string`
    pub(crate) fn validated_id(&self) -> HaliteResult<Option<&str>> {
        match self.data.get(DOC_ID) {
            None => Ok(None),
            Some(Value::String(id)) => Ok(Some(id)),
            Some(_) => {
                log::error!("object id is not a string");
                Err(OBJECT_ID_NOT_A_STRING_ERROR.clone())
            }
        }
    }

    /// Sets the document identifier, replacing any previous value.
    pub(crate) fn set_id(&mut self, id: &str) {
        self.data
            .insert(DOC_ID.to_string(), Value::String(id.to_string()));
    }

    /// Serializes the document to its canonical JSON text form.
    pub fn to_json(&self) -> HaliteResult<String> {
        let payload = serde_json::to_string(&self.data)?;
        Ok(payload)
    }

    /// Parses a document from its persisted JSON text form.
    ///
    /// Content that does not parse as a JSON object yields the fixed error
    /// `document is not parsable`.
    pub fn from_json(payload: &str) -> HaliteResult<Document> {
        match serde_json::from_str::<Map<String, Value>>(payload) {
            Ok(data) => Ok(Document { data }),
            Err(err) => {
                log::error!("document is not parsable: {}", err);
                Err(HaliteError::new(
                    "document is not parsable",
                    ErrorKind::DocumentCorrupted,
                ))
            }
        }
    }
}

impl TryFrom<Value> for Document {
    type Error = HaliteError;

    /// Converts a JSON value into a document, applying the record validation
    /// contract: `Null` is `object is missing`, any other non-object value is
    /// `object is not an object`.
    fn try_from(value: Value) -> HaliteResult<Document> {
        crate::common::validate_record(&value)?;
        match value {
            Value::Object(data) => Ok(Document { data }),
            _ => unreachable!("validate_record only admits objects"),
        }
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Value {
        Value::Object(document.data)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(|data| Document { data })
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = serde_json::to_string(&self.data).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", text)
    }
}

/// Strips the surrounding quotes a `stringify!` invocation leaves on string
/// literal keys, so `doc!{"name": ...}` and `doc!{name: ...}` are equivalent.
pub fn normalize(key: &str) -> String {
    key.trim_matches('"').to_string()
}

/// Creates a [Document] from a literal set of key-value pairs.
///
/// Keys may be bare identifiers or string literals; values may be literals,
/// parenthesized expressions, nested documents, or arrays.
///
/// # Examples
///
/// ```rust,ignore
/// use halite::doc;
///
/// let simple = doc!{
///     name: "Alice",
///     age: 30
/// };
///
/// // With expressions
/// let base = 100;
/// let with_expr = doc!{
///     name: "Bob",
///     score: (base * 2)
/// };
///
/// // Nested objects and arrays
/// let complex = doc!{
///     user: {
///         name: "Charlie",
///         tags: ["admin", "user"]
///     },
///     values: [1, 2, 3]
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document
    () => {
        $crate::collection::Document::new()
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put($crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
/// Handles nested objects, arrays, and expressions.
#[macro_export]
macro_rules! doc_value {
    // match a nested object
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Object($crate::doc!{ $($key : $value),* }.into_map())
        }
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, function call, arithmetic in parens, literals, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set_up() -> Document {
        doc! {
            score: 1034,
            location: {
                state: "NY",
                city: "New York",
                zip: 10001
            },
            category: ["food", "produce", "grocery"]
        }
    }

    #[test]
    fn test_new_document_is_empty() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.size(), 0);
    }

    #[test]
    fn test_put_and_get() {
        let mut doc = Document::new();
        doc.put("name", "Alice").unwrap();
        doc.put("age", 30).unwrap();

        assert_eq!(doc.size(), 2);
        assert_eq!(doc.get("name"), Some(&json!("Alice")));
        assert_eq!(doc.get("age"), Some(&json!(30)));
        assert_eq!(doc.get("missing"), None);
    }

    #[test]
    fn test_put_overwrites_existing_key() {
        let mut doc = doc! { status: "inactive" };
        doc.put("status", "active").unwrap();
        assert_eq!(doc.get("status"), Some(&json!("active")));
        assert_eq!(doc.size(), 1);
    }

    #[test]
    fn test_put_rejects_empty_key() {
        let mut doc = Document::new();
        let result = doc.put("", "value");
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            &ErrorKind::ValidationError
        );
    }

    #[test]
    fn test_put_accepts_string_id() {
        let mut doc = Document::new();
        doc.put(DOC_ID, "matilda").unwrap();
        assert_eq!(doc.id(), Some("matilda"));
    }

    #[test]
    fn test_put_rejects_non_string_id() {
        let mut doc = Document::new();
        let result = doc.put(DOC_ID, 42);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.message(), "object id is not a string");
        assert_eq!(err.kind(), &ErrorKind::InvalidId);
    }

    #[test]
    fn test_remove() {
        let mut doc = set_up();
        assert_eq!(doc.remove("score"), Some(json!(1034)));
        assert_eq!(doc.remove("score"), None);
        assert_eq!(doc.get("score"), None);
    }

    #[test]
    fn test_id_accessors() {
        let mut doc = doc! { name: "mark" };
        assert!(!doc.has_id());
        assert_eq!(doc.id(), None);

        doc.set_id("1469946205839vppstpzdr");
        assert!(doc.has_id());
        assert_eq!(doc.id(), Some("1469946205839vppstpzdr"));
    }

    #[test]
    fn test_validated_id_absent() {
        let doc = doc! { name: "mark" };
        assert_eq!(doc.validated_id().unwrap(), None);
    }

    #[test]
    fn test_validated_id_string() {
        let doc = doc! { "_id": "mark", name: "mark" };
        assert_eq!(doc.validated_id().unwrap(), Some("mark"));
    }

    #[test]
    fn test_validated_id_non_string() {
        let doc = Document::try_from(json!({"_id": 7, "name": "mark"})).unwrap();
        let result = doc.validated_id();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().message(), "object id is not a string");
    }

    #[test]
    fn test_try_from_object_value() {
        let doc = Document::try_from(json!({"name": "matilda"})).unwrap();
        assert_eq!(doc.get("name"), Some(&json!("matilda")));
    }

    #[test]
    fn test_try_from_null_value() {
        let result = Document::try_from(Value::Null);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().message(), "object is missing");
    }

    #[test]
    fn test_try_from_non_object_value() {
        let result = Document::try_from(json!([1, 2, 3]));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().message(), "object is not an object");
    }

    #[test]
    fn test_json_round_trip() {
        let doc = set_up();
        let payload = doc.to_json().unwrap();
        let parsed = Document::from_json(&payload).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let result = Document::from_json("matilda");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.message(), "document is not parsable");
        assert_eq!(err.kind(), &ErrorKind::DocumentCorrupted);
    }

    #[test]
    fn test_from_json_rejects_non_object_json() {
        let result = Document::from_json("[1, 2, 3]");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::DocumentCorrupted);
    }

    #[test]
    fn test_doc_macro_with_nested_values() {
        let doc = set_up();
        assert_eq!(doc.size(), 3);
        assert_eq!(
            doc.get("location"),
            Some(&json!({"state": "NY", "city": "New York", "zip": 10001}))
        );
        assert_eq!(
            doc.get("category"),
            Some(&json!(["food", "produce", "grocery"]))
        );
    }

    #[test]
    fn test_doc_macro_with_string_literal_keys() {
        let doc = doc! { "name": "Alice", "age": 30 };
        assert_eq!(doc.get("name"), Some(&json!("Alice")));
        assert_eq!(doc.get("age"), Some(&json!(30)));
    }

    #[test]
    fn test_doc_macro_with_expressions() {
        let base = 100;
        let doc = doc! {
            score: (base * 2),
            label: (format!("value_{}", base))
        };
        assert_eq!(doc.get("score"), Some(&json!(200)));
        assert_eq!(doc.get("label"), Some(&json!("value_100")));
    }

    #[test]
    fn test_empty_doc_macro() {
        let doc = doc! {};
        assert!(doc.is_empty());
    }

    #[test]
    fn test_display_renders_json() {
        let doc = doc! { name: "mark" };
        assert_eq!(format!("{}", doc), r#"{"name":"mark"}"#);
    }

    #[test]
    fn test_serde_round_trip_via_value() {
        let doc = set_up();
        let value: Value = doc.clone().into();
        let back = Document::try_from(value).unwrap();
        assert_eq!(back, doc);
    }
}
