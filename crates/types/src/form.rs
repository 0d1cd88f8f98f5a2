//! The form data model.
//!
//! A page of an estimate is a bag of edited fields. Values are JSON-shaped,
//! with one addition: structured references to binary content (a photo taken
//! on site, an attached product sheet) are recognised on conversion so the
//! assembler can embed them instead of printing their URI.

use crate::ids::ResourceUri;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use thiserror::Error;

/// Field names, in the order the form produced them.
pub type FormDataBag = IndexMap<String, FormValue>;

/// Object keys that may carry the content kind of a structured reference.
const KIND_KEYS: [&str; 3] = ["mimeType", "type", "kind"];

#[derive(Error, Debug)]
pub enum FormError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),
}

/// What a binary reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Image,
    Document,
}

impl ContentKind {
    /// Derives the kind from a MIME type or picker tag.
    ///
    /// `image/jpeg` and `image` are images; `application/pdf` and `pdf` are documents.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.to_ascii_lowercase();
        if tag.contains("image") {
            Some(ContentKind::Image)
        } else if tag.contains("pdf") {
            Some(ContentKind::Document)
        } else {
            None
        }
    }

    fn as_tag(self) -> &'static str {
        match self {
            ContentKind::Image => "image",
            ContentKind::Document => "application/pdf",
        }
    }
}

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FormValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Reference {
        uri: ResourceUri,
        kind: Option<ContentKind>,
    },
    List(Vec<FormValue>),
    Bag(FormDataBag),
}

impl FormValue {
    pub fn text(s: impl Into<String>) -> Self {
        FormValue::Text(s.into())
    }

    pub fn reference(uri: impl Into<ResourceUri>, kind: Option<ContentKind>) -> Self {
        FormValue::Reference {
            uri: uri.into(),
            kind,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FormValue::Null)
    }

    pub fn as_bag(&self) -> Option<&FormDataBag> {
        match self {
            FormValue::Bag(bag) => Some(bag),
            _ => None,
        }
    }

    pub fn as_bag_mut(&mut self) -> Option<&mut FormDataBag> {
        match self {
            FormValue::Bag(bag) => Some(bag),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            FormValue::Null => "null",
            FormValue::Bool(_) => "boolean",
            FormValue::Number(_) => "number",
            FormValue::Text(_) => "string",
            FormValue::Reference { .. } => "reference",
            FormValue::List(_) => "array",
            FormValue::Bag(_) => "object",
        }
    }

    fn from_object(map: Map<String, Value>) -> Self {
        if let Some(Value::String(uri)) = map.get("uri") {
            let kind = KIND_KEYS
                .iter()
                .filter_map(|key| map.get(*key).and_then(Value::as_str))
                .find_map(ContentKind::from_tag);
            if let Some(kind) = kind {
                return FormValue::Reference {
                    uri: ResourceUri::from(uri.as_str()),
                    kind: Some(kind),
                };
            }
        }
        FormValue::Bag(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<Value> for FormValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FormValue::Null,
            Value::Bool(b) => FormValue::Bool(b),
            Value::Number(n) => FormValue::Number(n),
            Value::String(s) => FormValue::Text(s),
            Value::Array(items) => FormValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => FormValue::from_object(map),
        }
    }
}

impl From<FormValue> for Value {
    fn from(value: FormValue) -> Self {
        match value {
            FormValue::Null => Value::Null,
            FormValue::Bool(b) => Value::Bool(b),
            FormValue::Number(n) => Value::Number(n),
            FormValue::Text(s) => Value::String(s),
            FormValue::Reference { uri, kind } => {
                let mut map = Map::new();
                map.insert("uri".to_string(), Value::String(uri.as_str().to_string()));
                if let Some(kind) = kind {
                    map.insert("mimeType".to_string(), Value::String(kind.as_tag().to_string()));
                }
                Value::Object(map)
            }
            FormValue::List(items) => Value::Array(items.into_iter().map(Into::into).collect()),
            FormValue::Bag(bag) => {
                Value::Object(bag.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        FormValue::Text(s.to_string())
    }
}

impl From<String> for FormValue {
    fn from(s: String) -> Self {
        FormValue::Text(s)
    }
}

impl From<bool> for FormValue {
    fn from(b: bool) -> Self {
        FormValue::Bool(b)
    }
}

impl From<i64> for FormValue {
    fn from(n: i64) -> Self {
        FormValue::Number(n.into())
    }
}

impl From<FormDataBag> for FormValue {
    fn from(bag: FormDataBag) -> Self {
        FormValue::Bag(bag)
    }
}

/// Renders scalars the way they appear on a printed page.
///
/// Containers render as their marker (`[Array]`, `[Object]`); references render as their URI.
impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormValue::Null => f.write_str("N/A"),
            FormValue::Bool(b) => write!(f, "{}", b),
            FormValue::Number(n) => write!(f, "{}", n),
            FormValue::Text(s) => f.write_str(s),
            FormValue::Reference { uri, .. } => write!(f, "{}", uri),
            FormValue::List(_) => f.write_str("[Array]"),
            FormValue::Bag(_) => f.write_str("[Object]"),
        }
    }
}

/// Parses a JSON object into a bag, keeping key order.
pub fn bag_from_json_str(json: &str) -> Result<FormDataBag, FormError> {
    let value: Value = serde_json::from_str(json)?;
    bag_from_value(value)
}

/// Converts a JSON object into a bag; any other JSON type is rejected.
pub fn bag_from_value(value: Value) -> Result<FormDataBag, FormError> {
    match FormValue::from(value) {
        FormValue::Bag(bag) => Ok(bag),
        // A top-level object that looks like a reference is still a page of fields.
        FormValue::Reference { uri, kind } => {
            let mut bag = FormDataBag::new();
            bag.insert("uri".to_string(), FormValue::Text(uri.as_str().to_string()));
            if let Some(kind) = kind {
                bag.insert("mimeType".to_string(), FormValue::Text(kind.as_tag().to_string()));
            }
            Ok(bag)
        }
        other => Err(FormError::NotAnObject(other.type_name())),
    }
}
