//! Raw course items as delivered by the content-retrieval side.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ParseError, Result};

/// The kind of course item a record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Quiz,
    Assignment,
}

impl ItemKind {
    /// Returns the wire name of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::Assignment => "assignment",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiz" => Ok(Self::Quiz),
            "assignment" => Ok(Self::Assignment),
            _ => Err(ParseError::UnknownKind(s.to_string())),
        }
    }
}

/// A course item whose content is HTML-stripped plaintext.
///
/// # Examples
///
/// ```
/// use courseparse::item::{ItemKind, RawItem};
///
/// let item = RawItem::from_json(r#"{"type": "quiz", "id": 7, "title": "T", "content": "Quiz: T"}"#).unwrap();
/// assert_eq!(item.kind, ItemKind::Quiz);
/// assert_eq!(item.id, 7);
///
/// // The identifier is mandatory.
/// assert!(RawItem::from_json(r#"{"type": "quiz", "title": "T"}"#).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawItem {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl RawItem {
    /// Creates a raw item.
    pub fn new(
        kind: ItemKind,
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            id,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Reads a raw item from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` for malformed JSON and the errors of
    /// [`RawItem::from_value`] for well-formed documents.
    pub fn from_json(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(&value)
    }

    /// Reads a raw item from an already-decoded JSON value.
    ///
    /// `id` and `type` are mandatory; `title` and `content` default to empty
    /// strings when absent or null.
    ///
    /// # Errors
    ///
    /// - `ParseError::MissingField` if `id` or `type` is absent.
    /// - `ParseError::InvalidField` if a key holds the wrong JSON type.
    /// - `ParseError::UnknownKind` if `type` names no known item kind.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| ParseError::invalid_field("item", "expected a JSON object"))?;

        let id = obj.get("id").ok_or_else(|| ParseError::missing_field("id"))?;
        let id = id.as_i64().ok_or_else(|| {
            ParseError::invalid_field("id", format!("expected an integer, found {id}"))
        })?;

        let kind = obj
            .get("type")
            .ok_or_else(|| ParseError::missing_field("type"))?;
        let kind = kind
            .as_str()
            .ok_or_else(|| {
                ParseError::invalid_field("type", format!("expected a string, found {kind}"))
            })?
            .parse::<ItemKind>()?;

        Ok(Self {
            kind,
            id,
            title: optional_string(obj, "title")?,
            content: optional_string(obj, "content")?,
        })
    }
}

fn optional_string(obj: &Map<String, Value>, field: &str) -> Result<String> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ParseError::invalid_field(
            field,
            format!("expected a string, found {other}"),
        )),
    }
}
