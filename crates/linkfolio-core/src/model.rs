//! Records read from the document store
//!
//! Documents arrive as loose JSON field maps. [`Profile`] and [`Link`] are the
//! typed views the rest of the crate works with.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw document as returned by a store backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document id (last path segment)
    pub id: String,
    /// Field map with plain JSON values
    pub fields: Map<String, Value>,
}

impl Document {
    /// Create a document from an id and a field map
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Look up a string field
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Look up a boolean field
    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.fields.get(key).and_then(Value::as_bool)
    }
}

/// The profile shown at the top of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name, never empty
    pub name: String,
    /// Optional headline
    pub title: Option<String>,
}

impl Profile {
    /// Create a profile
    pub fn new(name: impl Into<String>, title: Option<String>) -> Self {
        Self {
            name: name.into(),
            title,
        }
    }

    /// Decode a profile from a `users/{id}` document
    ///
    /// `name` must be a non-blank string. A `title` of any other type than
    /// string is ignored.
    pub fn from_document(doc: &Document) -> Result<Self, String> {
        let name = match doc.fields.get("name") {
            Some(Value::String(name)) if !name.trim().is_empty() => name.clone(),
            Some(Value::String(_)) => return Err("name is empty".to_string()),
            Some(_) => return Err("name is not a string".to_string()),
            None => return Err("name is missing".to_string()),
        };

        Ok(Self {
            name,
            title: doc.str_field("title").map(str::to_string),
        })
    }

    /// Title or the empty string
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// One outbound link on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Store document id
    pub id: String,
    /// Display label
    pub name: String,
    /// Bare host or full URI, as stored
    pub target: String,
    /// Gates both display and contact-card eligibility
    pub is_enabled: bool,
}

impl Link {
    /// Create a link
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        target: impl Into<String>,
        is_enabled: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target: target.into(),
            is_enabled,
        }
    }

    /// Decode a link from a `users/{id}/links/{linkId}` document
    ///
    /// The stored fields are `name`, `link` and `isEnabled`; a missing
    /// `isEnabled` means disabled.
    pub fn from_document(doc: &Document) -> Result<Self, String> {
        let name = doc
            .str_field("name")
            .ok_or_else(|| "name is missing or not a string".to_string())?;
        let target = doc
            .str_field("link")
            .ok_or_else(|| "link is missing or not a string".to_string())?;

        Ok(Self {
            id: doc.id.clone(),
            name: name.to_string(),
            target: target.to_string(),
            is_enabled: doc.bool_field("isEnabled").unwrap_or(false),
        })
    }

    /// Case-insensitive keyword match on the display name
    pub fn name_contains_any(&self, keywords: &[&str]) -> bool {
        let name = self.name.to_lowercase();
        keywords.iter().any(|keyword| name.contains(keyword))
    }
}
