//! Core types for the curation pipeline

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Resource identifier, `{category-prefix}-{8 hex digits}`
pub type ResourceId = String;

/// Source-specific metadata carried alongside a record (`_source`, `_reject_reason`, ...)
pub type ExtraMetadata = BTreeMap<String, serde_json::Value>;

// ============================================================================
// Resource Record
// ============================================================================

/// One catalog entry or candidate.
///
/// Field names on the wire match the catalog CSV header. Every field is
/// optional on input; a missing text field reads as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    #[serde(rename = "ID", default, deserialize_with = "empty_if_null")]
    pub id: ResourceId,
    #[serde(rename = "DisplayName", default, deserialize_with = "empty_if_null")]
    pub display_name: String,
    #[serde(rename = "DisplayName_ZH", default, deserialize_with = "empty_if_null")]
    pub display_name_localized: String,
    #[serde(rename = "Category", default, deserialize_with = "empty_if_null")]
    pub category: String,
    #[serde(rename = "SubCategory", default, deserialize_with = "empty_if_null")]
    pub subcategory: String,
    #[serde(rename = "PrimaryLink", default, deserialize_with = "empty_if_null")]
    pub primary_link: String,
    #[serde(rename = "SecondaryLink", default, deserialize_with = "empty_if_null")]
    pub secondary_link: String,
    #[serde(rename = "Author", default, deserialize_with = "empty_if_null")]
    pub author: String,
    #[serde(rename = "AuthorProfile", default, deserialize_with = "empty_if_null")]
    pub author_profile: String,
    #[serde(rename = "IsActive", default, with = "catalog_bool")]
    pub is_active: bool,
    #[serde(rename = "DateAdded", default, deserialize_with = "empty_if_null")]
    pub date_added: String,
    #[serde(rename = "LastModified", default, deserialize_with = "empty_if_null")]
    pub last_modified: String,
    #[serde(rename = "LastChecked", default, deserialize_with = "empty_if_null")]
    pub last_checked: String,
    #[serde(rename = "License", default, deserialize_with = "empty_if_null")]
    pub license: String,
    #[serde(rename = "Description", default, deserialize_with = "empty_if_null")]
    pub description: String,
    #[serde(rename = "Description_ZH", default, deserialize_with = "empty_if_null")]
    pub description_localized: String,
    #[serde(rename = "Tags_ZH", default, deserialize_with = "empty_if_null")]
    pub tags_localized: String,
    #[serde(rename = "IsPinned", default, with = "catalog_bool")]
    pub is_pinned: bool,
    #[serde(rename = "Section", default, deserialize_with = "empty_if_null")]
    pub section: String,
    /// Fields outside the catalog contract
    #[serde(flatten)]
    pub extra: ExtraMetadata,
}

impl ResourceRecord {
    /// Create a record with a name and primary link
    pub fn new(display_name: impl Into<String>, primary_link: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            primary_link: primary_link.into(),
            is_active: true,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Description used for comparison: English first, localized as fallback
    pub fn comparable_description(&self) -> &str {
        if self.description.is_empty() {
            &self.description_localized
        } else {
            &self.description
        }
    }

    /// String value of an extra metadata key
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }

    /// Integer value of an extra metadata key (numbers or numeric strings)
    pub fn extra_i64(&self, key: &str) -> Option<i64> {
        match self.extra.get(key)? {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Where an indexed record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordOrigin {
    Catalog,
    Pending,
    Rejected,
}

impl RecordOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RecordOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text field where hand-edited queue files may hold `null`
fn empty_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `"TRUE"`/`"FALSE"` booleans as written in the catalog.
///
/// Reading also accepts JSON booleans, any casing, and blanks (false).
mod catalog_bool {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "TRUE" } else { "FALSE" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Bool(b)) => b,
            Some(Raw::Text(s)) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "1"
            ),
            None => false,
        })
    }
}
