//! Wire types for the mapping service protocol.
//!
//! Field names follow the backend's JSON contract (`sobject`, `field`, `type`,
//! …), so every type carries explicit serde renames rather than a blanket
//! `rename_all`.

use serde::{Deserialize, Serialize};

/// Response envelope used by every mapping service endpoint.
///
/// `success: false` responses carry a human-readable `message` and an optional
/// error classification in `type`; `payload` is only present on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEnvelope<T> {
    /// Whether the backend processed the request.
    pub success: bool,
    /// Human-readable message, usually only set on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Backend error classification string.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Response data, present on success.
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

// `#[serde(default)]` on `payload` would require `T: Default`.
fn none<T>() -> Option<T> {
    None
}

/// One table in the environment's catalog, as returned by the catalog endpoint.
///
/// Fields are not included; they are resolved lazily per table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Remote table (sobject) name, unique within the environment.
    #[serde(rename = "sobject")]
    pub name: String,
    /// Local table name the sobject is mapped to, if a mapping exists.
    #[serde(rename = "table", default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Selection state recorded by the last successful save.
    #[serde(default)]
    pub selected: bool,
}

/// One field definition, as returned by the per-table field endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldEntry {
    /// Field name, unique within its table.
    #[serde(rename = "field")]
    pub name: String,
    /// Column name the field is mapped to, if a mapping exists.
    #[serde(rename = "db_name", default, skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
    /// Semantic type tag ("string", "textarea", "number", …).
    #[serde(rename = "type", default)]
    pub type_name: String,
    /// Declared length, 0 when not applicable.
    #[serde(default)]
    pub length: u32,
    /// Selection state recorded by the last successful save.
    #[serde(default)]
    pub selected: bool,
}

/// One dirty table in a save payload, carrying its full current field state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableChange {
    /// Remote table (sobject) name.
    #[serde(rename = "sobject")]
    pub name: String,
    /// Current selection state of the table.
    pub selected: bool,
    /// Always true in a save payload; the backend skips non-dirty entries.
    pub dirty: bool,
    /// Current selection state of every field.
    pub fields: Vec<FieldChange>,
}

/// One field inside a [`TableChange`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Field name.
    #[serde(rename = "field")]
    pub name: String,
    /// Semantic type tag.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Declared length.
    pub length: u32,
    /// Current selection state.
    pub selected: bool,
}
