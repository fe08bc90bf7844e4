//! Schema 节点类型（表与字段）

use serde::{Deserialize, Serialize};

use schema_mapper_connector::{CatalogEntry, FieldEntry};

/// A single selectable field within a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    /// Field name, unique within its owning table.
    pub name: String,
    /// Semantic type tag ("string", "textarea", "number", …). Used for
    /// display classification only, never by the selection logic.
    #[serde(rename = "typeName")]
    pub type_name: String,
    /// Declared length, 0 when not applicable.
    pub length: u32,
    /// Whether the user wants this field included in the mapping.
    pub selected: bool,
}

impl Field {
    /// Whether the field holds free-form text (rendered differently in UIs).
    #[must_use]
    pub fn is_text_type(&self) -> bool {
        matches!(self.type_name.as_str(), "string" | "textarea")
    }
}

impl From<FieldEntry> for Field {
    fn from(entry: FieldEntry) -> Self {
        Self {
            name: entry.name,
            type_name: entry.type_name,
            length: entry.length,
            selected: entry.selected,
        }
    }
}

/// A table (sobject) in the environment's catalog.
///
/// `fields` stays `None` until the field list is fetched; it is fetched at
/// most once per tree lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Table name, unique within the environment.
    pub name: String,
    /// Field list, absent until lazily fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
    /// Stored aggregate: true iff at least one field is selected, or the
    /// table was selected in the catalog before its fields loaded.
    pub selected: bool,
    /// Whether the selection state changed since the last successful save.
    pub dirty: bool,
}

impl Table {
    /// Whether the field list has been fetched.
    #[must_use]
    pub fn fields_loaded(&self) -> bool {
        self.fields.is_some()
    }

    /// Logical OR over all loaded fields' selection state.
    ///
    /// Returns false when fields are not loaded.
    #[must_use]
    pub fn any_field_selected(&self) -> bool {
        self.fields
            .as_deref()
            .is_some_and(|fields| fields.iter().any(|f| f.selected))
    }
}

impl From<CatalogEntry> for Table {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            name: entry.name,
            fields: None,
            selected: entry.selected,
            dirty: false,
        }
    }
}
