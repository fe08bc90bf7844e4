//! 选择树：表/字段层级、选择传播与脏标记

use schema_mapper_connector::{CatalogEntry, FieldChange, FieldEntry, TableChange};

use crate::error::{CoreError, CoreResult};
use crate::types::{Field, Table};

/// What a caller must do after asking to select a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAction {
    /// The table was already the active selection; nothing to do.
    AlreadySelected,
    /// The table is selected and its fields are present.
    Ready,
    /// The table is selected but its fields must be fetched.
    FetchNeeded,
}

/// Result of handing a completed field fetch back to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFetchOutcome {
    /// The fields were attached to the requesting table.
    Applied,
    /// The response no longer matched the active selection and was dropped.
    Stale,
}

/// In-memory hierarchy of tables and fields for one environment.
///
/// Owns all selection and dirty state. The active selection and the dirty set
/// are name-keyed views over the `tables` sequence; no node holds a reference
/// to another node.
///
/// Selection propagation is asymmetric on purpose: selecting a field forces
/// its table selected, while a table can only be turned *off* through
/// [`toggle_table`](Self::toggle_table) — turning it on goes through field
/// selection or [`select_all_fields`](Self::select_all_fields).
#[derive(Debug, Default)]
pub struct SelectionTree {
    tables: Vec<Table>,
    selected_table: Option<String>,
}

impl SelectionTree {
    /// Create an empty tree with no catalog loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog wholesale.
    ///
    /// Discards the previous tables, the active selection and every dirty
    /// flag; switching environments must not leak stale selections.
    pub fn load_catalog(&mut self, entries: Vec<CatalogEntry>) {
        self.tables = entries.into_iter().map(Table::from).collect();
        self.selected_table = None;
    }

    /// All tables in catalog order.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Look up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Name of the currently selected table, if any.
    #[must_use]
    pub fn selected_table_name(&self) -> Option<&str> {
        self.selected_table.as_deref()
    }

    /// The currently selected table, if any.
    #[must_use]
    pub fn selected_table(&self) -> Option<&Table> {
        self.selected_table
            .as_deref()
            .and_then(|name| self.tables.iter().find(|t| t.name == name))
    }

    /// True iff at least one table has unsaved changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.tables.iter().any(|t| t.dirty)
    }

    /// Make `name` the active table.
    ///
    /// Re-selecting the active table is a no-op. When the field list is
    /// missing the caller must fetch it and hand the result to
    /// [`apply_fetched_fields`](Self::apply_fetched_fields).
    pub fn select_table(&mut self, name: &str) -> CoreResult<SelectAction> {
        let table = self
            .table(name)
            .ok_or_else(|| CoreError::TableNotFound(name.to_string()))?;

        if self.selected_table.as_deref() == Some(name) {
            return Ok(SelectAction::AlreadySelected);
        }

        let action = if table.fields_loaded() {
            SelectAction::Ready
        } else {
            SelectAction::FetchNeeded
        };
        self.selected_table = Some(name.to_string());
        Ok(action)
    }

    /// Attach a completed field fetch to the table that requested it.
    ///
    /// The response is applied only when `table_name` still matches the
    /// active selection and the field list is still missing; anything else is
    /// a superseded request and is dropped silently.
    ///
    /// Top-level selection from the catalog stays authoritative: a table the
    /// catalog marked selected keeps that flag even if none of the fetched
    /// fields carry a selection.
    pub fn apply_fetched_fields(
        &mut self,
        table_name: &str,
        entries: Vec<FieldEntry>,
    ) -> FieldFetchOutcome {
        if self.selected_table.as_deref() != Some(table_name) {
            log::debug!("Dropping stale field response for {table_name}");
            return FieldFetchOutcome::Stale;
        }
        let Some(table) = self.tables.iter_mut().find(|t| t.name == table_name) else {
            return FieldFetchOutcome::Stale;
        };
        if table.fields_loaded() {
            log::debug!("Dropping duplicate field response for {table_name}");
            return FieldFetchOutcome::Stale;
        }

        table.fields = Some(entries.into_iter().map(Field::from).collect());
        FieldFetchOutcome::Applied
    }

    /// Undo the selection made for a fetch that failed.
    ///
    /// Restores `previous` as the active table, but only when the failed
    /// table is still selected — a newer selection wins. The field list stays
    /// unset so a later [`select_table`](Self::select_table) retries.
    pub(crate) fn revert_selection(&mut self, failed_table: &str, previous: Option<String>) {
        if self.selected_table.as_deref() == Some(failed_table) {
            self.selected_table = previous;
        }
    }

    /// Flip one field of the selected table.
    ///
    /// Marks the owning table dirty. Selecting a field forces the table
    /// selected; deselecting recomputes the table as the OR over all fields.
    /// Parent state is always recomputed from the children, never the other
    /// way around.
    pub fn toggle_field(&mut self, field_name: &str) -> CoreResult<()> {
        let selected_name = self
            .selected_table
            .clone()
            .ok_or(CoreError::NoTableSelected)?;
        let table = self
            .tables
            .iter_mut()
            .find(|t| t.name == selected_name)
            .ok_or_else(|| CoreError::TableNotFound(selected_name.clone()))?;
        let fields = table
            .fields
            .as_mut()
            .ok_or_else(|| CoreError::FieldsNotLoaded(selected_name.clone()))?;
        let field = fields
            .iter_mut()
            .find(|f| f.name == field_name)
            .ok_or_else(|| CoreError::FieldNotFound(field_name.to_string()))?;

        field.selected = !field.selected;
        table.dirty = true;
        if field.selected {
            table.selected = true;
        } else {
            table.selected = table.any_field_selected();
        }
        Ok(())
    }

    /// Flip a table's selection top-down.
    ///
    /// No-op when the table is currently unselected: this path can only turn
    /// a table *off*. Requires the field list to be loaded (the service layer
    /// runs the lazy fetch first). Returns whether anything changed.
    pub fn toggle_table(&mut self, name: &str) -> CoreResult<bool> {
        let table = self
            .tables
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| CoreError::TableNotFound(name.to_string()))?;

        if !table.selected {
            return Ok(false);
        }
        let fields = table
            .fields
            .as_mut()
            .ok_or_else(|| CoreError::FieldsNotLoaded(name.to_string()))?;

        table.selected = !table.selected;
        table.dirty = true;
        // The one place where parent state overwrites the children.
        for field in fields {
            field.selected = table.selected;
        }
        Ok(true)
    }

    /// Select a table together with every one of its fields.
    ///
    /// The sanctioned way to turn a whole table on. Requires the field list
    /// to be loaded.
    pub fn select_all_fields(&mut self, name: &str) -> CoreResult<()> {
        let table = self
            .tables
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| CoreError::TableNotFound(name.to_string()))?;
        let fields = table
            .fields
            .as_mut()
            .ok_or_else(|| CoreError::FieldsNotLoaded(name.to_string()))?;

        table.selected = true;
        table.dirty = true;
        for field in fields {
            field.selected = true;
        }
        Ok(())
    }

    /// Snapshot every dirty table with its current field selection state.
    ///
    /// Read-only; safe to call repeatedly while editing continues.
    #[must_use]
    pub fn collect_changes(&self) -> Vec<TableChange> {
        self.tables
            .iter()
            .filter(|t| t.dirty)
            .map(|t| TableChange {
                name: t.name.clone(),
                selected: t.selected,
                dirty: true,
                fields: t
                    .fields
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(|f| FieldChange {
                        name: f.name.clone(),
                        type_name: f.type_name.clone(),
                        length: f.length,
                        selected: f.selected,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Clear dirty flags for a successfully saved snapshot.
    ///
    /// Operates on the snapshot it is given, not on the whole tree: a table
    /// whose current state no longer matches its snapshot entry was modified
    /// while the save was in flight and stays dirty.
    pub fn commit(&mut self, changes: &[TableChange]) {
        for change in changes {
            if let Some(table) = self.tables.iter_mut().find(|t| t.name == change.name) {
                if table_matches_change(table, change) {
                    table.dirty = false;
                }
            }
        }
    }
}

/// Whether a table's current selection state equals its snapshot entry.
fn table_matches_change(table: &Table, change: &TableChange) -> bool {
    if table.selected != change.selected {
        return false;
    }
    let fields = table.fields.as_deref().unwrap_or_default();
    fields.len() == change.fields.len()
        && fields
            .iter()
            .zip(&change.fields)
            .all(|(f, c)| f.name == c.name && f.selected == c.selected)
}
