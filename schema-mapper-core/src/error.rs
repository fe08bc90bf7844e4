//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use schema_mapper_connector::ConnectorError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Environment not found
    #[error("Environment not found: {0}")]
    EnvironmentNotFound(String),

    /// Table (sobject) not found in the loaded catalog
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Field not found within the selected table
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// No environment has been opened yet
    #[error("No environment is open")]
    NoEnvironmentOpen,

    /// No table is currently selected
    #[error("No table is selected")]
    NoTableSelected,

    /// The table's field list has not been fetched yet
    #[error("Fields not loaded for table: {0}")]
    FieldsNotLoaded(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Connector error (converted from library)
    #[error("{0}")]
    Connector(#[from] ConnectorError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist,
    /// etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::EnvironmentNotFound(_)
            | Self::TableNotFound(_)
            | Self::FieldNotFound(_)
            | Self::NoEnvironmentOpen
            | Self::NoTableSelected
            | Self::FieldsNotLoaded(_) => true,
            Self::Connector(e) => e.is_expected(),
            Self::StorageError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
