//! 类型定义模块

mod environment;
mod schema;
mod selection;

pub use environment::Environment;
pub use schema::{Field, Table};
pub use selection::{FieldFetchOutcome, SelectAction, SelectionTree};

// Re-export connector 库的公共类型
pub use schema_mapper_connector::{CatalogEntry, FieldChange, FieldEntry, TableChange};
