use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CatalogEntry, FieldEntry, TableChange};

/// Client-side view of one remote data environment.
///
/// One connector instance is bound to one environment for its whole lifetime;
/// the core layer keeps a registry of them keyed by environment id. All
/// operations are plain request/response exchanges with no retry logic —
/// failures are surfaced unchanged so the caller can keep its state intact.
#[async_trait]
pub trait SchemaConnector: Send + Sync {
    /// Identifier of the environment this connector is bound to.
    fn environment_id(&self) -> &str;

    /// Check that the environment is reachable and the stored credentials work.
    async fn validate_connection(&self) -> Result<bool>;

    /// Fetch the environment's table catalog.
    ///
    /// Returns every table with the selection state recorded by the last
    /// successful save, but without field definitions.
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>>;

    /// Fetch the field definitions of one table.
    ///
    /// Returns type tags, lengths and prior selection state.
    async fn fetch_fields(&self, table_name: &str) -> Result<Vec<FieldEntry>>;

    /// Persist a changeset of dirty tables.
    ///
    /// The backend applies the whole changeset or none of it; a failed save
    /// must not leave a partial mapping behind.
    async fn save_changes(&self, changes: &[TableChange]) -> Result<()>;
}
