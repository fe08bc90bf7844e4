//! Environment persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Environment;

/// Read access to the configured environments.
///
/// Environment creation and editing happen outside the core; the services
/// only need to list environments and resolve one by id.
#[async_trait]
pub trait EnvironmentRepository: Send + Sync {
    /// Get all configured environments
    async fn find_all(&self) -> CoreResult<Vec<Environment>>;

    /// Get an environment based on its id
    ///
    /// # Arguments
    /// * `id` - Environment id
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Environment>>;
}
