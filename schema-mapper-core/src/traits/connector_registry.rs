//! Connector registry abstract Trait

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use schema_mapper_connector::SchemaConnector;

/// Connector Registry Trait
///
/// Manages all live connector instances, indexed by environment id.
/// Provides a default memory implementation, `InMemoryConnectorRegistry`.
#[async_trait]
pub trait ConnectorRegistry: Send + Sync {
    /// Register a connector instance
    ///
    /// # Arguments
    /// * `environment_id` - Environment id
    /// * `connector` - Connector instance
    async fn register(&self, environment_id: String, connector: Arc<dyn SchemaConnector>);

    /// Remove a connector
    ///
    /// # Arguments
    /// * `environment_id` - Environment id
    async fn unregister(&self, environment_id: &str);

    /// Get a connector instance
    ///
    /// # Arguments
    /// * `environment_id` - Environment id
    async fn get(&self, environment_id: &str) -> Option<Arc<dyn SchemaConnector>>;

    /// List all registered environment ids
    async fn list_environment_ids(&self) -> Vec<String>;
}

/// In-memory connector registry
///
/// Default implementation, available on all platforms.
#[derive(Clone)]
pub struct InMemoryConnectorRegistry {
    connectors: Arc<RwLock<HashMap<String, Arc<dyn SchemaConnector>>>>,
}

impl InMemoryConnectorRegistry {
    /// Create a new memory registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryConnectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectorRegistry for InMemoryConnectorRegistry {
    async fn register(&self, environment_id: String, connector: Arc<dyn SchemaConnector>) {
        self.connectors.write().await.insert(environment_id, connector);
    }

    async fn unregister(&self, environment_id: &str) {
        self.connectors.write().await.remove(environment_id);
    }

    async fn get(&self, environment_id: &str) -> Option<Arc<dyn SchemaConnector>> {
        self.connectors.read().await.get(environment_id).cloned()
    }

    async fn list_environment_ids(&self) -> Vec<String> {
        self.connectors.read().await.keys().cloned().collect()
    }
}
