//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use schema_mapper_connector::{
    CatalogEntry, ConnectorError, FieldEntry, SchemaConnector, TableChange,
};
use tokio::sync::{RwLock, Semaphore};

use crate::error::CoreResult;
use crate::services::{MappingService, ServiceContext};
use crate::traits::{ConnectorRegistry, EnvironmentRepository, InMemoryConnectorRegistry};
use crate::types::Environment;

// ===== MockSchemaConnector =====

/// Scriptable in-memory backend.
///
/// Counts every fetch, records every save payload, and supports error
/// injection plus semaphore gates to park a request mid-flight.
pub struct MockSchemaConnector {
    environment_id: String,
    catalog: RwLock<Vec<CatalogEntry>>,
    fields: RwLock<HashMap<String, Vec<FieldEntry>>>,
    connection_ok: RwLock<bool>,
    /// 如果 Some，fetch_fields 时返回此错误
    fields_error: RwLock<Option<ConnectorError>>,
    /// 如果 Some，save_changes 时返回此错误
    save_error: RwLock<Option<ConnectorError>>,
    catalog_calls: RwLock<usize>,
    fields_calls: RwLock<HashMap<String, usize>>,
    save_calls: RwLock<usize>,
    saved: RwLock<Vec<Vec<TableChange>>>,
    gated_fields: RwLock<HashSet<String>>,
    field_gate: Semaphore,
    saves_gated: RwLock<bool>,
    save_gate: Semaphore,
}

impl MockSchemaConnector {
    pub fn new(environment_id: &str) -> Self {
        Self {
            environment_id: environment_id.to_string(),
            catalog: RwLock::new(Vec::new()),
            fields: RwLock::new(HashMap::new()),
            connection_ok: RwLock::new(true),
            fields_error: RwLock::new(None),
            save_error: RwLock::new(None),
            catalog_calls: RwLock::new(0),
            fields_calls: RwLock::new(HashMap::new()),
            save_calls: RwLock::new(0),
            saved: RwLock::new(Vec::new()),
            gated_fields: RwLock::new(HashSet::new()),
            field_gate: Semaphore::new(0),
            saves_gated: RwLock::new(false),
            save_gate: Semaphore::new(0),
        }
    }

    pub async fn set_catalog(&self, catalog: Vec<CatalogEntry>) {
        *self.catalog.write().await = catalog;
    }

    pub async fn set_fields(&self, table_name: &str, fields: Vec<FieldEntry>) {
        self.fields
            .write()
            .await
            .insert(table_name.to_string(), fields);
    }

    pub async fn set_connection_ok(&self, ok: bool) {
        *self.connection_ok.write().await = ok;
    }

    pub async fn set_fields_error(&self, err: Option<ConnectorError>) {
        *self.fields_error.write().await = err;
    }

    pub async fn set_save_error(&self, err: Option<ConnectorError>) {
        *self.save_error.write().await = err;
    }

    /// Park the next `fetch_fields` for `table_name` until
    /// [`release_field_fetch`](Self::release_field_fetch).
    pub async fn gate_field_fetch(&self, table_name: &str) {
        self.gated_fields
            .write()
            .await
            .insert(table_name.to_string());
    }

    pub fn release_field_fetch(&self) {
        self.field_gate.add_permits(1);
    }

    /// Park every save until [`release_saves`](Self::release_saves).
    pub async fn gate_saves(&self) {
        *self.saves_gated.write().await = true;
    }

    pub fn release_saves(&self) {
        self.save_gate.add_permits(1);
    }

    pub async fn catalog_fetch_count(&self) -> usize {
        *self.catalog_calls.read().await
    }

    pub async fn fields_fetch_count(&self, table_name: &str) -> usize {
        self.fields_calls
            .read()
            .await
            .get(table_name)
            .copied()
            .unwrap_or(0)
    }

    pub async fn save_count(&self) -> usize {
        *self.save_calls.read().await
    }

    pub async fn saved_changesets(&self) -> Vec<Vec<TableChange>> {
        self.saved.read().await.clone()
    }

    fn rejected(&self, message: &str) -> ConnectorError {
        ConnectorError::Rejected {
            environment: self.environment_id.clone(),
            kind: None,
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl SchemaConnector for MockSchemaConnector {
    fn environment_id(&self) -> &str {
        &self.environment_id
    }

    async fn validate_connection(&self) -> Result<bool, ConnectorError> {
        Ok(*self.connection_ok.read().await)
    }

    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, ConnectorError> {
        *self.catalog_calls.write().await += 1;
        Ok(self.catalog.read().await.clone())
    }

    async fn fetch_fields(&self, table_name: &str) -> Result<Vec<FieldEntry>, ConnectorError> {
        *self
            .fields_calls
            .write()
            .await
            .entry(table_name.to_string())
            .or_insert(0) += 1;

        if self.gated_fields.read().await.contains(table_name) {
            drop(self.field_gate.acquire().await.unwrap());
        }

        if let Some(err) = self.fields_error.read().await.clone() {
            return Err(err);
        }

        self.fields
            .read()
            .await
            .get(table_name)
            .cloned()
            .ok_or_else(|| self.rejected(&format!("no such sobject: {table_name}")))
    }

    async fn save_changes(&self, changes: &[TableChange]) -> Result<(), ConnectorError> {
        *self.save_calls.write().await += 1;

        if *self.saves_gated.read().await {
            drop(self.save_gate.acquire().await.unwrap());
        }

        if let Some(err) = self.save_error.read().await.clone() {
            return Err(err);
        }

        self.saved.write().await.push(changes.to_vec());
        Ok(())
    }
}

// ===== MockEnvironmentRepository =====

pub struct MockEnvironmentRepository {
    environments: RwLock<HashMap<String, Environment>>,
}

impl MockEnvironmentRepository {
    pub fn new() -> Self {
        Self {
            environments: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, environment: Environment) {
        self.environments
            .write()
            .await
            .insert(environment.id.clone(), environment);
    }
}

#[async_trait]
impl EnvironmentRepository for MockEnvironmentRepository {
    async fn find_all(&self) -> CoreResult<Vec<Environment>> {
        Ok(self.environments.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Environment>> {
        Ok(self.environments.read().await.get(id).cloned())
    }
}

// ===== 工厂方法 =====

pub fn catalog_entry(name: &str, selected: bool) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        table_name: selected.then(|| name.to_lowercase()),
        selected,
    }
}

pub fn field_entry(name: &str, type_name: &str, selected: bool) -> FieldEntry {
    FieldEntry {
        name: name.to_string(),
        db_name: selected.then(|| name.to_lowercase()),
        type_name: type_name.to_string(),
        length: if type_name == "string" { 80 } else { 0 },
        selected,
    }
}

pub fn test_environment() -> Environment {
    Environment {
        id: "fte0".to_string(),
        name: "FTE Sandbox".to_string(),
        auth_url: "https://test.salesforce.com".to_string(),
        login: "mapper@example.com.fte0".to_string(),
    }
}

/// 创建测试用 `ServiceContext`
///
/// One environment ("fte0") with a two-table catalog: `Account` (unmapped,
/// fields `Name`/`Email`) and `Contact` (mapped and selected, fields
/// `FirstName`/`LastName` both selected).
pub async fn create_test_mapping_setup() -> (
    Arc<ServiceContext>,
    Arc<MockSchemaConnector>,
    Arc<MockEnvironmentRepository>,
) {
    let environment_repo = Arc::new(MockEnvironmentRepository::new());
    environment_repo.insert(test_environment()).await;

    let connector = Arc::new(MockSchemaConnector::new("fte0"));
    connector
        .set_catalog(vec![
            catalog_entry("Account", false),
            catalog_entry("Contact", true),
        ])
        .await;
    connector
        .set_fields(
            "Account",
            vec![
                field_entry("Name", "string", false),
                field_entry("Email", "string", false),
            ],
        )
        .await;
    connector
        .set_fields(
            "Contact",
            vec![
                field_entry("FirstName", "string", true),
                field_entry("LastName", "string", true),
            ],
        )
        .await;

    let connector_registry = Arc::new(InMemoryConnectorRegistry::new());
    connector_registry
        .register("fte0".to_string(), connector.clone())
        .await;

    let ctx = Arc::new(ServiceContext::new(environment_repo.clone(), connector_registry));

    (ctx, connector, environment_repo)
}

/// 创建测试用 `MappingService`
pub async fn create_test_mapping_service() -> (Arc<MappingService>, Arc<MockSchemaConnector>) {
    let (ctx, connector, _) = create_test_mapping_setup().await;
    (Arc::new(MappingService::new(ctx)), connector)
}
