//! `SchemaConnector` trait 实现

use async_trait::async_trait;

use crate::error::{ConnectorError, Result};
use crate::traits::SchemaConnector;
use crate::types::{CatalogEntry, FieldEntry, TableChange};

use super::{
    CATALOG_PATH, CatalogRequest, EnvRef, FIELDS_PATH, FieldsRequest, RestConnector, SAVE_PATH,
    SaveRequest, SobjectRef, TEST_ENV_PATH,
};

#[async_trait]
impl SchemaConnector for RestConnector {
    fn environment_id(&self) -> &str {
        &self.environment_id
    }

    async fn validate_connection(&self) -> Result<bool> {
        let body = CatalogRequest {
            db: EnvRef {
                dbname: &self.environment_id,
            },
        };
        match self.post_unit(TEST_ENV_PATH, &body).await {
            Ok(()) => Ok(true),
            // An explicit rejection means "reachable but not usable".
            Err(ConnectorError::Rejected { message, .. }) => {
                log::warn!("Connection test rejected for {}: {message}", self.environment_id);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>> {
        let body = CatalogRequest {
            db: EnvRef {
                dbname: &self.environment_id,
            },
        };
        self.post(CATALOG_PATH, &body).await
    }

    async fn fetch_fields(&self, table_name: &str) -> Result<Vec<FieldEntry>> {
        let body = FieldsRequest {
            db: EnvRef {
                dbname: &self.environment_id,
            },
            sobject: SobjectRef {
                sobject: table_name,
            },
        };
        self.post(FIELDS_PATH, &body).await
    }

    async fn save_changes(&self, changes: &[TableChange]) -> Result<()> {
        let body = SaveRequest {
            db: EnvRef {
                dbname: &self.environment_id,
            },
            changes,
        };
        self.post_unit(SAVE_PATH, &body).await
    }
}
