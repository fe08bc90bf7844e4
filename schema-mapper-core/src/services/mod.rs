//! 业务逻辑服务层

mod environment_service;
mod mapping_service;

pub use environment_service::EnvironmentService;
pub use mapping_service::MappingService;

use std::sync::Arc;

use schema_mapper_connector::{ConnectorError, SchemaConnector};

use crate::error::{CoreError, CoreResult};
use crate::traits::{ConnectorRegistry, EnvironmentRepository};

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的实现。
pub struct ServiceContext {
    /// 环境仓库
    pub environment_repository: Arc<dyn EnvironmentRepository>,
    /// Connector 注册表
    pub connector_registry: Arc<dyn ConnectorRegistry>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        environment_repository: Arc<dyn EnvironmentRepository>,
        connector_registry: Arc<dyn ConnectorRegistry>,
    ) -> Self {
        Self {
            environment_repository,
            connector_registry,
        }
    }

    /// 获取 Connector 实例
    pub async fn get_connector(
        &self,
        environment_id: &str,
    ) -> CoreResult<Arc<dyn SchemaConnector>> {
        self.connector_registry
            .get(environment_id)
            .await
            .ok_or_else(|| CoreError::EnvironmentNotFound(environment_id.to_string()))
    }

    /// 处理 Connector 错误并按预期/非预期分级记录日志
    pub fn handle_connector_error(&self, err: ConnectorError) -> CoreError {
        if err.is_expected() {
            log::warn!("Connector request failed: {err}");
        } else {
            log::error!("Connector request failed: {err}");
        }
        CoreError::Connector(err)
    }
}
