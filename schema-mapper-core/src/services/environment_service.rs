//! 环境列表与连接测试服务

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::Environment;

/// Environment listing and connection testing.
pub struct EnvironmentService {
    ctx: Arc<ServiceContext>,
}

impl EnvironmentService {
    /// 创建环境服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 列出所有已配置的环境
    pub async fn list_environments(&self) -> CoreResult<Vec<Environment>> {
        self.ctx.environment_repository.find_all().await
    }

    /// 测试单个环境的连通性
    pub async fn test_connection(&self, environment_id: &str) -> CoreResult<bool> {
        let connector = self.ctx.get_connector(environment_id).await?;
        match connector.validate_connection().await {
            Ok(ok) => Ok(ok),
            Err(e) => Err(self.ctx.handle_connector_error(e)),
        }
    }

    /// 并行测试所有已注册环境的连通性
    pub async fn test_all_connections(&self) -> Vec<(String, CoreResult<bool>)> {
        let ids = self.ctx.connector_registry.list_environment_ids().await;

        let futures: Vec<_> = ids
            .into_iter()
            .map(|id| async move {
                let result = self.test_connection(&id).await;
                (id, result)
            })
            .collect();

        futures::future::join_all(futures).await
    }
}
