//! 平台抽象 Trait 模块

mod connector_registry;
mod environment_repository;

pub use connector_registry::{ConnectorRegistry, InMemoryConnectorRegistry};
pub use environment_repository::EnvironmentRepository;
