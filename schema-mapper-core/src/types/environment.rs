//! 环境相关类型定义

use serde::{Deserialize, Serialize};

/// A configured remote data environment.
///
/// Environments are managed elsewhere; the core only reads them to resolve
/// connectors and display the picker list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    /// Environment identifier (the backend's database name).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login URL of the remote API.
    #[serde(rename = "authUrl")]
    pub auth_url: String,
    /// Login user for the remote API.
    pub login: String,
}
