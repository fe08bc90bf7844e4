//! REST connector for the mapping service JSON protocol.

mod connector;
mod http;
mod types;

use std::time::Duration;

use reqwest::Client;

pub(crate) use types::{CatalogRequest, EnvRef, FieldsRequest, SaveRequest, SobjectRef};

pub(crate) const CATALOG_PATH: &str = "/services/catalog";
pub(crate) const FIELDS_PATH: &str = "/services/sobject";
pub(crate) const SAVE_PATH: &str = "/services/save";
pub(crate) const TEST_ENV_PATH: &str = "/services/testEnv";

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connector speaking the mapping service's HTTP/JSON protocol.
///
/// Every endpoint is a POST exchanging JSON bodies wrapped in
/// [`ServiceEnvelope`](crate::types::ServiceEnvelope).
pub struct RestConnector {
    pub(crate) client: Client,
    pub(crate) environment_id: String,
    pub(crate) base_url: String,
}

impl RestConnector {
    /// Create a connector bound to one environment.
    ///
    /// `base_url` is the service root without a trailing slash
    /// (e.g. `http://localhost:5000`).
    #[must_use]
    pub fn new(environment_id: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: create_http_client(),
            environment_id: environment_id.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// 创建带超时配置的 HTTP Client
fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}
