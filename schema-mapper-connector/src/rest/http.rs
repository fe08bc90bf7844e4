//! HTTP 请求方法与信封解码

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ConnectorError, Result};
use crate::types::ServiceEnvelope;

use super::RestConnector;

impl RestConnector {
    /// 执行 POST 请求并解包响应信封
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let envelope: ServiceEnvelope<T> = self.post_envelope(path, body).await?;

        if !envelope.success {
            return Err(self.rejected(envelope.kind, envelope.message));
        }

        envelope
            .payload
            .ok_or_else(|| self.parse_error("payload missing from response"))
    }

    /// 执行 POST 请求，仅检查信封状态（无 payload 的端点）
    pub(crate) async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let envelope: ServiceEnvelope<serde_json::Value> = self.post_envelope(path, body).await?;

        if !envelope.success {
            return Err(self.rejected(envelope.kind, envelope.message));
        }

        Ok(())
    }

    async fn post_envelope<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ServiceEnvelope<T>> {
        let url = format!("{}{path}", self.base_url);
        log::debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.request_error(&e))?;

        let status = response.status();
        log::debug!("Response Status: {status}");

        let response_text = response
            .text()
            .await
            .map_err(|e| self.transport_error(format!("failed to read response: {e}")))?;

        log::debug!("Response Body: {response_text}");

        serde_json::from_str(&response_text).map_err(|e| {
            log::error!("JSON decode failed: {e}");
            log::error!("Raw response: {response_text}");
            self.parse_error(e)
        })
    }

    fn request_error(&self, e: &reqwest::Error) -> ConnectorError {
        if e.is_timeout() {
            ConnectorError::Timeout {
                environment: self.environment_id.clone(),
                detail: e.to_string(),
            }
        } else {
            ConnectorError::Transport {
                environment: self.environment_id.clone(),
                detail: e.to_string(),
            }
        }
    }

    fn transport_error(&self, detail: impl Into<String>) -> ConnectorError {
        ConnectorError::Transport {
            environment: self.environment_id.clone(),
            detail: detail.into(),
        }
    }

    fn parse_error(&self, detail: impl ToString) -> ConnectorError {
        ConnectorError::Parse {
            environment: self.environment_id.clone(),
            detail: detail.to_string(),
        }
    }

    fn rejected(&self, kind: Option<String>, message: Option<String>) -> ConnectorError {
        let message = message.unwrap_or_else(|| "Unknown error".to_string());
        log::warn!("Backend rejected request: {message}");
        ConnectorError::Rejected {
            environment: self.environment_id.clone(),
            kind,
            message,
        }
    }
}
