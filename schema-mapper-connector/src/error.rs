use serde::{Deserialize, Serialize};

/// Unified error type for all schema connector operations.
///
/// Each variant carries an `environment` field identifying which environment the
/// failing request was addressed to. All variants are serializable for
/// structured error reporting.
///
/// Two broad classes exist: transport failures ([`Transport`](Self::Transport),
/// [`Timeout`](Self::Timeout), [`Parse`](Self::Parse)) where the exchange never
/// completed cleanly, and [`Rejected`](Self::Rejected) where the backend
/// answered and reported a failure of its own. Connectors perform no retries;
/// callers surface the error and leave their state untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ConnectorError {
    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, broken pipe, etc.).
    Transport {
        /// Environment the request was addressed to.
        environment: String,
        /// Error details.
        detail: String,
    },

    /// The request timed out before a response arrived.
    Timeout {
        /// Environment the request was addressed to.
        environment: String,
        /// Error details.
        detail: String,
    },

    /// The backend's response could not be decoded.
    Parse {
        /// Environment the request was addressed to.
        environment: String,
        /// Details about the decode failure.
        detail: String,
    },

    /// The backend completed the exchange but reported a failure.
    ///
    /// Corresponds to a `success: false` envelope; `kind` carries the backend's
    /// error classification string when it supplied one.
    Rejected {
        /// Environment the request was addressed to.
        environment: String,
        /// Backend error classification, if available.
        kind: Option<String>,
        /// Human-readable message from the backend.
        message: String,
    },
}

impl ConnectorError {
    /// 是否为预期行为（后端明确拒绝等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl std::fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport {
                environment,
                detail,
            } => {
                write!(f, "[{environment}] Transport error: {detail}")
            }
            Self::Timeout {
                environment,
                detail,
            } => {
                write!(f, "[{environment}] Request timeout: {detail}")
            }
            Self::Parse {
                environment,
                detail,
            } => {
                write!(f, "[{environment}] Parse error: {detail}")
            }
            Self::Rejected {
                environment,
                kind,
                message,
            } => {
                if let Some(kind) = kind {
                    write!(f, "[{environment}] {kind}: {message}")
                } else {
                    write!(f, "[{environment}] {message}")
                }
            }
        }
    }
}

impl std::error::Error for ConnectorError {}

/// Convenience type alias for `Result<T, ConnectorError>`.
pub type Result<T> = std::result::Result<T, ConnectorError>;
