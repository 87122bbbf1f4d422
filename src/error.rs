use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch sheet data: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Failed to serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),

    // Non-success HTTP responses from a published sheet endpoint
    #[error("Sheet endpoint returned HTTP {status} {reason} (URL: {url})")]
    HttpStatus {
        status: u16,
        reason: String,
        url: String,
    },

    // Network-specific errors
    #[error("Network timeout while fetching sheet from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an error for a non-success HTTP status
    pub fn http_status(status: u16, reason: impl Into<String>, url: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            reason: reason.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// True when the request never produced an HTTP response.
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            AppError::Fetch(_) | AppError::NetworkTimeout { .. } | AppError::NetworkConnection { .. }
        )
    }

    /// True when the endpoint answered with a non-success status.
    pub fn is_http_error(&self) -> bool {
        matches!(self, AppError::HttpStatus { .. })
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::HttpStatus { status, .. } => Some(*status),
            AppError::Fetch(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
