//! Error handling for the DigitalOcean exporter.

use std::time::Duration;

/// A specialized `Result` type for exporter operations.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// The main error type for the exporter.
#[derive(Debug, thiserror::Error)]
pub enum ExporterError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The DigitalOcean API answered with a non-success status
    #[error("API error: status={status}, id={id}, message={message}")]
    Api {
        status: u16,
        id: String,
        message: String,
    },

    /// HTTP transport failed before a response was received
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A listing kept advertising more pages past the page limit
    #[error("Pagination error: {0}")]
    Pagination(String),

    /// The per-scrape deadline elapsed
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// A metric descriptor was malformed
    #[error("Descriptor error: {0}")]
    Descriptor(#[from] prometheus::Error),

    /// Collector registration was rejected
    #[error("Registration error: {0}")]
    Registration(String),

    /// Exposition encoding failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// Web server error
    #[error("Web server error: {0}")]
    WebServer(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExporterError {
    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new API error
    pub fn api_error(status: u16, id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create a new pagination error
    pub fn pagination_error(msg: impl Into<String>) -> Self {
        Self::Pagination(msg.into())
    }

    /// Create a new registration error
    pub fn registration_error(msg: impl Into<String>) -> Self {
        Self::Registration(msg.into())
    }

    /// Create a new encode error
    pub fn encode_error(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Create a new web server error
    pub fn web_server_error(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }

    /// Whether the error came from the per-scrape deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
