//! Web server configuration.

use crate::error::{ExporterError, Result};
use std::net::SocketAddr;

/// Configuration for the web server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    /// Address to bind the listener to
    pub listen_addr: SocketAddr,
    /// Path serving the metric exposition
    pub metrics_path: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 9212)),
            metrics_path: crate::DEFAULT_WEB_PATH.to_string(),
        }
    }
}

impl WebConfig {
    /// Create a web configuration, checking that the metrics path can be routed.
    pub fn new(listen_addr: SocketAddr, metrics_path: impl Into<String>) -> Result<Self> {
        let metrics_path = metrics_path.into();
        if !metrics_path.starts_with('/') {
            return Err(ExporterError::config_error(format!(
                "web path {} must start with /",
                metrics_path
            )));
        }
        if metrics_path == "/" {
            return Err(ExporterError::config_error(
                "web path / is reserved for the landing page",
            ));
        }

        Ok(Self {
            listen_addr,
            metrics_path,
        })
    }

    /// Set the listen address.
    pub fn with_listen_addr(mut self, listen_addr: SocketAddr) -> Self {
        self.listen_addr = listen_addr;
        self
    }
}
