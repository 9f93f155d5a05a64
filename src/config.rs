//! Command-line and environment configuration.

use crate::error::{ExporterError, Result};
use crate::web::WebConfig;
use crate::{DEFAULT_TIMEOUT_MS, DEFAULT_WEB_ADDR, DEFAULT_WEB_PATH};
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Flags accepted by the exporter. Every flag can also be set through the
/// environment variable named next to it.
#[derive(Debug, Clone, Parser)]
#[command(name = "digitalocean_exporter")]
#[command(about = "Prometheus exporter for DigitalOcean account inventory")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct ExporterConfig {
    /// Enable debug logging
    #[arg(long, env = "DEBUG")]
    pub debug: bool,

    /// DigitalOcean API token
    #[arg(long, env = "DIGITALOCEAN_TOKEN", hide_env_values = true, default_value = "")]
    pub digitalocean_token: String,

    /// Timeout for each collector's API calls, in milliseconds
    #[arg(long, env = "HTTP_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub http_timeout: u64,

    /// Address to listen on for the web interface
    #[arg(long, env = "WEB_ADDR", default_value = DEFAULT_WEB_ADDR)]
    pub web_addr: String,

    /// Path under which metrics are exposed
    #[arg(long, env = "WEB_PATH", default_value = DEFAULT_WEB_PATH)]
    pub web_path: String,
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub token: String,
    pub timeout: Duration,
    pub web: WebConfig,
    pub debug: bool,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<Settings> {
        let token = self.digitalocean_token.trim();
        if token.is_empty() {
            return Err(ExporterError::config_error(
                "a DigitalOcean API token is required (--digitalocean-token or DIGITALOCEAN_TOKEN)",
            ));
        }
        if self.http_timeout == 0 {
            return Err(ExporterError::config_error("http timeout must be positive"));
        }

        let listen_addr = parse_listen_addr(&self.web_addr)?;
        let web = WebConfig::new(listen_addr, self.web_path.clone())?;

        Ok(Settings {
            token: token.to_string(),
            timeout: Duration::from_millis(self.http_timeout),
            web,
            debug: self.debug,
        })
    }
}

/// Parse a listen address, accepting a bare `:port` for all interfaces.
pub fn parse_listen_addr(addr: &str) -> Result<SocketAddr> {
    if let Some(port) = addr.strip_prefix(':') {
        let port = port
            .parse::<u16>()
            .map_err(|e| ExporterError::config_error(format!("invalid port in {}: {}", addr, e)))?;
        return Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port));
    }

    addr.parse::<SocketAddr>()
        .map_err(|e| ExporterError::config_error(format!("invalid listen address {}: {}", addr, e)))
}
