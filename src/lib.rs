//! # DigitalOcean Exporter
//!
//! A Prometheus exporter for the inventory of a DigitalOcean account:
//! droplets, volumes, load balancers, domains and their records, private
//! images, SSH keys, snapshots, floating IPs and account limits.
//!
//! Every scrape runs all registered collectors concurrently against the
//! DigitalOcean API. A collector that fails or runs past its timeout
//! contributes no series for that scrape; the others are unaffected.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use digitalocean_exporter::{
//!     collectors, start_web_server, BuildInfo, DigitalOceanClient, Registry, WebConfig,
//!     START_TIME,
//! };
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = Arc::new(DigitalOceanClient::new("token")?);
//!     let mut registry = Registry::new();
//!     collectors::register_all(
//!         &mut registry,
//!         api,
//!         Duration::from_secs(5),
//!         BuildInfo::current(),
//!         *START_TIME,
//!     )?;
//!
//!     start_web_server(WebConfig::default(), Arc::new(registry)).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod collectors;
pub mod config;
pub mod error;
pub mod metrics;
pub mod web;

// Re-export public API
pub use api::{CloudApi, DigitalOceanClient};
pub use collectors::{register_all, BuildInfo};
pub use config::{ExporterConfig, Settings};
pub use error::{ExporterError, Result};
pub use metrics::{Collector, MetricDesc, Observation, Registry};
pub use web::{create_app, start_web_server, WebConfig};

use chrono::{DateTime, Utc};

/// Prefix shared by every exported metric name
pub const NAMESPACE: &str = "digitalocean";

/// Default per-collector API timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default listen address
pub const DEFAULT_WEB_ADDR: &str = ":9212";

/// Default path for the metric exposition
pub const DEFAULT_WEB_PATH: &str = "/metrics";

lazy_static::lazy_static! {
    /// Wall-clock time the process started, captured on first access.
    pub static ref START_TIME: DateTime<Utc> = Utc::now();
}
