//! The exporter's own build metadata and uptime.

use crate::error::Result;
use crate::metrics::{Collector, MetricDesc, Observation};
use chrono::{DateTime, Utc};
use std::sync::Arc;

const NAME: &str = "exporter";

/// Version metadata baked in at compile time.
///
/// Revision and build date come from the `DIGITALOCEAN_EXPORTER_REVISION`
/// and `DIGITALOCEAN_EXPORTER_BUILD_DATE` environment variables at build
/// time and read "unknown" when unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: String,
    pub revision: String,
    pub build_date: String,
    pub rust_version: String,
}

impl BuildInfo {
    /// Build metadata of the running binary.
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            revision: option_env!("DIGITALOCEAN_EXPORTER_REVISION")
                .unwrap_or("unknown")
                .to_string(),
            build_date: option_env!("DIGITALOCEAN_EXPORTER_BUILD_DATE")
                .unwrap_or("unknown")
                .to_string(),
            rust_version: option_env!("CARGO_PKG_RUST_VERSION")
                .filter(|v| !v.is_empty())
                .unwrap_or("unknown")
                .to_string(),
        }
    }
}

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Exposes the exporter's build metadata, start time and uptime.
pub struct ExporterCollector {
    build: BuildInfo,
    start_time: DateTime<Utc>,
    clock: Clock,

    build_info: Arc<MetricDesc>,
    start_time_desc: Arc<MetricDesc>,
    uptime: Arc<MetricDesc>,
}

impl ExporterCollector {
    /// Create a new collector reporting uptime against `start_time`.
    pub fn new(build: BuildInfo, start_time: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            build,
            start_time,
            clock: Arc::new(Utc::now),
            build_info: MetricDesc::gauge(
                "digitalocean_exporter_build_info",
                "A metric with a constant '1' value labeled by version, revision, builddate and rustversion from which the exporter was built",
                &["version", "revision", "builddate", "rustversion"],
            )?,
            start_time_desc: MetricDesc::gauge(
                "digitalocean_exporter_start_time",
                "Unix timestamp of the start time",
                &[],
            )?,
            uptime: MetricDesc::gauge(
                "digitalocean_exporter_uptime_seconds",
                "Seconds since the exporter started",
                &[],
            )?,
        })
    }

    /// Replace the wall clock used for uptime.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    fn uptime_seconds(&self) -> f64 {
        ((self.clock)() - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

#[async_trait::async_trait]
impl Collector for ExporterCollector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn describe(&self) -> Vec<Arc<MetricDesc>> {
        vec![
            self.build_info.clone(),
            self.start_time_desc.clone(),
            self.uptime.clone(),
        ]
    }

    async fn collect(&self) -> Vec<Observation> {
        let none: [&str; 0] = [];
        vec![
            self.build_info.observe(
                1.0,
                [
                    self.build.version.as_str(),
                    self.build.revision.as_str(),
                    self.build.build_date.as_str(),
                    self.build.rust_version.as_str(),
                ],
            ),
            self.start_time_desc
                .observe(self.start_time.timestamp_millis() as f64 / 1000.0, none),
            self.uptime.observe(self.uptime_seconds(), none),
        ]
    }
}
