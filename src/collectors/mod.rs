//! Resource collectors, one per DigitalOcean resource type.

pub mod account;
pub mod domain;
pub mod droplet;
pub mod exporter;
pub mod floating_ip;
pub mod image;
pub mod key;
pub mod load_balancer;
pub mod snapshot;
pub mod volume;

pub use account::AccountCollector;
pub use domain::DomainCollector;
pub use droplet::DropletCollector;
pub use exporter::{BuildInfo, ExporterCollector};
pub use floating_ip::FloatingIpCollector;
pub use image::ImageCollector;
pub use key::KeyCollector;
pub use load_balancer::LoadBalancerCollector;
pub use snapshot::SnapshotCollector;
pub use volume::VolumeCollector;

use crate::api::CloudApi;
use crate::error::Result;
use crate::metrics::Registry;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * MIB;

fn bool_value(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Regions to expand a multi-region item over; a blank region when none.
fn regions_or_blank(regions: &[String]) -> Vec<&str> {
    if regions.is_empty() {
        vec![""]
    } else {
        regions.iter().map(String::as_str).collect()
    }
}

/// Register every collector the exporter ships with.
pub fn register_all(
    registry: &mut Registry,
    api: Arc<dyn CloudApi>,
    timeout: Duration,
    build: BuildInfo,
    start_time: DateTime<Utc>,
) -> Result<()> {
    registry.register_collector(AccountCollector::new(api.clone(), timeout)?)?;
    registry.register_collector(DomainCollector::new(api.clone(), timeout)?)?;
    registry.register_collector(DropletCollector::new(api.clone(), timeout)?)?;
    registry.register_collector(ExporterCollector::new(build, start_time)?)?;
    registry.register_collector(FloatingIpCollector::new(api.clone(), timeout)?)?;
    registry.register_collector(ImageCollector::new(api.clone(), timeout)?)?;
    registry.register_collector(KeyCollector::new(api.clone(), timeout)?)?;
    registry.register_collector(LoadBalancerCollector::new(api.clone(), timeout)?)?;
    registry.register_collector(SnapshotCollector::new(api.clone(), timeout)?)?;
    registry.register_collector(VolumeCollector::new(api, timeout)?)?;
    Ok(())
}
