//! Droplet and volume snapshots, one series per snapshot and region.

use crate::api::CloudApi;
use crate::collectors::{regions_or_blank, GIB};
use crate::error::Result;
use crate::metrics::{Collector, Deadline, MetricDesc, Observation};
use std::sync::Arc;
use std::time::Duration;

const NAME: &str = "snapshot";
const LABELS: &[&str] = &["id", "name", "region", "resource_id", "resource_type"];

/// Exposes snapshot sizes.
pub struct SnapshotCollector {
    api: Arc<dyn CloudApi>,
    timeout: Duration,

    min_disk_size: Arc<MetricDesc>,
    size: Arc<MetricDesc>,
}

impl SnapshotCollector {
    /// Create a new collector; `timeout` bounds each collection pass.
    pub fn new(api: Arc<dyn CloudApi>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api,
            timeout,
            min_disk_size: MetricDesc::gauge(
                "digitalocean_snapshot_min_disk_size_bytes",
                "Minimum disk size for a droplet to run this snapshot on in bytes",
                LABELS,
            )?,
            size: MetricDesc::gauge(
                "digitalocean_snapshot_size_bytes",
                "Snapshot's size in bytes",
                LABELS,
            )?,
        })
    }
}

#[async_trait::async_trait]
impl Collector for SnapshotCollector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn describe(&self) -> Vec<Arc<MetricDesc>> {
        vec![self.min_disk_size.clone(), self.size.clone()]
    }

    async fn collect(&self) -> Vec<Observation> {
        let deadline = Deadline::after(self.timeout);
        let Some(snapshots) = deadline.run(NAME, self.api.list_snapshots()).await else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for snapshot in &snapshots {
            for region in regions_or_blank(&snapshot.regions) {
                let labels = [
                    snapshot.id.as_str(),
                    snapshot.name.as_str(),
                    region,
                    snapshot.resource_id.as_str(),
                    snapshot.resource_type.as_str(),
                ];
                out.push(
                    self.min_disk_size
                        .observe(snapshot.min_disk_size as f64 * GIB, labels),
                );
                out.push(self.size.observe(snapshot.size_gigabytes * GIB, labels));
            }
        }

        out
    }
}
