//! Block storage volumes.

use crate::api::CloudApi;
use crate::collectors::GIB;
use crate::error::Result;
use crate::metrics::{Collector, Deadline, MetricDesc, Observation};
use std::sync::Arc;
use std::time::Duration;

const NAME: &str = "volume";
const LABELS: &[&str] = &["id", "name", "region"];

/// Exposes volume sizes and attachments.
pub struct VolumeCollector {
    api: Arc<dyn CloudApi>,
    timeout: Duration,

    size: Arc<MetricDesc>,
    droplets: Arc<MetricDesc>,
}

impl VolumeCollector {
    /// Create a new collector; `timeout` bounds each collection pass.
    pub fn new(api: Arc<dyn CloudApi>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api,
            timeout,
            size: MetricDesc::gauge(
                "digitalocean_volume_size_bytes",
                "Volume's size in bytes",
                LABELS,
            )?,
            droplets: MetricDesc::gauge(
                "digitalocean_volume_droplets",
                "The number of droplets the volume is attached to",
                LABELS,
            )?,
        })
    }
}

#[async_trait::async_trait]
impl Collector for VolumeCollector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn describe(&self) -> Vec<Arc<MetricDesc>> {
        vec![self.size.clone(), self.droplets.clone()]
    }

    async fn collect(&self) -> Vec<Observation> {
        let deadline = Deadline::after(self.timeout);
        let Some(volumes) = deadline.run(NAME, self.api.list_volumes()).await else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(volumes.len() * 2);
        for volume in &volumes {
            let labels = [
                volume.id.as_str(),
                volume.name.as_str(),
                volume.region.slug.as_str(),
            ];
            out.push(self.size.observe(volume.size_gigabytes * GIB, labels));
            out.push(
                self.droplets
                    .observe(volume.droplet_ids.len() as f64, labels),
            );
        }

        out
    }
}
