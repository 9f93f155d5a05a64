//! Private images, one series per image and region.

use crate::api::CloudApi;
use crate::collectors::{regions_or_blank, GIB};
use crate::error::Result;
use crate::metrics::{Collector, Deadline, MetricDesc, Observation};
use std::sync::Arc;
use std::time::Duration;

const NAME: &str = "image";
const LABELS: &[&str] = &["id", "name", "region", "type", "distribution"];

/// Exposes private image sizes.
pub struct ImageCollector {
    api: Arc<dyn CloudApi>,
    timeout: Duration,

    min_disk_size: Arc<MetricDesc>,
    size: Arc<MetricDesc>,
}

impl ImageCollector {
    /// Create a new collector; `timeout` bounds each collection pass.
    pub fn new(api: Arc<dyn CloudApi>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api,
            timeout,
            min_disk_size: MetricDesc::gauge(
                "digitalocean_image_min_disk_size_bytes",
                "Minimum disk size for an image, in bytes",
                LABELS,
            )?,
            size: MetricDesc::gauge(
                "digitalocean_image_size_bytes",
                "Size of the image, in bytes",
                LABELS,
            )?,
        })
    }
}

#[async_trait::async_trait]
impl Collector for ImageCollector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn describe(&self) -> Vec<Arc<MetricDesc>> {
        vec![self.min_disk_size.clone(), self.size.clone()]
    }

    async fn collect(&self) -> Vec<Observation> {
        let deadline = Deadline::after(self.timeout);
        let Some(images) = deadline.run(NAME, self.api.list_images()).await else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for image in &images {
            for region in regions_or_blank(&image.regions) {
                let labels = [
                    image.id.as_str(),
                    image.name.as_str(),
                    region,
                    image.image_type.as_str(),
                    image.distribution.as_str(),
                ];
                out.push(
                    self.min_disk_size
                        .observe(image.min_disk_size as f64 * GIB, labels),
                );
                out.push(self.size.observe(image.size_gigabytes * GIB, labels));
            }
        }

        out
    }
}
