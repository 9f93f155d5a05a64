//! Floating IPv4 addresses and their droplet assignment.

use crate::api::CloudApi;
use crate::collectors::bool_value;
use crate::error::Result;
use crate::metrics::{Collector, Deadline, MetricDesc, Observation};
use std::sync::Arc;
use std::time::Duration;

const NAME: &str = "floatingip";
const LABELS: &[&str] = &["ipv4", "region", "droplet_id", "droplet_name"];

/// Exposes floating IP assignment.
pub struct FloatingIpCollector {
    api: Arc<dyn CloudApi>,
    timeout: Duration,

    active: Arc<MetricDesc>,
    locked: Arc<MetricDesc>,
}

impl FloatingIpCollector {
    /// Create a new collector; `timeout` bounds each collection pass.
    pub fn new(api: Arc<dyn CloudApi>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api,
            timeout,
            active: MetricDesc::gauge(
                "digitalocean_floating_ipv4_active",
                "If 1 the floating ip is assigned to a droplet, 0 otherwise",
                LABELS,
            )?,
            locked: MetricDesc::gauge(
                "digitalocean_floating_ipv4_locked",
                "If 1 the floating ip is locked against reassignment, 0 otherwise",
                LABELS,
            )?,
        })
    }
}

#[async_trait::async_trait]
impl Collector for FloatingIpCollector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn describe(&self) -> Vec<Arc<MetricDesc>> {
        vec![self.active.clone(), self.locked.clone()]
    }

    async fn collect(&self) -> Vec<Observation> {
        let deadline = Deadline::after(self.timeout);
        let Some(ips) = deadline.run(NAME, self.api.list_floating_ips()).await else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(ips.len() * 2);
        for ip in &ips {
            let (droplet_id, droplet_name) = ip
                .droplet
                .as_ref()
                .map(|d| (d.id.as_str(), d.name.as_str()))
                .unwrap_or_default();
            let labels = [
                ip.ip.as_str(),
                ip.region.slug.as_str(),
                droplet_id,
                droplet_name,
            ];
            out.push(self.active.observe(bool_value(ip.droplet.is_some()), labels));
            out.push(self.locked.observe(bool_value(ip.locked), labels));
        }

        out
    }
}
