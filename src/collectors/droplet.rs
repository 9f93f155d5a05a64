//! Droplet inventory: power state, size and pricing per droplet.

use crate::api::CloudApi;
use crate::collectors::{bool_value, GIB, MIB};
use crate::error::Result;
use crate::metrics::{observe_states, Collector, Deadline, MetricDesc, Observation, StateSet};
use std::sync::Arc;
use std::time::Duration;

const NAME: &str = "droplet";
const LABELS: &[&str] = &["id", "name", "region"];

/// Lifecycle state reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropletStatus {
    New,
    Active,
    Off,
    Archive,
}

impl StateSet for DropletStatus {
    const LABEL: &'static str = "status";
    const ALL: &'static [Self] = &[
        DropletStatus::New,
        DropletStatus::Active,
        DropletStatus::Off,
        DropletStatus::Archive,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            DropletStatus::New => "new",
            DropletStatus::Active => "active",
            DropletStatus::Off => "off",
            DropletStatus::Archive => "archive",
        }
    }
}

/// Exposes droplet state, size and pricing.
pub struct DropletCollector {
    api: Arc<dyn CloudApi>,
    timeout: Duration,

    up: Arc<MetricDesc>,
    status: Arc<MetricDesc>,
    cpus: Arc<MetricDesc>,
    memory: Arc<MetricDesc>,
    disk: Arc<MetricDesc>,
    price_hourly: Arc<MetricDesc>,
    price_monthly: Arc<MetricDesc>,
    locked: Arc<MetricDesc>,
    backups: Arc<MetricDesc>,
}

impl DropletCollector {
    /// Create a new collector; `timeout` bounds each collection pass.
    pub fn new(api: Arc<dyn CloudApi>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api,
            timeout,
            up: MetricDesc::gauge(
                "digitalocean_droplet_up",
                "If 1 the droplet is up and running, 0 otherwise",
                LABELS,
            )?,
            status: MetricDesc::state_set::<DropletStatus>(
                "digitalocean_droplet_status",
                "Droplet status, 1 for the current state and 0 for every other state",
                LABELS,
            )?,
            cpus: MetricDesc::gauge(
                "digitalocean_droplet_cpus",
                "Droplet's number of CPUs",
                LABELS,
            )?,
            memory: MetricDesc::gauge(
                "digitalocean_droplet_memory_bytes",
                "Droplet's memory in bytes",
                LABELS,
            )?,
            disk: MetricDesc::gauge(
                "digitalocean_droplet_disk_bytes",
                "Droplet's disk in bytes",
                LABELS,
            )?,
            price_hourly: MetricDesc::gauge(
                "digitalocean_droplet_price_hourly",
                "Price of the Droplet billed hourly in dollars",
                LABELS,
            )?,
            price_monthly: MetricDesc::gauge(
                "digitalocean_droplet_price_monthly",
                "Price of the Droplet billed monthly in dollars",
                LABELS,
            )?,
            locked: MetricDesc::gauge(
                "digitalocean_droplet_locked",
                "If 1 the droplet is locked against changes, 0 otherwise",
                LABELS,
            )?,
            backups: MetricDesc::gauge(
                "digitalocean_droplet_backups_enabled",
                "If 1 automated backups are enabled for the droplet, 0 otherwise",
                LABELS,
            )?,
        })
    }
}

#[async_trait::async_trait]
impl Collector for DropletCollector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn describe(&self) -> Vec<Arc<MetricDesc>> {
        vec![
            self.up.clone(),
            self.status.clone(),
            self.cpus.clone(),
            self.memory.clone(),
            self.disk.clone(),
            self.price_hourly.clone(),
            self.price_monthly.clone(),
            self.locked.clone(),
            self.backups.clone(),
        ]
    }

    async fn collect(&self) -> Vec<Observation> {
        let deadline = Deadline::after(self.timeout);
        let Some(droplets) = deadline.run(NAME, self.api.list_droplets()).await else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(droplets.len() * 12);
        for droplet in &droplets {
            let labels = vec![
                droplet.id.clone(),
                droplet.name.clone(),
                droplet.region.slug.clone(),
            ];
            let status = DropletStatus::parse(&droplet.status);

            out.push(
                self.up
                    .observe(bool_value(status == Some(DropletStatus::Active)), &labels),
            );
            observe_states(&self.status, &labels, status, &mut out);
            out.push(self.cpus.observe(droplet.vcpus as f64, &labels));
            out.push(self.memory.observe(droplet.memory as f64 * MIB, &labels));
            out.push(self.disk.observe(droplet.disk as f64 * GIB, &labels));
            out.push(self.price_hourly.observe(droplet.size.price_hourly, &labels));
            out.push(self.price_monthly.observe(droplet.size.price_monthly, &labels));
            out.push(self.locked.observe(bool_value(droplet.locked), &labels));
            out.push(
                self.backups
                    .observe(bool_value(droplet.backups_enabled()), &labels),
            );
        }

        out
    }
}
