//! Load balancers.

use crate::api::CloudApi;
use crate::error::Result;
use crate::metrics::{Collector, Deadline, MetricDesc, Observation, StateSet};
use std::sync::Arc;
use std::time::Duration;

const NAME: &str = "loadbalancer";
const LABELS: &[&str] = &["id", "name", "ip", "region"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadBalancerStatus {
    New,
    Active,
    Errored,
}

impl StateSet for LoadBalancerStatus {
    const LABEL: &'static str = "status";
    const ALL: &'static [Self] = &[
        LoadBalancerStatus::New,
        LoadBalancerStatus::Active,
        LoadBalancerStatus::Errored,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            LoadBalancerStatus::New => "new",
            LoadBalancerStatus::Active => "active",
            LoadBalancerStatus::Errored => "errored",
        }
    }
}

impl LoadBalancerStatus {
    /// Numeric encoding exposed by `digitalocean_loadbalancer_status`.
    pub fn code(status: Option<Self>) -> f64 {
        match status {
            Some(LoadBalancerStatus::Active) => 1.0,
            Some(LoadBalancerStatus::Errored) => -1.0,
            Some(LoadBalancerStatus::New) | None => 0.0,
        }
    }
}

/// Exposes load balancer status and backends.
pub struct LoadBalancerCollector {
    api: Arc<dyn CloudApi>,
    timeout: Duration,

    droplets: Arc<MetricDesc>,
    status: Arc<MetricDesc>,
}

impl LoadBalancerCollector {
    /// Create a new collector; `timeout` bounds each collection pass.
    pub fn new(api: Arc<dyn CloudApi>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api,
            timeout,
            droplets: MetricDesc::gauge(
                "digitalocean_loadbalancer_droplets",
                "The number of droplets this load balancer is proxying to",
                LABELS,
            )?,
            status: MetricDesc::gauge(
                "digitalocean_loadbalancer_status",
                "The status of the load balancer, 1 if active, 0 if new, -1 if errored",
                LABELS,
            )?,
        })
    }
}

#[async_trait::async_trait]
impl Collector for LoadBalancerCollector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn describe(&self) -> Vec<Arc<MetricDesc>> {
        vec![self.droplets.clone(), self.status.clone()]
    }

    async fn collect(&self) -> Vec<Observation> {
        let deadline = Deadline::after(self.timeout);
        let Some(load_balancers) = deadline.run(NAME, self.api.list_load_balancers()).await else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(load_balancers.len() * 2);
        for lb in &load_balancers {
            let labels = [
                lb.id.as_str(),
                lb.name.as_str(),
                lb.ip.as_str(),
                lb.region.slug.as_str(),
            ];
            let status = LoadBalancerStatus::parse(&lb.status);
            out.push(self.droplets.observe(lb.droplet_ids.len() as f64, labels));
            out.push(self.status.observe(LoadBalancerStatus::code(status), labels));
        }

        out
    }
}
