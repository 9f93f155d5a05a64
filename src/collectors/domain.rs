//! Domains and their DNS records.
//!
//! Records are listed per domain, so one pass issues `1 + domains` calls.
//! All of them share a single deadline, and a failure in any of them
//! drops the whole pass.

use crate::api::CloudApi;
use crate::error::Result;
use crate::metrics::{Collector, Deadline, MetricDesc, Observation};
use std::sync::Arc;
use std::time::Duration;

const NAME: &str = "domain";
const RECORD_LABELS: &[&str] = &["id", "name", "type", "data", "domain"];

/// Exposes domain TTLs and DNS record attributes.
pub struct DomainCollector {
    api: Arc<dyn CloudApi>,
    timeout: Duration,

    ttl: Arc<MetricDesc>,
    record_port: Arc<MetricDesc>,
    record_priority: Arc<MetricDesc>,
    record_weight: Arc<MetricDesc>,
}

impl DomainCollector {
    /// Create a new collector; `timeout` bounds each collection pass.
    pub fn new(api: Arc<dyn CloudApi>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api,
            timeout,
            ttl: MetricDesc::gauge(
                "digitalocean_domain_ttl_seconds",
                "Seconds that clients can cache queried information before a refresh",
                &["name"],
            )?,
            record_port: MetricDesc::gauge(
                "digitalocean_domain_record_port",
                "The port for SRV records",
                RECORD_LABELS,
            )?,
            record_priority: MetricDesc::gauge(
                "digitalocean_domain_record_priority",
                "The priority for SRV and MX records",
                RECORD_LABELS,
            )?,
            record_weight: MetricDesc::gauge(
                "digitalocean_domain_record_weight",
                "The weight for SRV records",
                RECORD_LABELS,
            )?,
        })
    }
}

#[async_trait::async_trait]
impl Collector for DomainCollector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn describe(&self) -> Vec<Arc<MetricDesc>> {
        vec![
            self.ttl.clone(),
            self.record_port.clone(),
            self.record_priority.clone(),
            self.record_weight.clone(),
        ]
    }

    async fn collect(&self) -> Vec<Observation> {
        let deadline = Deadline::after(self.timeout);
        let Some(domains) = deadline.run(NAME, self.api.list_domains()).await else {
            return Vec::new();
        };

        // Every record listing must succeed before anything is emitted.
        let mut listings = Vec::with_capacity(domains.len());
        for domain in &domains {
            let Some(records) = deadline
                .run(NAME, self.api.list_domain_records(&domain.name))
                .await
            else {
                return Vec::new();
            };
            listings.push((domain, records));
        }

        let mut out = Vec::new();
        for (domain, records) in &listings {
            out.push(self.ttl.observe(domain.ttl as f64, [domain.name.as_str()]));

            for record in records {
                let labels = [
                    record.id.as_str(),
                    record.name.as_str(),
                    record.record_type.as_str(),
                    record.data.as_str(),
                    domain.name.as_str(),
                ];
                out.push(
                    self.record_port
                        .observe(record.port.unwrap_or_default() as f64, labels),
                );
                out.push(
                    self.record_priority
                        .observe(record.priority.unwrap_or_default() as f64, labels),
                );
                out.push(
                    self.record_weight
                        .observe(record.weight.unwrap_or_default() as f64, labels),
                );
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::api::{Domain, DomainRecord};

    fn api() -> MockApi {
        MockApi {
            domains: vec![
                Domain {
                    name: "example.com".to_string(),
                    ttl: 1800,
                },
                Domain {
                    name: "example.org".to_string(),
                    ttl: 3600,
                },
            ],
            domain_records: vec![
                (
                    "example.com".to_string(),
                    DomainRecord {
                        id: "1".to_string(),
                        record_type: "MX".to_string(),
                        name: "@".to_string(),
                        data: "mail.example.com".to_string(),
                        priority: Some(10),
                        ttl: 1800,
                        ..Default::default()
                    },
                ),
                (
                    "example.com".to_string(),
                    DomainRecord {
                        id: "2".to_string(),
                        record_type: "SRV".to_string(),
                        name: "_sip._tcp".to_string(),
                        data: "sip.example.com".to_string(),
                        priority: Some(0),
                        port: Some(5060),
                        weight: Some(5),
                        ttl: 1800,
                    },
                ),
            ],
            ..Default::default()
        }
    }

    fn collector(api: MockApi) -> DomainCollector {
        DomainCollector::new(Arc::new(api), Duration::from_secs(1)).unwrap()
    }

    #[tokio::test]
    async fn test_domain_and_record_metrics() {
        let out = collector(api()).collect().await;

        // Two TTLs plus three metrics for each of two records.
        assert_eq!(out.len(), 2 + 3 * 2);

        let ttl: Vec<_> = out
            .iter()
            .filter(|o| o.desc.fq_name() == "digitalocean_domain_ttl_seconds")
            .map(|o| (o.label("name").unwrap(), o.value))
            .collect();
        assert_eq!(ttl, vec![("example.com", 1800.0), ("example.org", 3600.0)]);

        let port = out
            .iter()
            .find(|o| o.desc.fq_name() == "digitalocean_domain_record_port" && o.label("id") == Some("2"))
            .unwrap();
        assert_eq!(port.value, 5060.0);
        assert_eq!(port.label("type"), Some("SRV"));
        assert_eq!(port.label("domain"), Some("example.com"));

        let mx_port = out
            .iter()
            .find(|o| o.desc.fq_name() == "digitalocean_domain_record_port" && o.label("id") == Some("1"))
            .unwrap();
        assert_eq!(mx_port.value, 0.0);
    }

    #[tokio::test]
    async fn test_record_failure_yields_nothing() {
        let out = collector(api().failing("domain_record")).collect().await;
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_record_timeout_yields_nothing() {
        let collector = DomainCollector::new(
            Arc::new(api().stalled("domain_record")),
            Duration::from_millis(50),
        )
        .unwrap();

        let out = collector.collect().await;
        assert!(out.is_empty(), "emitted {} observations", out.len());
    }

    #[tokio::test]
    async fn test_domain_listing_failure_yields_nothing() {
        assert!(collector(api().failing("domain")).collect().await.is_empty());
    }
}
