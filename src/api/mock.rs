//! In-memory [`CloudApi`] for tests and benchmarks.
//!
//! Available to other crates with the `test-util` feature.

use crate::api::types::*;
use crate::api::CloudApi;
use crate::error::{ExporterError, Result};
use std::collections::HashSet;
use std::time::Duration;

/// Serves fixed inventories; selected resources can fail or stall.
#[derive(Debug, Clone, Default)]
pub struct MockApi {
    pub account: Account,
    pub droplets: Vec<Droplet>,
    pub volumes: Vec<Volume>,
    pub load_balancers: Vec<LoadBalancer>,
    pub domains: Vec<Domain>,
    pub domain_records: Vec<(String, DomainRecord)>,
    pub images: Vec<Image>,
    pub keys: Vec<Key>,
    pub snapshots: Vec<Snapshot>,
    pub floating_ips: Vec<FloatingIp>,
    pub failing: HashSet<&'static str>,
    pub stalled: HashSet<&'static str>,
}

impl MockApi {
    /// Make every call for `resource` fail with a 500 API error.
    pub fn failing(mut self, resource: &'static str) -> Self {
        self.failing.insert(resource);
        self
    }

    /// Make every call for `resource` hang for a minute.
    pub fn stalled(mut self, resource: &'static str) -> Self {
        self.stalled.insert(resource);
        self
    }

    async fn gate(&self, resource: &'static str) -> Result<()> {
        if self.stalled.contains(resource) {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
        if self.failing.contains(resource) {
            return Err(ExporterError::api_error(500, "server_error", "mock failure"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CloudApi for MockApi {
    async fn account(&self) -> Result<Account> {
        self.gate("account").await?;
        Ok(self.account.clone())
    }

    async fn list_droplets(&self) -> Result<Vec<Droplet>> {
        self.gate("droplet").await?;
        Ok(self.droplets.clone())
    }

    async fn list_volumes(&self) -> Result<Vec<Volume>> {
        self.gate("volume").await?;
        Ok(self.volumes.clone())
    }

    async fn list_load_balancers(&self) -> Result<Vec<LoadBalancer>> {
        self.gate("loadbalancer").await?;
        Ok(self.load_balancers.clone())
    }

    async fn list_domains(&self) -> Result<Vec<Domain>> {
        self.gate("domain").await?;
        Ok(self.domains.clone())
    }

    async fn list_domain_records(&self, domain: &str) -> Result<Vec<DomainRecord>> {
        self.gate("domain_record").await?;
        Ok(self
            .domain_records
            .iter()
            .filter(|(name, _)| name == domain)
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn list_images(&self) -> Result<Vec<Image>> {
        self.gate("image").await?;
        Ok(self.images.clone())
    }

    async fn list_keys(&self) -> Result<Vec<Key>> {
        self.gate("key").await?;
        Ok(self.keys.clone())
    }

    async fn list_snapshots(&self) -> Result<Vec<Snapshot>> {
        self.gate("snapshot").await?;
        Ok(self.snapshots.clone())
    }

    async fn list_floating_ips(&self) -> Result<Vec<FloatingIp>> {
        self.gate("floatingip").await?;
        Ok(self.floating_ips.clone())
    }
}
