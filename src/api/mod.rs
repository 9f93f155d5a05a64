//! DigitalOcean API client adapter.
//!
//! Collectors only see the [`CloudApi`] trait. Each listing returns the
//! complete inventory for its resource type, with pagination already
//! resolved. Dropping a returned future cancels the in-flight request.

pub mod client;
pub mod types;

#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::DigitalOceanClient;
pub use types::{
    Account, Domain, DomainRecord, Droplet, DropletRef, FloatingIp, Image, Key, LoadBalancer,
    Region, Size, Snapshot, Volume,
};

use crate::error::Result;

/// Typed listing operations against the DigitalOcean API.
#[async_trait::async_trait]
pub trait CloudApi: Send + Sync {
    /// Fetch the account the token belongs to.
    async fn account(&self) -> Result<Account>;

    /// List every droplet.
    async fn list_droplets(&self) -> Result<Vec<Droplet>>;

    /// List every block storage volume.
    async fn list_volumes(&self) -> Result<Vec<Volume>>;

    /// List every load balancer.
    async fn list_load_balancers(&self) -> Result<Vec<LoadBalancer>>;

    /// List every domain managed by DigitalOcean DNS.
    async fn list_domains(&self) -> Result<Vec<Domain>>;

    /// List the DNS records of a single domain.
    async fn list_domain_records(&self, domain: &str) -> Result<Vec<DomainRecord>>;

    /// List the account's private images.
    async fn list_images(&self) -> Result<Vec<Image>>;

    /// List the SSH keys registered with the account.
    async fn list_keys(&self) -> Result<Vec<Key>>;

    /// List every droplet and volume snapshot.
    async fn list_snapshots(&self) -> Result<Vec<Snapshot>>;

    /// List every floating IPv4 address.
    async fn list_floating_ips(&self) -> Result<Vec<FloatingIp>>;
}
