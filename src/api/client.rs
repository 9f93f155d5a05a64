//! reqwest-backed implementation of [`CloudApi`].

use crate::api::types::*;
use crate::api::CloudApi;
use crate::error::{ExporterError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// Public DigitalOcean API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.digitalocean.com/v2";

/// Largest page size the API accepts.
const PER_PAGE: u32 = 200;

/// Upper bound on pages fetched for a single listing.
pub const DEFAULT_MAX_PAGES: u32 = 500;

/// Pagination links attached to every listing response.
#[derive(Debug, Default, Deserialize)]
struct Links {
    #[serde(default)]
    pages: Option<Pages>,
}

#[derive(Debug, Default, Deserialize)]
struct Pages {
    #[serde(default)]
    next: Option<String>,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    id: String,
    #[serde(default)]
    message: String,
}

/// Move a top-level field out of a response body, `Null` when absent.
fn take_field(json: &mut serde_json::Value, key: &str) -> serde_json::Value {
    json.get_mut(key)
        .map(serde_json::Value::take)
        .unwrap_or(serde_json::Value::Null)
}

/// Authenticated client for the DigitalOcean v2 API.
#[derive(Debug, Clone)]
pub struct DigitalOceanClient {
    token: String,
    base_url: String,
    max_pages: u32,
    client: Client,
}

impl DigitalOceanClient {
    /// Create a client for the public API endpoint.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint.
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("digitalocean_exporter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            token: token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            client,
        })
    }

    /// Limit how many pages a single listing may span.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Issue one authenticated GET and decode the JSON body.
    async fn get_json(&self, path: &str, page: Option<u32>) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url).bearer_auth(&self.token);
        if let Some(page) = page {
            request = request.query(&[("page", page), ("per_page", PER_PAGE)]);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorBody>(&body) {
                Ok(error) => ExporterError::api_error(status.as_u16(), error.id, error.message),
                Err(_) => ExporterError::api_error(status.as_u16(), "unknown", body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch a single object stored under `key`.
    async fn get_object<T: DeserializeOwned>(&self, path: &str, key: &str) -> Result<T> {
        let mut json = self.get_json(path, None).await?;
        Ok(serde_json::from_value(take_field(&mut json, key))?)
    }

    /// Walk every page of a listing, collecting the items stored under `key`.
    async fn list_all<T: DeserializeOwned>(&self, path: &str, key: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let mut json = self.get_json(path, Some(page)).await?;

            let batch: Vec<T> = match take_field(&mut json, key) {
                serde_json::Value::Null => Vec::new(),
                value => serde_json::from_value(value)?,
            };
            // An empty page ends the listing whatever the links say.
            if batch.is_empty() {
                break;
            }
            items.extend(batch);

            let links: Links = match take_field(&mut json, "links") {
                serde_json::Value::Null => Links::default(),
                value => serde_json::from_value(value)?,
            };
            let has_next = links
                .pages
                .and_then(|pages| pages.next)
                .is_some_and(|next| !next.is_empty());
            if !has_next {
                break;
            }
            if page >= self.max_pages {
                return Err(ExporterError::pagination_error(format!(
                    "{} still has pages after {} requests",
                    path, self.max_pages
                )));
            }
            page += 1;
        }

        debug!(path, count = items.len(), pages = page, "listed resources");
        Ok(items)
    }
}

#[async_trait::async_trait]
impl CloudApi for DigitalOceanClient {
    async fn account(&self) -> Result<Account> {
        self.get_object("/account", "account").await
    }

    async fn list_droplets(&self) -> Result<Vec<Droplet>> {
        self.list_all("/droplets", "droplets").await
    }

    async fn list_volumes(&self) -> Result<Vec<Volume>> {
        self.list_all("/volumes", "volumes").await
    }

    async fn list_load_balancers(&self) -> Result<Vec<LoadBalancer>> {
        self.list_all("/load_balancers", "load_balancers").await
    }

    async fn list_domains(&self) -> Result<Vec<Domain>> {
        self.list_all("/domains", "domains").await
    }

    async fn list_domain_records(&self, domain: &str) -> Result<Vec<DomainRecord>> {
        self.list_all(&format!("/domains/{}/records", domain), "domain_records")
            .await
    }

    async fn list_images(&self) -> Result<Vec<Image>> {
        // Public distribution images are not part of the account inventory.
        self.list_all("/images?private=true", "images").await
    }

    async fn list_keys(&self) -> Result<Vec<Key>> {
        self.list_all("/account/keys", "ssh_keys").await
    }

    async fn list_snapshots(&self) -> Result<Vec<Snapshot>> {
        self.list_all("/snapshots", "snapshots").await
    }

    async fn list_floating_ips(&self) -> Result<Vec<FloatingIp>> {
        self.list_all("/floating_ips", "floating_ips").await
    }
}
