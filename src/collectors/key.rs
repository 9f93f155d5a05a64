//! SSH keys registered with the account.

use crate::api::CloudApi;
use crate::error::Result;
use crate::metrics::{Collector, Deadline, MetricDesc, Observation};
use std::sync::Arc;
use std::time::Duration;

const NAME: &str = "key";

/// Exposes SSH key information.
pub struct KeyCollector {
    api: Arc<dyn CloudApi>,
    timeout: Duration,

    key: Arc<MetricDesc>,
}

impl KeyCollector {
    /// Create a new collector; `timeout` bounds each collection pass.
    pub fn new(api: Arc<dyn CloudApi>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api,
            timeout,
            key: MetricDesc::gauge(
                "digitalocean_key",
                "Information about keys in your digitalocean account",
                &["id", "name", "fingerprint"],
            )?,
        })
    }
}

#[async_trait::async_trait]
impl Collector for KeyCollector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn describe(&self) -> Vec<Arc<MetricDesc>> {
        vec![self.key.clone()]
    }

    async fn collect(&self) -> Vec<Observation> {
        let deadline = Deadline::after(self.timeout);
        let Some(keys) = deadline.run(NAME, self.api.list_keys()).await else {
            return Vec::new();
        };

        keys.iter()
            .map(|key| {
                self.key.observe(
                    1.0,
                    [key.id.as_str(), key.name.as_str(), key.fingerprint.as_str()],
                )
            })
            .collect()
    }
}
