//! Account limits and standing.

use crate::api::CloudApi;
use crate::collectors::bool_value;
use crate::error::Result;
use crate::metrics::{observe_states, Collector, Deadline, MetricDesc, Observation, StateSet};
use std::sync::Arc;
use std::time::Duration;

const NAME: &str = "account";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Warning,
    Locked,
}

impl StateSet for AccountStatus {
    const LABEL: &'static str = "status";
    const ALL: &'static [Self] = &[
        AccountStatus::Active,
        AccountStatus::Warning,
        AccountStatus::Locked,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Warning => "warning",
            AccountStatus::Locked => "locked",
        }
    }
}

/// Exposes account limits and standing.
pub struct AccountCollector {
    api: Arc<dyn CloudApi>,
    timeout: Duration,

    active: Arc<MetricDesc>,
    status: Arc<MetricDesc>,
    droplet_limit: Arc<MetricDesc>,
    floating_ip_limit: Arc<MetricDesc>,
    volume_limit: Arc<MetricDesc>,
    verified: Arc<MetricDesc>,
}

impl AccountCollector {
    /// Create a new collector; `timeout` bounds each collection pass.
    pub fn new(api: Arc<dyn CloudApi>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api,
            timeout,
            active: MetricDesc::gauge(
                "digitalocean_account_active",
                "If 1 the account is active, 0 otherwise",
                &[],
            )?,
            status: MetricDesc::state_set::<AccountStatus>(
                "digitalocean_account_status",
                "Account status, 1 for the current state and 0 for every other state",
                &[],
            )?,
            droplet_limit: MetricDesc::gauge(
                "digitalocean_account_droplet_limit",
                "The maximum number of droplets you can use",
                &[],
            )?,
            floating_ip_limit: MetricDesc::gauge(
                "digitalocean_account_floating_ip_limit",
                "The maximum number of floating ips you can use",
                &[],
            )?,
            volume_limit: MetricDesc::gauge(
                "digitalocean_account_volume_limit",
                "The maximum number of volumes you can use",
                &[],
            )?,
            verified: MetricDesc::gauge(
                "digitalocean_account_verified",
                "1 if your email address was verified",
                &[],
            )?,
        })
    }
}

#[async_trait::async_trait]
impl Collector for AccountCollector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn describe(&self) -> Vec<Arc<MetricDesc>> {
        vec![
            self.active.clone(),
            self.status.clone(),
            self.droplet_limit.clone(),
            self.floating_ip_limit.clone(),
            self.volume_limit.clone(),
            self.verified.clone(),
        ]
    }

    async fn collect(&self) -> Vec<Observation> {
        let deadline = Deadline::after(self.timeout);
        let Some(account) = deadline.run(NAME, self.api.account()).await else {
            return Vec::new();
        };

        let none: [&str; 0] = [];
        let status = AccountStatus::parse(&account.status);
        let mut out = Vec::with_capacity(8);

        out.push(
            self.active
                .observe(bool_value(status == Some(AccountStatus::Active)), none),
        );
        observe_states(&self.status, &[], status, &mut out);
        out.push(self.droplet_limit.observe(account.droplet_limit as f64, none));
        out.push(
            self.floating_ip_limit
                .observe(account.floating_ip_limit as f64, none),
        );
        out.push(self.volume_limit.observe(account.volume_limit as f64, none));
        out.push(self.verified.observe(bool_value(account.email_verified), none));

        out
    }
}
