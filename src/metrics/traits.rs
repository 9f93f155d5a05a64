//! The collector contract shared by every resource type.

use crate::metrics::descriptor::MetricDesc;
use crate::metrics::observation::Observation;
use std::sync::Arc;

/// A unit that fetches one resource type and maps it to observations.
///
/// Collectors hold no resource data between scrapes: every call to
/// [`Collector::collect`] queries the API afresh. A failed pass logs and
/// returns an empty vector instead of an error, so sibling collectors are
/// never affected.
#[async_trait::async_trait]
pub trait Collector: Send + Sync {
    /// Short resource name used in logs, e.g. `"droplet"`.
    fn name(&self) -> &'static str;

    /// The fixed descriptor set declared at construction.
    fn describe(&self) -> Vec<Arc<MetricDesc>>;

    /// Run one collection pass.
    async fn collect(&self) -> Vec<Observation>;
}
