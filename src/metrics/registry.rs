//! The set of registered collectors and the per-scrape gather pass.

use crate::error::{ExporterError, Result};
use crate::metrics::descriptor::MetricDesc;
use crate::metrics::observation::Observation;
use crate::metrics::traits::Collector;
use futures_util::future::join_all;
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, TextEncoder};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Collectors registered at startup.
///
/// Registration takes `&mut self` and happens before the listener starts;
/// afterwards the registry is shared read-only behind an `Arc`.
#[derive(Default)]
pub struct Registry {
    collectors: Vec<Box<dyn Collector>>,
    owners: HashMap<String, &'static str>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collector, rejecting metric names that are already declared.
    pub fn register(&mut self, collector: Box<dyn Collector>) -> Result<()> {
        let name = collector.name();
        let mut declared = HashSet::new();

        for desc in collector.describe() {
            let fq_name = desc.fq_name().to_string();
            if let Some(owner) = self.owners.get(&fq_name) {
                return Err(ExporterError::registration_error(format!(
                    "metric {} from collector {} is already declared by collector {}",
                    fq_name, name, owner
                )));
            }
            if !declared.insert(fq_name.clone()) {
                return Err(ExporterError::registration_error(format!(
                    "collector {} declares metric {} twice",
                    name, fq_name
                )));
            }
        }

        for fq_name in declared {
            self.owners.insert(fq_name, name);
        }
        debug!(collector = name, "registered collector");
        self.collectors.push(collector);
        Ok(())
    }

    /// Typed convenience around [`Registry::register`].
    pub fn register_collector<C: Collector + 'static>(&mut self, collector: C) -> Result<()> {
        self.register(Box::new(collector))
    }

    /// Number of registered collectors.
    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    /// Whether no collector has been registered.
    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }

    /// Names of the registered collectors, in registration order.
    pub fn collector_names(&self) -> Vec<&'static str> {
        self.collectors.iter().map(|c| c.name()).collect()
    }

    /// Union of every collector's descriptors.
    pub fn describe(&self) -> Vec<Arc<MetricDesc>> {
        self.collectors.iter().flat_map(|c| c.describe()).collect()
    }

    /// Run every collector concurrently and merge the results.
    ///
    /// Families are sorted by name and series by label values, so the
    /// output does not depend on completion order. Families without any
    /// observation are omitted.
    pub async fn gather(&self) -> Vec<MetricFamily> {
        let passes = self.collectors.iter().map(|collector| async move {
            let declared = collector.describe();
            let observations = collector.collect().await;
            (collector.name(), declared, observations)
        });

        let mut by_name: BTreeMap<String, Vec<Observation>> = BTreeMap::new();
        for (collector, declared, observations) in join_all(passes).await {
            debug!(collector, count = observations.len(), "collected observations");
            for observation in observations {
                if !is_valid(collector, &declared, &observation) {
                    continue;
                }
                by_name
                    .entry(observation.desc.fq_name().to_string())
                    .or_default()
                    .push(observation);
            }
        }

        by_name.into_values().map(into_family).collect()
    }
}

/// Check an observation against its collector's declared descriptors.
fn is_valid(collector: &'static str, declared: &[Arc<MetricDesc>], observation: &Observation) -> bool {
    let metric = observation.desc.fq_name();
    if !declared.iter().any(|desc| desc.as_ref() == observation.desc.as_ref()) {
        warn!(collector, metric, "dropping observation for undeclared metric");
        return false;
    }
    if observation.label_values.len() != observation.desc.label_names().len() {
        warn!(
            collector,
            metric,
            expected = observation.desc.label_names().len(),
            got = observation.label_values.len(),
            "dropping observation with wrong label count"
        );
        return false;
    }
    true
}

fn into_family(mut observations: Vec<Observation>) -> MetricFamily {
    observations.sort_by(|a, b| a.label_values.cmp(&b.label_values));
    observations.dedup_by(|later, earlier| {
        let duplicate = later.label_values == earlier.label_values;
        if duplicate {
            warn!(
                metric = later.desc.fq_name(),
                labels = ?later.label_values,
                "dropping duplicate series"
            );
        }
        duplicate
    });

    let desc = Arc::clone(&observations[0].desc);
    let mut family = MetricFamily::default();
    family.set_name(desc.fq_name().to_string());
    family.set_help(desc.help().to_string());
    family.set_field_type(desc.kind().metric_type());
    for observation in &observations {
        family.mut_metric().push(observation.to_metric());
    }
    family
}

/// Render families in the text exposition format.
pub fn encode_text(families: &[MetricFamily]) -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(families, &mut buffer)
        .map_err(|e| ExporterError::encode_error(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| ExporterError::encode_error(e.to_string()))
}

/// Content type of [`encode_text`] output.
pub fn text_content_type() -> String {
    TextEncoder::new().format_type().to_string()
}
