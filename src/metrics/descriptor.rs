//! Metric descriptors declared once per collector.

use crate::error::Result;
use crate::metrics::observation::Observation;
use crate::metrics::state::StateSet;
use prometheus::core::Desc;
use prometheus::proto::MetricType;
use std::collections::HashMap;
use std::sync::Arc;

/// How a metric's value evolves between scrapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Gauge,
    Counter,
}

impl ValueKind {
    pub(crate) fn metric_type(self) -> MetricType {
        match self {
            ValueKind::Gauge => MetricType::GAUGE,
            ValueKind::Counter => MetricType::COUNTER,
        }
    }
}

/// Immutable declaration of a metric: name, help, label names and kind.
///
/// Name and label syntax are validated by [`prometheus::core::Desc`], so a
/// malformed declaration fails at construction rather than at scrape time.
#[derive(Debug, Clone)]
pub struct MetricDesc {
    desc: Desc,
    kind: ValueKind,
}

impl MetricDesc {
    /// Create a new descriptor, validating the name, help text and labels.
    pub fn new(kind: ValueKind, name: &str, help: &str, labels: &[&str]) -> Result<Arc<Self>> {
        let desc = Desc::new(
            name.to_string(),
            help.to_string(),
            labels.iter().map(|label| label.to_string()).collect(),
            HashMap::new(),
        )?;

        Ok(Arc::new(Self { desc, kind }))
    }

    /// Create a new gauge descriptor.
    pub fn gauge(name: &str, help: &str, labels: &[&str]) -> Result<Arc<Self>> {
        Self::new(ValueKind::Gauge, name, help, labels)
    }

    /// Create a new counter descriptor.
    pub fn counter(name: &str, help: &str, labels: &[&str]) -> Result<Arc<Self>> {
        Self::new(ValueKind::Counter, name, help, labels)
    }

    /// Declare a gauge with one series per state of `S`.
    ///
    /// The state label is appended after `labels`.
    pub fn state_set<S: StateSet>(name: &str, help: &str, labels: &[&str]) -> Result<Arc<Self>> {
        let mut labels = labels.to_vec();
        labels.push(S::LABEL);
        Self::new(ValueKind::Gauge, name, help, &labels)
    }

    /// Fully-qualified metric name.
    pub fn fq_name(&self) -> &str {
        &self.desc.fq_name
    }

    /// Help text shown in the `# HELP` line.
    pub fn help(&self) -> &str {
        &self.desc.help
    }

    /// Variable label names, in the order label values are given.
    pub fn label_names(&self) -> &[String] {
        &self.desc.variable_labels
    }

    /// Gauge or counter.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Produce an observation of this metric.
    pub fn observe<I, V>(self: &Arc<Self>, value: f64, label_values: I) -> Observation
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Observation {
            desc: Arc::clone(self),
            label_values: label_values.into_iter().map(Into::into).collect(),
            value,
        }
    }
}

impl PartialEq for MetricDesc {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.desc.fq_name == other.desc.fq_name
            && self.desc.help == other.desc.help
            && self.desc.variable_labels == other.desc.variable_labels
    }
}

impl Eq for MetricDesc {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Power {
        On,
        Off,
    }

    impl StateSet for Power {
        const LABEL: &'static str = "power";
        const ALL: &'static [Self] = &[Power::On, Power::Off];

        fn as_str(&self) -> &'static str {
            match self {
                Power::On => "on",
                Power::Off => "off",
            }
        }
    }

    #[test]
    fn test_gauge_descriptor() {
        let desc = MetricDesc::gauge("digitalocean_test_up", "Test metric", &["id", "name"]).unwrap();
        assert_eq!(desc.fq_name(), "digitalocean_test_up");
        assert_eq!(desc.help(), "Test metric");
        assert_eq!(desc.label_names(), &["id".to_string(), "name".to_string()]);
        assert_eq!(desc.kind(), ValueKind::Gauge);
    }

    #[test]
    fn test_state_set_appends_label() {
        let desc = MetricDesc::state_set::<Power>("digitalocean_test_power", "Power", &["id"]).unwrap();
        assert_eq!(desc.label_names(), &["id".to_string(), "power".to_string()]);
    }

    #[test]
    fn test_malformed_descriptors_are_rejected() {
        assert!(MetricDesc::gauge("digitalocean test", "bad name", &[]).is_err());
        assert!(MetricDesc::gauge("digitalocean_test", "bad label", &["bad-label"]).is_err());
        assert!(MetricDesc::gauge("digitalocean_test", "", &[]).is_err());
    }

    #[test]
    fn test_observe_carries_labels() {
        let desc = MetricDesc::counter("digitalocean_test_total", "Counter", &["id"]).unwrap();
        let observation = desc.observe(3.0, ["abc"]);
        assert_eq!(observation.label_values, vec!["abc".to_string()]);
        assert_eq!(observation.value, 3.0);
        assert_eq!(observation.desc.kind(), ValueKind::Counter);
    }
}
