//! Observations produced fresh on every scrape.

use crate::metrics::descriptor::{MetricDesc, ValueKind};
use prometheus::proto::{Counter, Gauge, LabelPair, Metric};
use std::sync::Arc;

/// One data point: a descriptor, its label values and a value.
#[derive(Debug, Clone)]
pub struct Observation {
    pub desc: Arc<MetricDesc>,
    pub label_values: Vec<String>,
    pub value: f64,
}

impl Observation {
    /// Value of the label called `name`, if the descriptor declares it.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.desc
            .label_names()
            .iter()
            .position(|label| label == name)
            .and_then(|index| self.label_values.get(index))
            .map(String::as_str)
    }

    pub(crate) fn to_metric(&self) -> Metric {
        let mut metric = Metric::default();
        for (name, value) in self.desc.label_names().iter().zip(&self.label_values) {
            let mut pair = LabelPair::default();
            pair.set_name(name.clone());
            pair.set_value(value.clone());
            metric.mut_label().push(pair);
        }

        match self.desc.kind() {
            ValueKind::Gauge => {
                let mut gauge = Gauge::default();
                gauge.set_value(self.value);
                metric.set_gauge(gauge);
            }
            ValueKind::Counter => {
                let mut counter = Counter::default();
                counter.set_value(self.value);
                metric.set_counter(counter);
            }
        }

        metric
    }
}
