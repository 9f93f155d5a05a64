//! One-series-per-state encoding for enum fields.

use crate::metrics::descriptor::MetricDesc;
use crate::metrics::observation::Observation;
use std::sync::Arc;

/// A closed set of named states a resource can be in.
pub trait StateSet: Copy + PartialEq + Sized + 'static {
    /// Label holding the state name.
    const LABEL: &'static str;

    /// Every state, in exposition order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    /// Look up a state by its API name.
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|state| state.as_str() == value)
    }
}

/// Emit one observation per state: 1 for `current`, 0 for the rest.
///
/// An unrecognised state (`None`) yields all zeros.
pub fn observe_states<S: StateSet>(
    desc: &Arc<MetricDesc>,
    labels: &[String],
    current: Option<S>,
    out: &mut Vec<Observation>,
) {
    for state in S::ALL {
        let value = if Some(*state) == current { 1.0 } else { 0.0 };
        let label_values = labels
            .iter()
            .cloned()
            .chain(std::iter::once(state.as_str().to_string()));
        out.push(desc.observe(value, label_values));
    }
}
