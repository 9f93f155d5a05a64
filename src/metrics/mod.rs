//! The collector framework.
//!
//! Each resource collector declares a fixed set of [`MetricDesc`]s at
//! construction and turns a fresh API listing into [`Observation`]s on every
//! scrape. The [`Registry`] runs all collectors and merges their output into
//! metric families for the text exposition format.

pub mod deadline;
pub mod descriptor;
pub mod observation;
pub mod registry;
pub mod state;
pub mod traits;

// Re-export commonly used items
pub use deadline::Deadline;
pub use descriptor::{MetricDesc, ValueKind};
pub use observation::Observation;
pub use registry::{encode_text, text_content_type, Registry};
pub use state::{observe_states, StateSet};
pub use traits::Collector;
