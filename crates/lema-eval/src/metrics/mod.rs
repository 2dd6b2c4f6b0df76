//! Metric values and the statistics used to compute them

pub mod stats;
mod types;

pub use types::{MetricMap, MetricValue};
