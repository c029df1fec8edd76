//! Threshold evaluation and rate-limited alerting for monitored entities.
//!
//! [`policy`] classifies a sample against an entity's configured bounds,
//! [`gate::SuppressionGate`] rate-limits alert delivery per suppression
//! scope over the durable state store, and [`engine::MonitorEngine`]
//! orchestrates one monitoring cycle across all configured entities.

pub mod engine;
pub mod gate;
pub mod policy;


/// Errors produced while evaluating a sample.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    /// The sample value is NaN or infinite and cannot be classified.
    #[error("invalid sample for '{entity}': {value} is not a finite number")]
    InvalidSample { entity: String, value: f64 },
}
