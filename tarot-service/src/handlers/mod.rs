//! HTTP handlers for the tarot service.

pub mod health;
pub mod metrics;
pub mod tarot;

pub use health::{health_check, readiness_check};
pub use metrics::metrics_endpoint;
pub use tarot::get_tarot_reading;
