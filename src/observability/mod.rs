//! Observability
//!
//! Terminal logging for the driver and roles, plus machine-readable summaries.

pub mod logging;
pub mod report;
