//! Configuration
//!
//! Config file loading, toolchain presets and shared types.

pub mod config;
pub mod presets;
pub mod types;
