//! Execution control
//!
//! Launching judged programs as plain child processes under a wall clock limit.

pub mod runner;

pub use runner::{launch, ProcessOutcome, ProcessSpec};
