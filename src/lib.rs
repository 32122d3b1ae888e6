//! cpjudge: a judge-harness protocol, its test programs, and a local judge driver
//!
//! # Architecture
//!
//! ## Harness Roles ([`roles`])
//! - [`roles::noise`]: echo that occasionally answers `0`
//! - [`roles::stub`]: solution stub whose input selects OK, crash, timeout or echo
//! - [`roles::checker`]: special judge for permutations of `1..=n`
//! - [`roles::permgen`]: permutation generator with a sentinel bad answer
//! - [`roles::tokens`]: lazy integer token stream over stdin
//!
//! ## Evidence & Verdict ([`verdict`])
//! - [`verdict::protocol`]: exit status protocol shared by roles and driver
//! - [`verdict::verdict`]: driver verdicts and their classification
//!
//! ## Execution Control ([`exec`])
//! - [`exec::runner`]: child launch with wall clock limit and peak memory
//!
//! ## Judge Driver ([`judge`])
//! - [`judge::registry`]: source extension to language adapter
//! - [`judge::compiler`]: compile sources into the run workspace
//! - [`judge::compare`]: token-wise answer comparison
//! - [`judge::testcases`]: `*.in` / `*.out` discovery
//! - [`judge::tester`]: run, judge and hack loops
//!
//! ## Safety ([`safety`])
//! - [`safety::workspace`]: run-scoped temporary directory
//!
//! ## Observability ([`observability`])
//! - [`observability::logging`]: `[LEVEL] message` logger
//! - [`observability::report`]: JSON summaries
//!
//! ## Configuration ([`config`])
//! - [`config::config`]: `cpjudge.json` loading and validation
//! - [`config::types`]: error type, toolchain and limits
//! - [`config::presets`]: compiler presets and defaults

// Harness roles
pub mod roles;

// Evidence & Verdict
pub mod verdict;

// Execution Control
pub mod exec;

// Judge driver (language adapters, testcases, run/judge/hack)
pub mod judge;

// Safety
pub mod safety;

// Observability
pub mod observability;

// Configuration
pub mod config;

// Utilities
pub mod utils;

// CLI entrypoint wiring shared by the driver and role binaries.
pub mod cli;

pub use config::types::{JudgeError, Result};
