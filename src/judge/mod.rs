//! Local judge driver.
//!
//! Sources are turned into launchable programs by per-language adapters, then
//! [`tester::Tester`] runs them over testcase directories, compares against
//! answers or a special judge, and hunts for failing inputs with a generator.

pub mod adapter;
pub mod compare;
pub mod compiler;
pub mod languages;
pub mod registry;
pub mod testcases;
pub mod tester;

pub use compiler::{Compiler, PreparedProgram};
pub use tester::{HackOracle, HackReport, HackStatus, RunSummary, Tester};
