//! Verdicts
//!
//! The exit-status protocol spoken by the harness roles, and the judge
//! driver's classification of reaped processes.

pub mod protocol;
pub mod verdict;

pub use protocol::ExitVerdict;
pub use verdict::{JudgeResult, Verdict, VerdictClassifier};
