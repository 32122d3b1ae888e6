//! Exit-status protocol shared by every harness role and the judge driver.
//!
//! | status            | meaning                                   |
//! |-------------------|-------------------------------------------|
//! | exit 0            | [`ExitVerdict::Accept`]                   |
//! | exit 1            | [`ExitVerdict::Reject`]                   |
//! | exit 2            | [`ExitVerdict::Malformed`]                |
//! | other exit/signal | [`ExitVerdict::Crash`]                    |
//!
//! Roles that simply produce output (generator, noise injector, stub) report
//! `Accept` when they finish normally.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitVerdict {
    /// Normal completion, or the checked answer is correct
    #[serde(rename = "accept")]
    Accept,
    /// The checked answer is wrong
    #[serde(rename = "reject")]
    Reject,
    /// The role's own input was missing or not made of integers
    #[serde(rename = "malformed")]
    Malformed,
    /// Abnormal termination: a signal or any unlisted exit status
    #[serde(rename = "crash")]
    Crash,
}

impl ExitVerdict {
    pub const ACCEPT_CODE: i32 = 0;
    pub const REJECT_CODE: i32 = 1;
    pub const MALFORMED_CODE: i32 = 2;

    /// Exit status to terminate with. `Crash` has none: it is raised as an abort.
    pub const fn code(self) -> Option<i32> {
        match self {
            Self::Accept => Some(Self::ACCEPT_CODE),
            Self::Reject => Some(Self::REJECT_CODE),
            Self::Malformed => Some(Self::MALFORMED_CODE),
            Self::Crash => None,
        }
    }

    /// Classify a reaped child from its exit code or terminating signal.
    pub fn from_status(exit_code: Option<i32>, signal: Option<i32>) -> Self {
        if signal.is_some() {
            return Self::Crash;
        }
        match exit_code {
            Some(Self::ACCEPT_CODE) => Self::Accept,
            Some(Self::REJECT_CODE) => Self::Reject,
            Some(Self::MALFORMED_CODE) => Self::Malformed,
            _ => Self::Crash,
        }
    }
}
