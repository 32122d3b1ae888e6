/// Verdict classification
///
/// Verdicts are pure functions over the outcome of a reaped process; nothing
/// here touches the filesystem or spawns anything.
use crate::exec::runner::ProcessOutcome;
use crate::utils::ansi;
use crate::verdict::protocol::ExitVerdict;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Judge driver taxonomy
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    /// Output matched the answer or the special judge accepted it
    #[serde(rename = "AC")]
    Accepted,
    /// Program ran to completion; nothing was compared
    #[serde(rename = "OK")]
    Finished,
    #[serde(rename = "WA")]
    WrongAnswer,
    #[serde(rename = "CE")]
    CompileError,
    /// Non-zero exit or fatal signal
    #[serde(rename = "RE")]
    RuntimeError,
    #[serde(rename = "TLE")]
    TimeLimitExceeded,
    #[serde(rename = "MLE")]
    MemoryLimitExceeded,
    #[serde(rename = "UKE")]
    UnknownError,
    #[serde(rename = "UFT")]
    UnknownFileType,
    #[serde(rename = "UFE")]
    UnknownFileEncoding,
    #[serde(rename = "NSF")]
    NoSuchFileOrDirectory,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::Finished => "Finished",
            Self::WrongAnswer => "Wrong Answer",
            Self::CompileError => "Compile Error",
            Self::RuntimeError => "Runtime Error",
            Self::TimeLimitExceeded => "Time Limit Exceeded",
            Self::MemoryLimitExceeded => "Memory Limit Exceeded",
            Self::UnknownError => "Unknown Error",
            Self::UnknownFileType => "Unknown File Type",
            Self::UnknownFileEncoding => "Unknown File Encoding",
            Self::NoSuchFileOrDirectory => "No Such File Or Directory",
        }
    }

    /// Coloured label for terminal output
    pub fn format(self) -> String {
        let color = match self {
            Self::Accepted | Self::Finished => ansi::GREEN,
            Self::WrongAnswer => ansi::RED,
            Self::RuntimeError => ansi::MAGENTA,
            Self::TimeLimitExceeded | Self::MemoryLimitExceeded => ansi::BLUE,
            _ => ansi::BOLD_RED,
        };
        ansi::paint(color, self.label())
    }
}

/// Outcome of one judged step
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct JudgeResult {
    pub verdict: Verdict,
    pub message: String,
    /// Wall time in seconds
    pub time_used: f64,
    /// Peak resident set size in KiB
    pub memory_used_kb: u64,
}

impl JudgeResult {
    pub fn new(verdict: Verdict) -> Self {
        Self {
            verdict,
            message: String::new(),
            time_used: 0.0,
            memory_used_kb: 0,
        }
    }

    pub fn with_message(verdict: Verdict, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::new(verdict)
        }
    }

    pub fn good(&self) -> bool {
        matches!(self.verdict, Verdict::Accepted | Verdict::Finished)
    }

    pub fn time_ms(&self) -> u64 {
        (self.time_used * 1000.0) as u64
    }

    pub fn format(&self) -> String {
        let mut res = self.verdict.format();
        if !self.message.is_empty() {
            res.push(' ');
            res.push_str(&self.message.replace('\n', " "));
        }
        let ms = self.time_ms().to_string();
        match self.verdict {
            Verdict::Accepted | Verdict::Finished => {
                res.push_str(&format!(" Executed in {} ms", ansi::green(&ms)));
            }
            Verdict::WrongAnswer => {
                res.push_str(&format!(" Executed in {} ms", ansi::red(&ms)));
            }
            _ => {}
        }
        res
    }
}

/// Verdict classifier - pure functions over process outcomes
pub struct VerdictClassifier;

impl VerdictClassifier {
    /// Classify a plain run of a program under test, generator or standard solution.
    pub fn classify_run(
        outcome: &ProcessOutcome,
        time_limit: Duration,
        memory_limit_kb: Option<u64>,
    ) -> JudgeResult {
        let mut result = if outcome.timed_out {
            JudgeResult {
                time_used: time_limit.as_secs_f64(),
                ..JudgeResult::new(Verdict::TimeLimitExceeded)
            }
        } else if memory_limit_kb.is_some_and(|limit| outcome.peak_memory_kb > limit) {
            JudgeResult::with_message(
                Verdict::MemoryLimitExceeded,
                format!("peak {} KiB", outcome.peak_memory_kb),
            )
        } else {
            match (outcome.exit_code, outcome.signal) {
                (Some(0), None) => JudgeResult::new(Verdict::Finished),
                (None, None) => {
                    JudgeResult::with_message(Verdict::UnknownError, "no exit status recorded")
                }
                _ => JudgeResult::with_message(Verdict::RuntimeError, Self::describe_exit(outcome)),
            }
        };

        if !outcome.timed_out {
            result.time_used = outcome.wall_time.as_secs_f64();
        }
        result.memory_used_kb = outcome.peak_memory_kb;
        result
    }

    /// Classify a special judge run from its exit status and what it printed.
    pub fn classify_special_judge(
        outcome: &ProcessOutcome,
        time_limit: Duration,
        checker_output: &str,
    ) -> JudgeResult {
        if outcome.timed_out {
            return JudgeResult {
                time_used: time_limit.as_secs_f64(),
                ..JudgeResult::new(Verdict::TimeLimitExceeded)
            };
        }

        let message = checker_output.trim_end();
        let mut result = match ExitVerdict::from_status(outcome.exit_code, outcome.signal) {
            ExitVerdict::Accept => JudgeResult::with_message(Verdict::Accepted, message),
            ExitVerdict::Reject => JudgeResult::with_message(Verdict::WrongAnswer, message),
            ExitVerdict::Malformed => JudgeResult::with_message(
                Verdict::RuntimeError,
                "special judge could not parse its input",
            ),
            ExitVerdict::Crash => {
                JudgeResult::with_message(Verdict::RuntimeError, Self::describe_exit(outcome))
            }
        };
        result.time_used = outcome.wall_time.as_secs_f64();
        result.memory_used_kb = outcome.peak_memory_kb;
        result
    }

    /// Human readable exit status, e.g. `exit status 3` or `killed by signal SIGABRT`.
    pub fn describe_exit(outcome: &ProcessOutcome) -> String {
        if let Some(sig) = outcome.signal {
            let name = nix::sys::signal::Signal::try_from(sig)
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|_| format!("signal {sig}"));
            return format!("killed by signal {name}");
        }
        match outcome.exit_code {
            Some(code) => format!("exit status {code}"),
            None => "unknown termination".to_string(),
        }
    }
}
