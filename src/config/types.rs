/// Core error and settings types shared by the harness roles and the judge driver
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the library.
#[derive(Error, Debug)]
pub enum JudgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended early or carried a token that is not an integer.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Process error: {0}")]
    Process(String),

    #[error("Unsupported source file: {}", .0.display())]
    UnsupportedSource(PathBuf),

    #[error("No such file or directory: {}", .0.display())]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, JudgeError>;

/// Command prefixes used to build or interpret submitted sources.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Toolchain {
    pub cpp_compiler: Vec<String>,
    pub cpp_flags: Vec<String>,
    pub c_compiler: Vec<String>,
    pub c_flags: Vec<String>,
    pub python_interpreter: Vec<String>,
    pub python_flags: Vec<String>,
}

impl Default for Toolchain {
    fn default() -> Self {
        crate::config::presets::default_toolchain()
    }
}

/// Limits and switches applied to every judged process.
#[derive(Clone, Debug, PartialEq)]
pub struct RunLimits {
    /// Wall clock limit for the program under test
    pub time_limit: Duration,
    /// Floor applied to generators, standard solutions and special judges
    pub special_time_limit: Duration,
    /// Peak resident memory above this is reported as MLE
    pub memory_limit_kb: Option<u64>,
    /// Forward child stderr to ours instead of discarding it
    pub show_stderr: bool,
}

impl RunLimits {
    /// Time limit for helper programs: never shorter than the regular limit.
    pub fn special(&self) -> Duration {
        self.time_limit.max(self.special_time_limit)
    }
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs_f64(crate::config::presets::DEFAULT_TIME_LIMIT_SECS),
            special_time_limit: Duration::from_secs_f64(
                crate::config::presets::DEFAULT_SPECIAL_TIME_LIMIT_SECS,
            ),
            memory_limit_kb: None,
            show_stderr: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_limit_never_below_regular_limit() {
        let mut limits = RunLimits::default();
        assert_eq!(limits.special(), Duration::from_secs(60));

        limits.time_limit = Duration::from_secs(90);
        assert_eq!(limits.special(), Duration::from_secs(90));
    }

    #[test]
    fn error_messages_name_the_path() {
        let err = JudgeError::NotFound(PathBuf::from("sol.cpp"));
        assert_eq!(err.to_string(), "No such file or directory: sol.cpp");
    }
}
