//! Configuration loading from cpjudge.json

use crate::config::presets::{
    DEFAULT_CONFIG_FILE, DEFAULT_SPECIAL_TIME_LIMIT_SECS, DEFAULT_TESTCASE_DIR,
    DEFAULT_TIME_LIMIT_SECS,
};
use crate::config::types::{JudgeError, Result, RunLimits, Toolchain};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Full cpjudge.json structure. Every field is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JudgeConfig {
    pub toolchain: Toolchain,
    pub time_limit_secs: f64,
    pub special_time_limit_secs: f64,
    pub testcase_dir: PathBuf,
    pub show_stderr: bool,
    pub memory_limit_mb: Option<u64>,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            toolchain: Toolchain::default(),
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            special_time_limit_secs: DEFAULT_SPECIAL_TIME_LIMIT_SECS,
            testcase_dir: PathBuf::from(DEFAULT_TESTCASE_DIR),
            show_stderr: true,
            memory_limit_mb: None,
        }
    }
}

impl JudgeConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            JudgeError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: JudgeConfig = serde_json::from_str(&content)
            .map_err(|e| JudgeError::Config(format!("Failed to parse config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit path wins; otherwise `./cpjudge.json` if present; otherwise defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        let implicit = Path::new(DEFAULT_CONFIG_FILE);
        if implicit.is_file() {
            log::debug!("Using {}", implicit.display());
            return Self::load_from_file(implicit);
        }

        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        for (name, secs) in [
            ("time_limit_secs", self.time_limit_secs),
            ("special_time_limit_secs", self.special_time_limit_secs),
        ] {
            seconds(name, secs)?;
        }

        let toolchain = &self.toolchain;
        for (name, cmd) in [
            ("cpp_compiler", &toolchain.cpp_compiler),
            ("c_compiler", &toolchain.c_compiler),
            ("python_interpreter", &toolchain.python_interpreter),
        ] {
            if cmd.is_empty() {
                return Err(JudgeError::Config(format!("toolchain.{name} must not be empty")));
            }
        }

        Ok(())
    }

    /// Limits for one action; the time and memory limits may be overridden per command.
    pub fn run_limits(
        &self,
        time_limit_secs: Option<f64>,
        memory_limit_mb: Option<u64>,
    ) -> Result<RunLimits> {
        let secs = time_limit_secs.unwrap_or(self.time_limit_secs);
        let memory_limit_kb = match memory_limit_mb.or(self.memory_limit_mb) {
            Some(mb) => Some(mb.checked_mul(1024).ok_or_else(|| {
                JudgeError::Config(format!("memory limit of {mb} MB is too large"))
            })?),
            None => None,
        };

        Ok(RunLimits {
            time_limit: seconds("time limit", secs)?,
            special_time_limit: seconds("special_time_limit_secs", self.special_time_limit_secs)?,
            memory_limit_kb,
            show_stderr: self.show_stderr,
        })
    }
}

/// A positive, representable number of seconds.
fn seconds(name: &str, secs: f64) -> Result<Duration> {
    if secs <= 0.0 {
        return Err(JudgeError::Config(format!(
            "{name} must be a positive number of seconds, got {secs}"
        )));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| JudgeError::Config(format!("{name} of {secs} seconds is invalid: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"time_limit_secs": 2.5, "toolchain": {{"cpp_compiler": ["clang++"]}}}}"#
        )
        .unwrap();

        let config = JudgeConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.time_limit_secs, 2.5);
        assert_eq!(config.toolchain.cpp_compiler, vec!["clang++"]);
        assert_eq!(config.toolchain.c_compiler, vec!["gcc"]);
        assert_eq!(config.testcase_dir, PathBuf::from("testcases"));
        assert!(config.show_stderr);
    }

    #[test]
    fn rejects_non_positive_limits() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"special_time_limit_secs": 0}}"#).unwrap();

        let err = JudgeConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, JudgeError::Config(_)));
    }

    #[test]
    fn rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(JudgeConfig::load_from_file(file.path()).is_err());
    }

    #[test]
    fn run_limits_apply_override_and_memory() {
        let config = JudgeConfig {
            memory_limit_mb: Some(256),
            ..JudgeConfig::default()
        };
        let limits = config.run_limits(Some(0.5), None).unwrap();
        assert_eq!(limits.time_limit, Duration::from_millis(500));
        assert_eq!(limits.memory_limit_kb, Some(256 * 1024));
        assert!(config.run_limits(Some(-1.0), None).is_err());

        let limits = config.run_limits(None, Some(64)).unwrap();
        assert_eq!(limits.time_limit, Duration::from_secs(1));
        assert_eq!(limits.memory_limit_kb, Some(64 * 1024));
    }

    #[test]
    fn oversized_limits_are_config_errors() {
        let config = JudgeConfig::default();
        for secs in [1e30, f64::INFINITY, f64::NAN] {
            assert!(matches!(
                config.run_limits(Some(secs), None),
                Err(JudgeError::Config(_))
            ));
        }
        assert!(matches!(
            config.run_limits(None, Some(u64::MAX)),
            Err(JudgeError::Config(_))
        ));

        let huge = JudgeConfig {
            time_limit_secs: 1e30,
            ..JudgeConfig::default()
        };
        assert!(matches!(huge.validate(), Err(JudgeError::Config(_))));
    }
}
