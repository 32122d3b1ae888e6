/// Toolchain presets and driver defaults
///
/// Flags mirror what online judges typically compile with, including the
/// `ONLINE_JUDGE` define so solutions can strip local debugging code.
use crate::config::types::Toolchain;

/// Default wall clock limit per testcase, in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: f64 = 1.0;

/// Floor for generators, standard solutions and special judges, in seconds.
pub const DEFAULT_SPECIAL_TIME_LIMIT_SECS: f64 = 60.0;

/// Directory scanned for `*.in` / `*.out` pairs.
pub const DEFAULT_TESTCASE_DIR: &str = "testcases";

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "cpjudge.json";

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_toolchain() -> Toolchain {
    Toolchain {
        cpp_compiler: words(&["g++"]),
        cpp_flags: words(&["-std=c++20", "-O2", "-DONLINE_JUDGE"]),
        c_compiler: words(&["gcc"]),
        c_flags: words(&["-std=c11", "-O2", "-DONLINE_JUDGE"]),
        python_interpreter: words(&["python"]),
        python_flags: Vec::new(),
    }
}

/// Split a flag string the way a shell would for simple, unquoted input.
pub fn split_flags(flags: &str) -> Vec<String> {
    flags.split_whitespace().map(str::to_string).collect()
}
