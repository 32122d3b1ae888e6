//! Testcase discovery: `*.in` files paired with sibling `*.out` answers.

use crate::config::types::{JudgeError, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Testcase {
    pub input: PathBuf,
    pub answer: Option<PathBuf>,
}

impl Testcase {
    pub fn name(&self) -> String {
        self.input
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.input.display().to_string())
    }
}

/// Recursively collect `*.in` files under `dir`, sorted by path.
///
/// With `touch_out`, a missing `.out` is created empty so output can be saved
/// into it; otherwise the testcase has no answer.
pub fn discover(dir: &Path, touch_out: bool) -> Result<Vec<Testcase>> {
    if !dir.is_dir() {
        return Err(JudgeError::NotFound(dir.to_path_buf()));
    }

    let mut inputs = Vec::new();
    collect_inputs(dir, &mut inputs)?;
    inputs.sort();

    let mut cases = Vec::with_capacity(inputs.len());
    for input in inputs {
        let answer = input.with_extension("out");
        let answer = if answer.exists() {
            Some(answer)
        } else if touch_out {
            fs::File::create(&answer)?;
            Some(answer)
        } else {
            None
        };
        cases.push(Testcase { input, answer });
    }
    Ok(cases)
}

fn collect_inputs(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_inputs(&path, found)?;
        } else if path.extension().is_some_and(|ext| ext == "in") {
            found.push(path);
        }
    }
    Ok(())
}

/// Smallest positive `id` such that `<prefix><id><suffix>` does not exist in
/// `dir`. Creates `dir` when missing.
pub fn find_available_id(dir: &Path, prefix: &str, suffix: &str) -> Result<u64> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let mut id = 1u64;
    while dir.join(format!("{prefix}{id}{suffix}")).exists() {
        id += 1;
    }
    Ok(id)
}
