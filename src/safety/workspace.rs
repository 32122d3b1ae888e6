/// Workspace management for run-scoped artifacts
///
/// Compiled binaries, captured outputs and merged checker inputs of one
/// invocation live in a private temporary directory that is removed on drop.
use crate::config::types::{JudgeError, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uuid::Uuid;

pub struct Workspace {
    run_id: String,
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace under the system temp directory
    pub fn new() -> Result<Self> {
        let run_id = Uuid::new_v4().to_string();
        let dir = tempfile::Builder::new()
            .prefix(&format!("cpjudge_{}_", &run_id[..8]))
            .tempdir()
            .map_err(|e| {
                JudgeError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create workspace directory: {}", e),
                ))
            })?;
        log::debug!("workspace {} at {}", run_id, dir.path().display());
        Ok(Self { run_id, dir })
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a named artifact inside the workspace
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Concatenate files into one workspace artifact, each followed by a newline.
    pub fn merge_files(&self, parts: &[&Path], name: &str) -> Result<PathBuf> {
        let target = self.path(name);
        let mut merged = Vec::new();
        for part in parts {
            merged.extend_from_slice(&std::fs::read(part)?);
            merged.push(b'\n');
        }
        std::fs::write(&target, merged)?;
        Ok(target)
    }
}
