use crate::config::types::{JudgeError, Toolchain};
use crate::judge::registry::adapter_for;
use crate::safety::Workspace;
use crate::verdict::{JudgeResult, Verdict};
use std::path::Path;
use std::process::Command;

/// A source turned into something the runner can launch.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedProgram {
    /// Display name, usually the source file name
    pub name: String,
    pub language: &'static str,
    pub argv: Vec<String>,
}

impl PreparedProgram {
    pub fn new(name: impl Into<String>, language: &'static str, argv: Vec<String>) -> Self {
        Self {
            name: name.into(),
            language,
            argv,
        }
    }
}

/// Builds sources into the workspace using the configured toolchain.
pub struct Compiler {
    toolchain: Toolchain,
}

impl Compiler {
    pub fn new(toolchain: Toolchain) -> Self {
        Self { toolchain }
    }

    /// Compile (if needed) `source` to `<workspace>/<artifact>` and return the
    /// launch command. Failures come back as the verdict to report.
    pub fn prepare(
        &self,
        source: &Path,
        artifact: &str,
        workspace: &Workspace,
    ) -> Result<PreparedProgram, JudgeResult> {
        let display = source
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| source.display().to_string());

        if !source.exists() {
            return Err(JudgeResult::new(Verdict::NoSuchFileOrDirectory));
        }
        // Absolute paths keep native programs from being looked up on PATH.
        let source = std::fs::canonicalize(source)
            .map_err(|e| JudgeResult::with_message(Verdict::UnknownError, e.to_string()))?;

        let adapter = adapter_for(&source).map_err(|e| match e {
            JudgeError::UnsupportedSource(_) => JudgeResult::new(Verdict::UnknownFileType),
            other => JudgeResult::with_message(Verdict::UnknownError, other.to_string()),
        })?;

        let binary = workspace.path(artifact);
        if let Some(cmd) = adapter.compile_command(&self.toolchain, &source, &binary) {
            log::info!("Compiling {}...", display);
            Self::compile(&cmd)?;
        }

        Ok(PreparedProgram::new(
            display,
            adapter.language(),
            adapter.run_command(&self.toolchain, &source, &binary),
        ))
    }

    fn compile(cmd: &[String]) -> Result<(), JudgeResult> {
        let (program, args) = cmd
            .split_first()
            .ok_or_else(|| JudgeResult::with_message(Verdict::CompileError, "empty compiler command"))?;
        log::debug!("running {:?}", cmd);

        let status = Command::new(program).args(args).status().map_err(|e| {
            JudgeResult::with_message(Verdict::CompileError, format!("failed to start {program}: {e}"))
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(JudgeResult::new(Verdict::CompileError))
        }
    }
}
