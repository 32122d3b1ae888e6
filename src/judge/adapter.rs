use crate::config::types::Toolchain;
use std::path::Path;

/// Judge adapter contract for language-specific build/run commands.
pub trait JudgeAdapter: Send + Sync {
    fn language(&self) -> &'static str;

    /// Build command, or `None` when the source runs as-is.
    fn compile_command(&self, toolchain: &Toolchain, source: &Path, binary: &Path)
        -> Option<Vec<String>>;

    fn run_command(&self, toolchain: &Toolchain, source: &Path, binary: &Path) -> Vec<String>;
}

pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
