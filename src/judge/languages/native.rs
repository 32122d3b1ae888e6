use crate::config::types::Toolchain;
use crate::judge::adapter::{path_arg, JudgeAdapter};
use std::path::Path;

/// Prebuilt executables and scripts with a shebang line.
#[derive(Debug, Clone, Default)]
pub struct NativeAdapter;

impl JudgeAdapter for NativeAdapter {
    fn language(&self) -> &'static str {
        "native"
    }

    fn compile_command(
        &self,
        _toolchain: &Toolchain,
        _source: &Path,
        _binary: &Path,
    ) -> Option<Vec<String>> {
        None
    }

    fn run_command(&self, _toolchain: &Toolchain, source: &Path, _binary: &Path) -> Vec<String> {
        vec![path_arg(source)]
    }
}
