use crate::config::types::Toolchain;
use crate::judge::adapter::{path_arg, JudgeAdapter};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct CAdapter;

impl JudgeAdapter for CAdapter {
    fn language(&self) -> &'static str {
        "c"
    }

    fn compile_command(
        &self,
        toolchain: &Toolchain,
        source: &Path,
        binary: &Path,
    ) -> Option<Vec<String>> {
        let mut cmd = toolchain.c_compiler.clone();
        cmd.extend(toolchain.c_flags.iter().cloned());
        cmd.extend([path_arg(source), "-o".to_string(), path_arg(binary)]);
        Some(cmd)
    }

    fn run_command(&self, _toolchain: &Toolchain, _source: &Path, binary: &Path) -> Vec<String> {
        vec![path_arg(binary)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_c_toolchain() {
        let mut toolchain = Toolchain::default();
        toolchain.c_compiler = vec!["clang".to_string()];
        let cmd = CAdapter
            .compile_command(&toolchain, Path::new("x.c"), Path::new("x.bin"))
            .unwrap();
        assert_eq!(cmd[0], "clang");
        assert!(cmd.contains(&"-std=c11".to_string()));
        assert_eq!(cmd[cmd.len() - 2..], ["-o".to_string(), "x.bin".to_string()]);
    }
}
