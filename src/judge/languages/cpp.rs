use crate::config::types::Toolchain;
use crate::judge::adapter::{path_arg, JudgeAdapter};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct CppAdapter;

impl JudgeAdapter for CppAdapter {
    fn language(&self) -> &'static str {
        "cpp"
    }

    fn compile_command(
        &self,
        toolchain: &Toolchain,
        source: &Path,
        binary: &Path,
    ) -> Option<Vec<String>> {
        let mut cmd = toolchain.cpp_compiler.clone();
        cmd.extend(toolchain.cpp_flags.iter().cloned());
        cmd.push(path_arg(source));
        cmd.push("-o".to_string());
        cmd.push(path_arg(binary));
        Some(cmd)
    }

    fn run_command(&self, _toolchain: &Toolchain, _source: &Path, binary: &Path) -> Vec<String> {
        vec![path_arg(binary)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn compile_places_flags_before_source() {
        let toolchain = Toolchain::default();
        let cmd = CppAdapter
            .compile_command(&toolchain, &PathBuf::from("/w/a.cpp"), &PathBuf::from("/t/test.bin"))
            .unwrap();
        assert_eq!(
            cmd,
            vec!["g++", "-std=c++20", "-O2", "-DONLINE_JUDGE", "/w/a.cpp", "-o", "/t/test.bin"]
        );
        assert_eq!(
            CppAdapter.run_command(&toolchain, Path::new("/w/a.cpp"), Path::new("/t/test.bin")),
            vec!["/t/test.bin"]
        );
    }
}
