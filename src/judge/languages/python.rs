use crate::config::types::Toolchain;
use crate::judge::adapter::{path_arg, JudgeAdapter};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct PythonAdapter;

impl JudgeAdapter for PythonAdapter {
    fn language(&self) -> &'static str {
        "python"
    }

    fn compile_command(
        &self,
        _toolchain: &Toolchain,
        _source: &Path,
        _binary: &Path,
    ) -> Option<Vec<String>> {
        None
    }

    fn run_command(&self, toolchain: &Toolchain, source: &Path, _binary: &Path) -> Vec<String> {
        let mut cmd = toolchain.python_interpreter.clone();
        cmd.extend(toolchain.python_flags.iter().cloned());
        cmd.push(path_arg(source));
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpreter_flags_precede_script() {
        let mut toolchain = Toolchain::default();
        toolchain.python_interpreter = vec!["python3".to_string()];
        toolchain.python_flags = vec!["-B".to_string()];

        assert!(PythonAdapter
            .compile_command(&toolchain, Path::new("gen.py"), Path::new("gen.bin"))
            .is_none());
        assert_eq!(
            PythonAdapter.run_command(&toolchain, Path::new("gen.py"), Path::new("gen.bin")),
            vec!["python3", "-B", "gen.py"]
        );
    }
}
