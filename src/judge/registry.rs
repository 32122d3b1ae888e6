use crate::config::types::{JudgeError, Result};
use crate::judge::adapter::JudgeAdapter;
use crate::judge::languages::{
    c::CAdapter, cpp::CppAdapter, native::NativeAdapter, python::PythonAdapter,
};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

const CPP_EXTENSIONS: [&str; 5] = ["cpp", "cc", "cxx", "c++", "cplusplus"];

/// Pick an adapter from the source file's extension. Files with an unknown
/// extension still run when they carry an executable bit.
pub fn adapter_for(source: &Path) -> Result<Box<dyn JudgeAdapter>> {
    let extension = source.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    match extension {
        ext if CPP_EXTENSIONS.contains(&ext) => Ok(Box::new(CppAdapter)),
        "c" => Ok(Box::new(CAdapter)),
        "py" => Ok(Box::new(PythonAdapter)),
        _ if is_executable(source) => Ok(Box::new(NativeAdapter)),
        _ => Err(JudgeError::UnsupportedSource(source.to_path_buf())),
    }
}

fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_map_to_languages() {
        assert_eq!(adapter_for(Path::new("a.cpp")).unwrap().language(), "cpp");
        assert_eq!(adapter_for(Path::new("a.cc")).unwrap().language(), "cpp");
        assert_eq!(adapter_for(Path::new("a.c++")).unwrap().language(), "cpp");
        assert_eq!(adapter_for(Path::new("a.c")).unwrap().language(), "c");
        assert_eq!(adapter_for(Path::new("gen.py")).unwrap().language(), "python");
    }

    #[test]
    fn executable_without_known_extension_is_native() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("gen.sh");
        std::fs::write(&script, "#!/bin/sh\necho 5\n").unwrap();
        assert!(matches!(
            adapter_for(&script),
            Err(JudgeError::UnsupportedSource(_))
        ));

        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(adapter_for(&script).unwrap().language(), "native");
    }
}
