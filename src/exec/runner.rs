/// Child process launching with a wall clock limit
///
/// Children run without isolation. The runner only owns stdio redirection,
/// the deadline and resource accounting; classification lives in
/// [`crate::verdict`].
use crate::config::types::{JudgeError, Result};
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// What to launch and where its standard streams go.
#[derive(Clone, Debug)]
pub struct ProcessSpec {
    pub argv: Vec<String>,
    /// `None` reads from /dev/null
    pub stdin: Option<PathBuf>,
    /// `None` discards output
    pub stdout: Option<PathBuf>,
    pub show_stderr: bool,
    pub time_limit: Duration,
}

/// Evidence gathered from one reaped child.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessOutcome {
    pub exit_code: Option<i32>,
    pub signal: Option<i32>,
    /// Killed by us after the wall clock limit
    pub timed_out: bool,
    pub wall_time: Duration,
    pub peak_memory_kb: u64,
}

/// Whether the first line of `path` decodes as UTF-8. Binary inputs are
/// refused before anything is launched.
pub fn first_line_is_utf8(path: &Path) -> Result<bool> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;
    Ok(std::str::from_utf8(&line).is_ok())
}

/// Launch `spec`, wait for it or kill it at the deadline, and reap it.
pub fn launch(spec: &ProcessSpec) -> Result<ProcessOutcome> {
    let (program, args) = spec
        .argv
        .split_first()
        .ok_or_else(|| JudgeError::Process("Empty command provided".to_string()))?;

    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdin(match &spec.stdin {
        Some(path) => Stdio::from(File::open(path)?),
        None => Stdio::null(),
    });
    cmd.stdout(match &spec.stdout {
        Some(path) => Stdio::from(File::create(path)?),
        None => Stdio::null(),
    });
    cmd.stderr(if spec.show_stderr {
        Stdio::inherit()
    } else {
        Stdio::null()
    });

    let started = Instant::now();
    let child = cmd
        .spawn()
        .map_err(|e| JudgeError::Process(format!("spawn {}: {}", program, e)))?;
    let pid = child.id() as libc::pid_t;
    log::debug!("launched {} as pid {}", program, pid);

    let mut timed_out = false;
    let (status, usage) = loop {
        if let Some(reaped) = wait4(pid, libc::WNOHANG)? {
            break reaped;
        }
        if started.elapsed() > spec.time_limit {
            timed_out = true;
            if let Err(e) = kill(Pid::from_raw(pid), Signal::SIGKILL) {
                log::warn!("kill({}) after time limit failed: {}", pid, e);
            }
            match wait4(pid, 0)? {
                Some(reaped) => break reaped,
                None => {
                    return Err(JudgeError::Process(format!(
                        "pid {pid} vanished while being reaped"
                    )))
                }
            }
        }
        std::thread::sleep(POLL_INTERVAL);
    };
    let wall_time = started.elapsed();
    drop(child);

    let (exit_code, signal) = if libc::WIFEXITED(status) {
        (Some(libc::WEXITSTATUS(status)), None)
    } else if libc::WIFSIGNALED(status) {
        (None, Some(libc::WTERMSIG(status)))
    } else {
        (None, None)
    };

    Ok(ProcessOutcome {
        exit_code,
        signal,
        timed_out,
        wall_time,
        // ru_maxrss is reported in KiB on Linux.
        peak_memory_kb: u64::try_from(usage.ru_maxrss).unwrap_or(0),
    })
}

/// `wait4(2)` for one pid. `Ok(None)` means still running (WNOHANG only).
fn wait4(pid: libc::pid_t, options: libc::c_int) -> Result<Option<(libc::c_int, libc::rusage)>> {
    loop {
        let mut status: libc::c_int = 0;
        // SAFETY: rusage is plain old data; an all-zero value is valid.
        let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
        // SAFETY: both out-pointers reference live locals for the duration of the call.
        let rc = unsafe { libc::wait4(pid, &mut status, options, &mut usage) };
        if rc == 0 {
            return Ok(None);
        }
        if rc == pid {
            return Ok(Some((status, usage)));
        }
        let err = std::io::Error::last_os_error();
        if err.kind() == std::io::ErrorKind::Interrupted {
            continue;
        }
        return Err(JudgeError::Process(format!("wait4({pid}): {err}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sh(script: &str, time_limit: Duration) -> ProcessSpec {
        ProcessSpec {
            argv: vec!["/bin/sh".to_string(), "-c".to_string(), script.to_string()],
            stdin: None,
            stdout: None,
            show_stderr: false,
            time_limit,
        }
    }

    #[test]
    fn clean_exit_is_recorded() {
        let outcome = launch(&sh("exit 0", Duration::from_secs(5))).unwrap();
        assert_eq!(outcome.exit_code, Some(0));
        assert_eq!(outcome.signal, None);
        assert!(!outcome.timed_out);
    }

    #[test]
    fn nonzero_exit_is_recorded() {
        let outcome = launch(&sh("exit 3", Duration::from_secs(5))).unwrap();
        assert_eq!(outcome.exit_code, Some(3));
    }

    #[test]
    fn signal_is_recorded() {
        let outcome = launch(&sh("kill -ABRT $$", Duration::from_secs(5))).unwrap();
        assert_eq!(outcome.signal, Some(libc::SIGABRT));
        assert_eq!(outcome.exit_code, None);
    }

    #[test]
    fn deadline_kills_child() {
        let outcome = launch(&sh("sleep 5", Duration::from_millis(100))).unwrap();
        assert!(outcome.timed_out);
        assert_eq!(outcome.signal, Some(libc::SIGKILL));
        assert!(outcome.wall_time < Duration::from_secs(4));
    }

    #[test]
    fn stdio_redirects_to_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        std::fs::write(&input, "hello\n").unwrap();

        let mut spec = sh("cat", Duration::from_secs(5));
        spec.stdin = Some(input);
        spec.stdout = Some(output.clone());
        let outcome = launch(&spec).unwrap();

        assert_eq!(outcome.exit_code, Some(0));
        assert_eq!(std::fs::read_to_string(output).unwrap(), "hello\n");
    }

    #[test]
    fn missing_program_is_process_error() {
        let spec = ProcessSpec {
            argv: vec!["/nonexistent/cpjudge-test-binary".to_string()],
            ..sh("", Duration::from_secs(1))
        };
        assert!(matches!(launch(&spec), Err(JudgeError::Process(_))));

        let empty = ProcessSpec {
            argv: Vec::new(),
            ..sh("", Duration::from_secs(1))
        };
        assert!(matches!(launch(&empty), Err(JudgeError::Process(_))));
    }

    #[test]
    fn first_line_encoding_check() {
        let mut good = tempfile::NamedTempFile::new().unwrap();
        writeln!(good, "3\n1 2 3").unwrap();
        assert!(first_line_is_utf8(good.path()).unwrap());

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        bad.write_all(&[0xff, 0xfe, b'\n']).unwrap();
        assert!(!first_line_is_utf8(bad.path()).unwrap());
    }
}
