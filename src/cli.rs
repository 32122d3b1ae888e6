use crate::config::config::JudgeConfig;
use crate::config::presets::split_flags;
use crate::config::types::JudgeError;
use crate::judge::{Compiler, HackOracle, PreparedProgram, Tester};
use crate::observability::logging;
use crate::observability::report::Report;
use crate::roles::{self, RoleKind};
use crate::safety::Workspace;
use crate::verdict::ExitVerdict;
use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use std::io::{BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CliMode {
    Judge,
    NoiseInjector,
    SolutionStub,
    Checker,
    PermutationGenerator,
}

impl CliMode {
    fn role(self) -> Option<RoleKind> {
        match self {
            Self::Judge => None,
            Self::NoiseInjector => Some(RoleKind::NoiseInjector),
            Self::SolutionStub => Some(RoleKind::SolutionStub),
            Self::Checker => Some(RoleKind::Checker),
            Self::PermutationGenerator => Some(RoleKind::PermutationGenerator),
        }
    }
}

#[derive(Parser)]
#[command(name = "cpjudge", author, version, about = "A simple competitive programming judge", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,
    /// Suppress the stderr of judged programs
    #[arg(long, global = true)]
    hide_stderr: bool,
    /// Print a JSON summary on stdout when the action finishes
    #[arg(long, global = true)]
    json: bool,
    /// Config file (defaults to ./cpjudge.json when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Compiler for C++
    #[arg(long, global = true)]
    cpp_compiler: Option<String>,
    /// Compile flags for C++
    #[arg(long, global = true, allow_hyphen_values = true)]
    cpp_flags: Option<String>,
    /// Compiler for C
    #[arg(long, global = true)]
    c_compiler: Option<String>,
    /// Compile flags for C
    #[arg(long, global = true, allow_hyphen_values = true)]
    c_flags: Option<String>,
    /// Interpreter for Python
    #[arg(long, global = true)]
    py_interpreter: Option<String>,
    /// Interpreter flags for Python
    #[arg(long, global = true, allow_hyphen_values = true)]
    py_flags: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run and judge code against the testcases
    Judge {
        /// The code to judge
        filename: PathBuf,
        /// Time limit per testcase in seconds
        #[arg(short, long)]
        tle: Option<f64>,
        /// Directory of testcases
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Special judge code
        #[arg(long)]
        spj: Option<PathBuf>,
        /// Memory limit in MB
        #[arg(short, long)]
        mem: Option<u64>,
    },
    /// Run code over the testcases and optionally save its output
    Run {
        /// The code to run
        filename: PathBuf,
        /// Time limit per testcase in seconds
        #[arg(short, long)]
        tle: Option<f64>,
        /// Directory of testcases
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Save output as the .out file
        #[arg(short, long)]
        save: bool,
    },
    /// Brute-force search for a failing testcase
    #[command(group(ArgGroup::new("oracle").required(true).args(["std", "spj"])))]
    Hack {
        /// The code to hack
        filename: PathBuf,
        /// Time limit per testcase in seconds
        #[arg(short, long)]
        tle: Option<f64>,
        /// Directory the found testcase is saved to
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Testcase generator
        #[arg(short = 'g', long = "gen")]
        generator: PathBuf,
        /// Standard solution code
        #[arg(short, long)]
        std: Option<PathBuf>,
        /// Special judge code
        #[arg(long)]
        spj: Option<PathBuf>,
        /// Give up after this many generated testcases
        #[arg(long)]
        max_attempts: Option<u64>,
    },
}

extern "C" fn signal_handler(sig: i32) {
    // Only async-signal-safe calls: raw write and _exit.
    let msg = b"[WARN] interrupted\n";
    unsafe {
        libc::write(2, msg.as_ptr() as *const libc::c_void, msg.len());
        libc::_exit(128 + sig);
    }
}

fn setup_signal_handlers() {
    unsafe {
        libc::signal(libc::SIGTERM, signal_handler as usize);
        libc::signal(libc::SIGINT, signal_handler as usize);
    }
}

pub fn run(mode: CliMode) -> Result<()> {
    match mode.role() {
        Some(kind) => run_role(kind),
        None => run_driver(),
    }
}

/// Role binaries: stdin in, stdout out, verdict as the exit status.
fn run_role(kind: RoleKind) -> Result<()> {
    logging::init("warn", false);

    let verdict = match execute_role(kind) {
        Ok(verdict) => verdict,
        Err(e) => {
            log::error!("{}: {}", kind.binary_name(), e);
            ExitVerdict::Malformed
        }
    };

    match verdict.code() {
        Some(code) => std::process::exit(code),
        None => std::process::abort(),
    }
}

fn execute_role(kind: RoleKind) -> crate::config::types::Result<ExitVerdict> {
    let mut rng = roles::rng_from_env()?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut output = BufWriter::new(stdout.lock());
    let verdict = roles::run(kind, stdin.lock(), &mut output, &mut rng)?;
    output.flush()?;
    Ok(verdict)
}

fn run_driver() -> Result<()> {
    setup_signal_handlers();

    let cli = Cli::parse();
    logging::init("info", cli.debug);

    let start = Instant::now();
    if let Err(e) = execute(&cli) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
    log::info!("Finished in {:.3} s", start.elapsed().as_secs_f64());
    Ok(())
}

fn load_config(cli: &Cli) -> Result<JudgeConfig> {
    let mut config = JudgeConfig::resolve(cli.config.as_deref())?;
    let toolchain = &mut config.toolchain;
    for (flag, target) in [
        (&cli.cpp_compiler, &mut toolchain.cpp_compiler),
        (&cli.cpp_flags, &mut toolchain.cpp_flags),
        (&cli.c_compiler, &mut toolchain.c_compiler),
        (&cli.c_flags, &mut toolchain.c_flags),
        (&cli.py_interpreter, &mut toolchain.python_interpreter),
        (&cli.py_flags, &mut toolchain.python_flags),
    ] {
        if let Some(value) = flag {
            *target = split_flags(value);
        }
    }
    if cli.hide_stderr {
        config.show_stderr = false;
    }
    config.validate()?;
    Ok(config)
}

/// Build `source` into the workspace; a failure is reported as `<file> <verdict>`.
fn prepare(
    compiler: &Compiler,
    source: &Path,
    artifact: &str,
    workspace: &Workspace,
) -> Result<PreparedProgram> {
    compiler.prepare(source, artifact, workspace).map_err(|res| {
        let name = source
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| source.display().to_string());
        anyhow::anyhow!("{} {}", name, res.format())
    })
}

fn emit(cli: &Cli, report: Report<'_>) -> Result<()> {
    if cli.json {
        report.emit(&mut std::io::stdout().lock())?;
    }
    Ok(())
}

fn execute(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let workspace = Workspace::new()?;
    log::debug!("workspace {} at {}", workspace.run_id(), workspace.root().display());
    let compiler = Compiler::new(config.toolchain.clone());

    match &cli.command {
        Commands::Judge {
            filename,
            tle,
            dir,
            spj,
            mem,
        } => {
            let limits = config.run_limits(*tle, *mem)?;
            let dir = dir.as_deref().unwrap_or(config.testcase_dir.as_path());

            let test = prepare(&compiler, filename, "test.bin", &workspace)?;
            let spj = match spj {
                Some(path) => Some(prepare(&compiler, path, "spj.bin", &workspace)?),
                None => None,
            };

            let summary = Tester::new(limits, &workspace).judge(&test, dir, spj.as_ref())?;
            emit(cli, Report::Judge(&summary))
        }
        Commands::Run {
            filename,
            tle,
            dir,
            save,
        } => {
            let limits = config.run_limits(*tle, None)?;
            let dir = dir.as_deref().unwrap_or(config.testcase_dir.as_path());

            let test = prepare(&compiler, filename, "test.bin", &workspace)?;
            let summary = Tester::new(limits, &workspace).run(&test, dir, *save)?;
            emit(cli, Report::Run(&summary))
        }
        Commands::Hack {
            filename,
            tle,
            dir,
            generator,
            std: standard,
            spj,
            max_attempts,
        } => {
            let limits = config.run_limits(*tle, None)?;
            let dir = dir.as_deref().unwrap_or(config.testcase_dir.as_path());

            let test = prepare(&compiler, filename, "test.bin", &workspace)?;
            let generator = prepare(&compiler, generator, "gen.bin", &workspace)?;
            let oracle = match (standard, spj) {
                (Some(standard), _) => {
                    HackOracle::Standard(prepare(&compiler, standard, "std.bin", &workspace)?)
                }
                (None, Some(spj)) => {
                    HackOracle::SpecialJudge(prepare(&compiler, spj, "spj.bin", &workspace)?)
                }
                (None, None) => {
                    return Err(JudgeError::Config(
                        "hack needs a standard solution or a special judge".to_string(),
                    )
                    .into())
                }
            };

            let tester = Tester::new(limits, &workspace).with_progress(std::io::stderr().is_terminal());
            let report = tester.hack(dir, &test, &generator, &oracle, *max_attempts)?;
            emit(cli, Report::Hack(&report))
        }
    }
}
