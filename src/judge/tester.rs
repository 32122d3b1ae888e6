//! Judge driver loops: run, judge and hack.

use crate::config::types::{JudgeError, Result, RunLimits};
use crate::exec::runner::{first_line_is_utf8, launch, ProcessSpec};
use crate::judge::compare::compare_files;
use crate::judge::compiler::PreparedProgram;
use crate::judge::testcases::{self, Testcase};
use crate::safety::Workspace;
use crate::utils::ansi;
use crate::verdict::{JudgeResult, Verdict, VerdictClassifier};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SPINNER_FRAMES: [&str; 7] = [
    "[    ] ", "[>   ] ", "[>>  ] ", "[>>> ] ", "[ >>>] ", "[  >>] ", "[   >] ",
];
const SPINNER_TICK: Duration = Duration::from_millis(10);

#[derive(Clone, Debug, Serialize)]
pub struct CaseReport {
    pub name: String,
    pub result: JudgeResult,
    /// The special judge itself failed (anything but accept / wrong answer)
    pub special_judge_error: bool,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub passed: usize,
    pub total: usize,
    pub slowest_ms: u64,
    pub cases: Vec<CaseReport>,
}

impl RunSummary {
    fn record(&mut self, name: String, result: JudgeResult, passed: bool, special_judge_error: bool) {
        if passed {
            self.passed += 1;
        }
        self.cases.push(CaseReport {
            name,
            result,
            special_judge_error,
        });
    }

    fn log_footer(&self) {
        log::info!("");
        log::info!("Passed {} / {}", self.passed, self.total);
        log::info!("Slowest: {} ms", ansi::green(&self.slowest_ms.to_string()));
    }
}

/// What decides whether a hacked output is wrong.
#[derive(Clone, Debug)]
pub enum HackOracle {
    /// Trusted solution; outputs are compared token by token
    Standard(PreparedProgram),
    /// Checker fed `input + output`
    SpecialJudge(PreparedProgram),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HackStatus {
    /// The program under test failed on a generated input
    Found,
    GeneratorError,
    StandardError,
    SpecialJudgeError,
    /// Attempt cap reached without a failure
    Exhausted,
}

#[derive(Clone, Debug, Serialize)]
pub struct HackReport {
    pub run_id: String,
    pub status: HackStatus,
    pub attempts: u64,
    pub result: JudgeResult,
    pub saved: Vec<PathBuf>,
}

struct HackFiles {
    input: PathBuf,
    answer: PathBuf,
    output: PathBuf,
}

pub struct Tester<'w> {
    limits: RunLimits,
    workspace: &'w Workspace,
    progress: bool,
}

impl<'w> Tester<'w> {
    pub fn new(limits: RunLimits, workspace: &'w Workspace) -> Self {
        Self {
            limits,
            workspace,
            progress: false,
        }
    }

    /// Draw a spinner on stderr while hacking.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    fn execute(
        &self,
        program: &PreparedProgram,
        input: Option<&Path>,
        output: Option<&Path>,
        time_limit: Duration,
        memory_limit_kb: Option<u64>,
    ) -> JudgeResult {
        if let Some(input) = input {
            match first_line_is_utf8(input) {
                Ok(true) => {}
                Ok(false) => return JudgeResult::new(Verdict::UnknownFileEncoding),
                Err(e) => return JudgeResult::with_message(Verdict::UnknownError, e.to_string()),
            }
        }

        let spec = ProcessSpec {
            argv: program.argv.clone(),
            stdin: input.map(Path::to_path_buf),
            stdout: output.map(Path::to_path_buf),
            show_stderr: self.limits.show_stderr,
            time_limit,
        };
        match launch(&spec) {
            Ok(outcome) => VerdictClassifier::classify_run(&outcome, time_limit, memory_limit_kb),
            Err(e) => JudgeResult::with_message(Verdict::UnknownError, e.to_string()),
        }
    }

    /// Run the program under test with the regular limits.
    pub fn run_program(
        &self,
        program: &PreparedProgram,
        input: Option<&Path>,
        output: Option<&Path>,
    ) -> JudgeResult {
        self.execute(
            program,
            input,
            output,
            self.limits.time_limit,
            self.limits.memory_limit_kb,
        )
    }

    /// Run a generator or standard solution with the relaxed limit.
    pub fn run_helper(
        &self,
        program: &PreparedProgram,
        input: Option<&Path>,
        output: Option<&Path>,
    ) -> JudgeResult {
        self.execute(program, input, output, self.limits.special(), None)
    }

    /// Feed `input` followed by `output` to the special judge and classify it.
    pub fn special_judge(&self, spj: &PreparedProgram, input: &Path, output: &Path) -> JudgeResult {
        let merged = match self.workspace.merge_files(&[input, output], "in_out.txt") {
            Ok(path) => path,
            Err(e) => return JudgeResult::with_message(Verdict::UnknownError, e.to_string()),
        };
        match first_line_is_utf8(&merged) {
            Ok(true) => {}
            Ok(false) => return JudgeResult::new(Verdict::UnknownFileEncoding),
            Err(e) => return JudgeResult::with_message(Verdict::UnknownError, e.to_string()),
        }

        let verdict_path = self.workspace.path("verdict.txt");
        let time_limit = self.limits.special();
        let spec = ProcessSpec {
            argv: spj.argv.clone(),
            stdin: Some(merged),
            stdout: Some(verdict_path.clone()),
            show_stderr: self.limits.show_stderr,
            time_limit,
        };
        let outcome = match launch(&spec) {
            Ok(outcome) => outcome,
            Err(e) => return JudgeResult::with_message(Verdict::UnknownError, e.to_string()),
        };
        let checker_output = std::fs::read(&verdict_path)
            .map(|bytes| String::from_utf8_lossy(&bytes).to_string())
            .unwrap_or_default();
        VerdictClassifier::classify_special_judge(&outcome, time_limit, &checker_output)
    }

    /// Run every testcase, optionally saving output as the `.out` answer.
    pub fn run(&self, program: &PreparedProgram, dir: &Path, save_output: bool) -> Result<RunSummary> {
        log::info!("Running...");
        let cases = testcases::discover(dir, save_output)?;
        let mut summary = RunSummary {
            run_id: self.workspace.run_id().to_string(),
            total: cases.len(),
            ..RunSummary::default()
        };

        for case in cases {
            let output = if save_output { case.answer.as_deref() } else { None };
            let res = self.run_program(program, Some(&case.input), output);
            let finished = res.verdict == Verdict::Finished;
            if finished {
                log::info!("{} {}", case.name(), res.format());
                summary.slowest_ms = summary.slowest_ms.max(res.time_ms());
            } else {
                log::warn!("{} {}", case.name(), res.format());
            }
            summary.record(case.name(), res, finished, false);
        }

        summary.log_footer();
        Ok(summary)
    }

    /// Run every testcase and check it against its answer or the special judge.
    pub fn judge(
        &self,
        program: &PreparedProgram,
        dir: &Path,
        spj: Option<&PreparedProgram>,
    ) -> Result<RunSummary> {
        log::info!("Running...");
        let cases = testcases::discover(dir, false)?;
        let output = self.workspace.path("test.out");
        let mut summary = RunSummary {
            run_id: self.workspace.run_id().to_string(),
            total: cases.len(),
            ..RunSummary::default()
        };

        for case in cases {
            let (res, special_judge_error) = self.judge_case(program, &case, &output, spj)?;
            let passed = res.good();
            if passed {
                log::info!("{} {}", case.name(), res.format());
            } else if special_judge_error {
                log::warn!(
                    "{} {} {}",
                    case.name(),
                    ansi::bold_red("Special Judge Error:"),
                    res.format()
                );
            } else {
                log::warn!("{} {}", case.name(), res.format());
            }
            if passed || res.verdict == Verdict::WrongAnswer {
                summary.slowest_ms = summary.slowest_ms.max(res.time_ms());
            }
            summary.record(case.name(), res, passed, special_judge_error);
        }

        summary.log_footer();
        Ok(summary)
    }

    fn judge_case(
        &self,
        program: &PreparedProgram,
        case: &Testcase,
        output: &Path,
        spj: Option<&PreparedProgram>,
    ) -> Result<(JudgeResult, bool)> {
        let run = self.run_program(program, Some(&case.input), Some(output));
        if !run.good() {
            return Ok((run, false));
        }

        let mut res = match (spj, &case.answer) {
            (Some(spj), _) => self.special_judge(spj, &case.input, output),
            (None, Some(answer)) => compare_files(answer, output)?,
            (None, None) => return Ok((run, false)),
        };
        let special_judge_error =
            spj.is_some() && !res.good() && res.verdict != Verdict::WrongAnswer;
        if !special_judge_error {
            res.time_used = run.time_used;
            res.memory_used_kb = run.memory_used_kb;
        }
        Ok((res, special_judge_error))
    }

    /// Generate inputs until the program under test fails against `oracle`.
    /// A failing input (and answer, with a standard solution) is saved to `dir`.
    pub fn hack(
        &self,
        dir: &Path,
        program: &PreparedProgram,
        generator: &PreparedProgram,
        oracle: &HackOracle,
        max_attempts: Option<u64>,
    ) -> Result<HackReport> {
        let files = HackFiles {
            input: self.workspace.path("hack.in"),
            answer: self.workspace.path("hack.out"),
            output: self.workspace.path("test.out"),
        };

        let (tx, rx) = crossbeam_channel::unbounded::<u64>();
        let outcome = std::thread::scope(|scope| {
            let files = &files;
            let worker = scope.spawn(move || {
                self.hack_loop(program, generator, oracle, max_attempts, files, tx)
            });
            if self.progress {
                spin(&rx);
            } else {
                rx.iter().for_each(drop);
            }
            worker.join()
        });
        let (status, attempts, result) = outcome
            .map_err(|_| JudgeError::Process("hack worker panicked".to_string()))??;

        match status {
            HackStatus::GeneratorError => log::warn!(
                "{}",
                ansi::bold_red(&format!("Generator Error: {}", result.format()))
            ),
            HackStatus::StandardError => log::warn!(
                "{}",
                ansi::bold_red(&format!("Standard Solution Error: {}", result.format()))
            ),
            HackStatus::SpecialJudgeError => log::warn!(
                "{}",
                ansi::bold_red(&format!("Special Judge Error: {}", result.format()))
            ),
            HackStatus::Found | HackStatus::Exhausted => log::info!("{}", result.format()),
        }

        let plural = if attempts > 1 { "s" } else { "" };
        let attempts_text = format!(" after {} attempt{}", ansi::blue(&attempts.to_string()), plural);
        log::info!("");

        let mut saved = Vec::new();
        if status == HackStatus::Found {
            log::info!("{}{}", ansi::green("Hacking Success"), attempts_text);
            saved = self.save_hack(dir, oracle, &files)?;
            log::info!("testcase has been saved to:");
            for path in &saved {
                log::info!("{}", path.display());
            }
            log::info!("");
        } else {
            log::info!("{}{}", ansi::bold_red("Hacking Failed"), attempts_text);
        }

        Ok(HackReport {
            run_id: self.workspace.run_id().to_string(),
            status,
            attempts,
            result,
            saved,
        })
    }

    fn hack_loop(
        &self,
        program: &PreparedProgram,
        generator: &PreparedProgram,
        oracle: &HackOracle,
        max_attempts: Option<u64>,
        files: &HackFiles,
        progress: Sender<u64>,
    ) -> Result<(HackStatus, u64, JudgeResult)> {
        let mut attempts = 0u64;
        loop {
            if max_attempts.is_some_and(|max| attempts >= max) {
                return Ok((
                    HackStatus::Exhausted,
                    attempts,
                    JudgeResult::with_message(Verdict::Finished, "no failing testcase found"),
                ));
            }
            attempts += 1;
            // The receiver only drives the spinner.
            let _ = progress.send(attempts);

            let res = self.run_helper(generator, None, Some(&files.input));
            if !res.good() {
                return Ok((HackStatus::GeneratorError, attempts, res));
            }

            match oracle {
                HackOracle::Standard(std) => {
                    let res = self.run_helper(std, Some(&files.input), Some(&files.answer));
                    if !res.good() {
                        return Ok((HackStatus::StandardError, attempts, res));
                    }

                    let run = self.run_program(program, Some(&files.input), Some(&files.output));
                    if !run.good() {
                        return Ok((HackStatus::Found, attempts, run));
                    }

                    let mut cmp = compare_files(&files.answer, &files.output)?;
                    if !cmp.good() {
                        cmp.time_used = run.time_used;
                        cmp.memory_used_kb = run.memory_used_kb;
                        return Ok((HackStatus::Found, attempts, cmp));
                    }
                }
                HackOracle::SpecialJudge(spj) => {
                    let run = self.run_program(program, Some(&files.input), Some(&files.output));
                    if !run.good() {
                        return Ok((HackStatus::Found, attempts, run));
                    }

                    let res = self.special_judge(spj, &files.input, &files.output);
                    if !res.good() {
                        let status = if res.verdict == Verdict::WrongAnswer {
                            HackStatus::Found
                        } else {
                            HackStatus::SpecialJudgeError
                        };
                        return Ok((status, attempts, res));
                    }
                }
            }
        }
    }

    fn save_hack(&self, dir: &Path, oracle: &HackOracle, files: &HackFiles) -> Result<Vec<PathBuf>> {
        let with_answer = matches!(oracle, HackOracle::Standard(_));
        let mut id = testcases::find_available_id(dir, "hack_", ".in")?;
        if with_answer {
            id = id.max(testcases::find_available_id(dir, "hack_", ".out")?);
        }

        let mut saved = Vec::new();
        let input_target = dir.join(format!("hack_{id}.in"));
        std::fs::copy(&files.input, &input_target)?;
        saved.push(input_target);

        if with_answer {
            let answer_target = dir.join(format!("hack_{id}.out"));
            std::fs::copy(&files.answer, &answer_target)?;
            saved.push(answer_target);
        }
        Ok(saved)
    }
}

fn spin(rx: &Receiver<u64>) {
    let mut stderr = std::io::stderr();
    let mut attempt = 0u64;
    let mut tick = 0usize;
    loop {
        match rx.recv_timeout(SPINNER_TICK) {
            Ok(n) => attempt = n,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        tick = (tick + 1) % 70;
        let frame = SPINNER_FRAMES[tick / 10];
        let _ = write!(stderr, "\r{frame}hacking on testcase #{attempt}...");
        let _ = stderr.flush();
    }
    let _ = write!(stderr, "\r\x1b[2K");
    let _ = stderr.flush();
}
