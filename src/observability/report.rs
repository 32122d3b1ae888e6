//! JSON summaries printed by `--json`.

use crate::config::types::Result;
use crate::judge::tester::{HackReport, RunSummary};
use serde::Serialize;
use std::io::Write;

/// Tagged wrapper so consumers can tell actions apart.
#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Report<'a> {
    Run(&'a RunSummary),
    Judge(&'a RunSummary),
    Hack(&'a HackReport),
}

impl Report<'_> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn emit<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", self.to_json()?)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::tester::HackStatus;
    use crate::verdict::{JudgeResult, Verdict};

    #[test]
    fn judge_summary_is_tagged() {
        let summary = RunSummary {
            run_id: "abcd1234".to_string(),
            passed: 1,
            total: 2,
            slowest_ms: 15,
            cases: Vec::new(),
        };
        let value: serde_json::Value =
            serde_json::from_str(&Report::Judge(&summary).to_json().unwrap()).unwrap();
        assert_eq!(value["action"], "judge");
        assert_eq!(value["passed"], 1);
        assert_eq!(value["total"], 2);
    }

    #[test]
    fn hack_report_carries_verdict_code() {
        let report = HackReport {
            run_id: "abcd1234".to_string(),
            status: HackStatus::Found,
            attempts: 3,
            result: JudgeResult::with_message(Verdict::WrongAnswer, "wrong answer."),
            saved: vec!["testcases/hack_1.in".into()],
        };
        let mut out = Vec::new();
        Report::Hack(&report).emit(&mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["action"], "hack");
        assert_eq!(value["status"], "found");
        assert_eq!(value["result"]["verdict"], "WA");
    }
}
