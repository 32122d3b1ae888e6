//! Token-wise answer comparison.
//!
//! Lines are compared as whitespace-separated token lists, so trailing spaces
//! and repeated blanks never matter. Comparison stops at the first line that
//! is blank (or missing) on either side.

use crate::config::types::Result;
use crate::verdict::{JudgeResult, Verdict};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub fn compare_files(answer: &Path, output: &Path) -> Result<JudgeResult> {
    compare(
        BufReader::new(File::open(answer)?),
        BufReader::new(File::open(output)?),
    )
}

pub fn compare<A: BufRead, O: BufRead>(mut answer: A, mut output: O) -> Result<JudgeResult> {
    let mut ans_line = Vec::new();
    let mut out_line = Vec::new();
    let mut line = 0usize;

    loop {
        line += 1;
        ans_line.clear();
        out_line.clear();
        answer.read_until(b'\n', &mut ans_line)?;
        output.read_until(b'\n', &mut out_line)?;

        let ans = tokens(&ans_line);
        let out = tokens(&out_line);
        if ans != out {
            let width = ans.len().max(out.len());
            for i in 0..width {
                let expected = ans.get(i).copied().unwrap_or_default();
                let found = out.get(i).copied().unwrap_or_default();
                if expected != found {
                    return Ok(JudgeResult::with_message(
                        Verdict::WrongAnswer,
                        format!(
                            "on line {line}: \"{}\" <-> \"{}\"",
                            String::from_utf8_lossy(expected),
                            String::from_utf8_lossy(found)
                        ),
                    ));
                }
            }
        }
        if ans.is_empty() || out.is_empty() {
            break;
        }
    }

    Ok(JudgeResult::new(Verdict::Accepted))
}

/// Whitespace-separated tokens of one raw line. Output is untrusted, so no
/// encoding is assumed.
fn tokens(line: &[u8]) -> Vec<&[u8]> {
    line.split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty())
        .collect()
}
