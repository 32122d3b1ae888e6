//! Special judge: accepts exactly the permutations of `1..=n`.
//!
//! Input is `n` followed by the candidate answer, read to end of input. The
//! verdict goes out twice: as one of two fixed messages on stdout and as the
//! process exit status.

use crate::config::types::{JudgeError, Result};
use crate::roles::tokens::TokenStream;
use crate::verdict::ExitVerdict;
use std::fmt;
use std::io::{BufRead, Write};

pub const ACCEPT_MESSAGE: &str = "ok, no issue found.";
pub const REJECT_MESSAGE: &str = "wrong answer.";

/// Why a candidate is not a permutation of `1..=n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    NonInteger(String),
    /// Smallest value is not 1
    WrongMinimum(i64),
    /// Largest value is not n
    WrongMaximum { found: i64, expected: i64 },
    Duplicate(i64),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty candidate"),
            Self::NonInteger(detail) => write!(f, "non-integer token: {detail}"),
            Self::WrongMinimum(found) => write!(f, "minimum is {found}, expected 1"),
            Self::WrongMaximum { found, expected } => {
                write!(f, "maximum is {found}, expected {expected}")
            }
            Self::Duplicate(value) => write!(f, "{value} appears more than once"),
        }
    }
}

/// Sorts the candidate, then requires min == 1, max == n and no repeats.
/// Together these pin the multiset to exactly `{1, ..., n}`.
pub fn check_permutation(n: i64, mut values: Vec<i64>) -> std::result::Result<(), Rejection> {
    values.sort_unstable();
    let (Some(&first), Some(&last)) = (values.first(), values.last()) else {
        return Err(Rejection::Empty);
    };

    if first != 1 {
        return Err(Rejection::WrongMinimum(first));
    }
    if last != n {
        return Err(Rejection::WrongMaximum {
            found: last,
            expected: n,
        });
    }
    if let Some(pair) = values.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(Rejection::Duplicate(pair[0]));
    }
    Ok(())
}

/// Read `n` and the candidate, print the verdict message, return the verdict.
///
/// A missing or garbled `n` is [`JudgeError::MalformedInput`]; garbage inside
/// the candidate is an ordinary rejection.
pub fn run<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<ExitVerdict> {
    let mut tokens = TokenStream::new(input);
    let n = tokens.expect_int("n")?;

    let mut values = Vec::new();
    let outcome = loop {
        match tokens.next_int() {
            Ok(Some(value)) => values.push(value),
            Ok(None) => break check_permutation(n, values),
            Err(JudgeError::MalformedInput(detail)) => break Err(Rejection::NonInteger(detail)),
            Err(e) => return Err(e),
        }
    };

    match outcome {
        Ok(()) => {
            writeln!(output, "{}", ACCEPT_MESSAGE)?;
            Ok(ExitVerdict::Accept)
        }
        Err(rejection) => {
            log::debug!("rejecting candidate for n = {}: {}", n, rejection);
            writeln!(output, "{}", REJECT_MESSAGE)?;
            Ok(ExitVerdict::Reject)
        }
    }
}
