//! Whitespace-delimited integer tokens read from a buffered source.

use crate::config::types::{JudgeError, Result};
use std::collections::VecDeque;
use std::io::BufRead;

/// Lazily splits a reader into whitespace-separated tokens, one line at a time.
pub struct TokenStream<R> {
    reader: R,
    pending: VecDeque<String>,
    line: Vec<u8>,
    exhausted: bool,
}

impl<R: BufRead> TokenStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            line: Vec::new(),
            exhausted: false,
        }
    }

    /// Next raw token, or `None` once the input is exhausted.
    ///
    /// Lines are split as bytes, so invalid UTF-8 surfaces as a token that
    /// fails to parse rather than as a read error.
    pub fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            if self.exhausted {
                return Ok(None);
            }
            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                self.exhausted = true;
                continue;
            }
            self.pending.extend(
                self.line
                    .split(|b| b.is_ascii_whitespace())
                    .filter(|token| !token.is_empty())
                    .map(|token| String::from_utf8_lossy(token).into_owned()),
            );
        }
        Ok(self.pending.pop_front())
    }

    /// Next integer, `None` at end of input. A non-integer token is an error.
    pub fn next_int(&mut self) -> Result<Option<i64>> {
        match self.next_token()? {
            None => Ok(None),
            Some(token) => token.parse::<i64>().map(Some).map_err(|_| {
                JudgeError::MalformedInput(format!("expected an integer, found {token:?}"))
            }),
        }
    }

    /// Next integer where end of input is also malformed.
    pub fn expect_int(&mut self, what: &str) -> Result<i64> {
        self.next_int()?.ok_or_else(|| {
            JudgeError::MalformedInput(format!("input ended before {what} was read"))
        })
    }
}
