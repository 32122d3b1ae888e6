//! Solution stub that reproduces the common judge outcomes on demand.
//!
//! The input value selects a [`Scenario`]; each scenario is terminal.

use crate::config::types::Result;
use crate::roles::tokens::TokenStream;
use crate::verdict::ExitVerdict;
use std::hint::black_box;
use std::io::{BufRead, Write};

/// Named behaviours of the stub.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    /// Print `1` and exit cleanly
    Normal,
    /// Abort, as a failed assertion would
    Crash,
    /// Spin through a very long checksum loop before answering
    Slow,
    /// Print the input back
    Echo,
}

/// Inputs with a dedicated scenario; anything else echoes.
const SCENARIO_TABLE: [(i64, Scenario); 3] = [
    (1, Scenario::Normal),
    (2, Scenario::Crash),
    (3, Scenario::Slow),
];

impl Scenario {
    pub fn for_input(value: i64) -> Self {
        SCENARIO_TABLE
            .iter()
            .find(|(key, _)| *key == value)
            .map(|(_, scenario)| *scenario)
            .unwrap_or(Scenario::Echo)
    }
}

/// Loop bound for [`Scenario::Slow`]: far beyond any sane time limit.
pub const SLOW_ITERATIONS: u64 = 1_000_000_000_000;

/// `sum((i mod 3) * 3)` for `i` in `1..=upper`, computed one step at a time.
pub fn busy_checksum(upper: u64) -> u64 {
    let mut sum = 0u64;
    for i in 1..=upper {
        sum = sum.wrapping_add((black_box(i) % 3) * 3);
    }
    sum
}

#[derive(Clone, Debug)]
pub struct SolutionStub {
    slow_iterations: u64,
}

impl Default for SolutionStub {
    fn default() -> Self {
        Self {
            slow_iterations: SLOW_ITERATIONS,
        }
    }
}

impl SolutionStub {
    pub fn with_slow_iterations(slow_iterations: u64) -> Self {
        Self { slow_iterations }
    }

    /// Run one scenario. `Crash` is returned rather than raised so the caller
    /// decides how to die.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> Result<ExitVerdict> {
        let mut tokens = TokenStream::new(input);
        let value = tokens.expect_int("the scenario value")?;
        let scenario = Scenario::for_input(value);
        log::debug!("input {} selects {:?}", value, scenario);

        match scenario {
            Scenario::Normal => writeln!(output, "1")?,
            Scenario::Crash => return Ok(ExitVerdict::Crash),
            Scenario::Slow => writeln!(output, "{}", busy_checksum(self.slow_iterations))?,
            Scenario::Echo => writeln!(output, "{}", value)?,
        }
        Ok(ExitVerdict::Accept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_stub(input: &str) -> (ExitVerdict, String) {
        let stub = SolutionStub::with_slow_iterations(5);
        let mut out = Vec::new();
        let verdict = stub.run(input.as_bytes(), &mut out).unwrap();
        (verdict, String::from_utf8(out).unwrap())
    }

    #[test]
    fn scenario_table() {
        assert_eq!(Scenario::for_input(1), Scenario::Normal);
        assert_eq!(Scenario::for_input(2), Scenario::Crash);
        assert_eq!(Scenario::for_input(3), Scenario::Slow);
        assert_eq!(Scenario::for_input(4), Scenario::Echo);
        assert_eq!(Scenario::for_input(0), Scenario::Echo);
        assert_eq!(Scenario::for_input(-2), Scenario::Echo);
    }

    #[test]
    fn normal_prints_one() {
        assert_eq!(run_stub("1"), (ExitVerdict::Accept, "1\n".to_string()));
    }

    #[test]
    fn crash_prints_nothing() {
        assert_eq!(run_stub("2"), (ExitVerdict::Crash, String::new()));
    }

    #[test]
    fn slow_prints_checksum() {
        // i = 1..=5 -> 3 + 6 + 0 + 3 + 6
        assert_eq!(run_stub("3"), (ExitVerdict::Accept, "18\n".to_string()));
    }

    #[test]
    fn other_values_echo() {
        assert_eq!(run_stub("4"), (ExitVerdict::Accept, "4\n".to_string()));
        assert_eq!(run_stub(" -9 \n"), (ExitVerdict::Accept, "-9\n".to_string()));
    }

    #[test]
    fn checksum_matches_closed_form() {
        for upper in [0u64, 1, 2, 3, 10, 999, 1000] {
            let full = upper / 3;
            let rest = upper % 3;
            let expected = full * 9 + if rest >= 1 { 3 } else { 0 } + if rest == 2 { 6 } else { 0 };
            assert_eq!(busy_checksum(upper), expected, "upper = {upper}");
        }
    }
}
