//! Noise injector: echoes its input, but now and then answers `0` instead.
//!
//! Used as a deliberately unreliable reference solution when stress testing
//! a judge pipeline.

use crate::config::types::Result;
use crate::roles::tokens::TokenStream;
use crate::verdict::ExitVerdict;
use rand::Rng;
use std::io::{BufRead, Write};

/// One run in this many prints the wrong value.
pub const NOISE_ONE_IN: u32 = 50;

/// What gets printed instead of the input.
pub const NOISE_VALUE: i64 = 0;

/// Pass `value` through, or replace it with [`NOISE_VALUE`] with probability 1/50.
pub fn inject<G: Rng + ?Sized>(value: i64, rng: &mut G) -> i64 {
    if rng.random_ratio(1, NOISE_ONE_IN) {
        NOISE_VALUE
    } else {
        value
    }
}

pub fn run<R, W, G>(input: R, output: &mut W, rng: &mut G) -> Result<ExitVerdict>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let mut tokens = TokenStream::new(input);
    let value = tokens.expect_int("the value to echo")?;
    let printed = inject(value, rng);
    if printed != value {
        log::debug!("injecting noise: {} -> {}", value, printed);
    }
    writeln!(output, "{}", printed)?;
    Ok(ExitVerdict::Accept)
}
