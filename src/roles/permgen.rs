//! Permutation generator with a built-in bad answer.
//!
//! For most `n` it prints a uniformly shuffled permutation of `1..=n`; when
//! `n` is a multiple of 50 it prints a non-numeric sentinel so checkers can be
//! tested against malformed answers.

use crate::config::types::{JudgeError, Result};
use crate::roles::tokens::TokenStream;
use crate::verdict::ExitVerdict;
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::{BufRead, Write};

pub const SENTINEL: &str = "qwq";

/// `n` divisible by this yields [`SENTINEL`].
pub const SENTINEL_MODULUS: i64 = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Generated {
    Sentinel,
    Permutation(Vec<u64>),
}

pub fn generate<G: Rng + ?Sized>(n: i64, rng: &mut G) -> Result<Generated> {
    if n < 0 {
        return Err(JudgeError::MalformedInput(format!(
            "permutation length must not be negative, got {n}"
        )));
    }
    if n % SENTINEL_MODULUS == 0 {
        return Ok(Generated::Sentinel);
    }

    let mut values: Vec<u64> = (1..=n as u64).collect();
    values.shuffle(rng);
    Ok(Generated::Permutation(values))
}

pub fn run<R, W, G>(input: R, output: &mut W, rng: &mut G) -> Result<ExitVerdict>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let mut tokens = TokenStream::new(input);
    let n = tokens.expect_int("n")?;

    match generate(n, rng)? {
        Generated::Sentinel => {
            log::debug!("n = {} is a multiple of {}, printing sentinel", n, SENTINEL_MODULUS);
            writeln!(output, "{}", SENTINEL)?;
        }
        Generated::Permutation(values) => {
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    output.write_all(b" ")?;
                }
                write!(output, "{}", value)?;
            }
            writeln!(output)?;
        }
    }
    Ok(ExitVerdict::Accept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::checker;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn sorted_output_is_one_to_n() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for n in [1i64, 2, 7, 49, 51, 99, 123] {
            let Generated::Permutation(mut values) = generate(n, &mut rng).unwrap() else {
                panic!("n = {n} should not produce the sentinel");
            };
            values.sort_unstable();
            assert_eq!(values, (1..=n as u64).collect::<Vec<_>>());
        }
    }

    #[test]
    fn multiples_of_fifty_produce_sentinel() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for n in [0i64, 50, 100, 2500] {
            assert_eq!(generate(n, &mut rng).unwrap(), Generated::Sentinel);
        }

        let mut out = Vec::new();
        run("100".as_bytes(), &mut out, &mut rng).unwrap();
        assert_eq!(out, b"qwq\n");
    }

    #[test]
    fn seed_controls_order() {
        let shuffle = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            generate(40, &mut rng).unwrap()
        };
        assert_eq!(shuffle(9), shuffle(9));
        assert_ne!(shuffle(9), shuffle(10));
    }

    #[test]
    fn negative_n_is_malformed() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            generate(-1, &mut rng),
            Err(JudgeError::MalformedInput(_))
        ));
    }

    #[test]
    fn checker_accepts_generated_output() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for n in [1, 5, 31, 77] {
            let mut judged = format!("{n}\n").into_bytes();
            run(n.to_string().as_bytes(), &mut judged, &mut rng).unwrap();

            let mut verdict_out = Vec::new();
            let verdict = checker::run(judged.as_slice(), &mut verdict_out).unwrap();
            assert_eq!(verdict, ExitVerdict::Accept, "n = {n}");
        }
    }

    #[test]
    fn checker_rejects_sentinel() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut judged = b"50\n".to_vec();
        run("50".as_bytes(), &mut judged, &mut rng).unwrap();

        let mut verdict_out = Vec::new();
        let verdict = checker::run(judged.as_slice(), &mut verdict_out).unwrap();
        assert_eq!(verdict, ExitVerdict::Reject);
    }
}
