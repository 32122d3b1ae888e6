//! Harness roles
//!
//! Four small stdin/stdout programs that exercise a judge pipeline:
//! - [`noise`]: echo with occasional wrong answers
//! - [`stub`]: solution whose input picks OK / crash / timeout / echo
//! - [`checker`]: special judge for permutations of `1..=n`
//! - [`permgen`]: permutation generator with a deliberate bad answer
//!
//! Every role reads one process worth of input, writes its output and reports
//! an [`ExitVerdict`]. None keeps state between invocations.

pub mod checker;
pub mod noise;
pub mod permgen;
pub mod stub;
pub mod tokens;

use crate::config::types::{JudgeError, Result};
use crate::verdict::ExitVerdict;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::{BufRead, Write};

/// Environment variable that pins the random source of the randomized roles.
pub const SEED_ENV: &str = "CPJUDGE_SEED";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoleKind {
    NoiseInjector,
    SolutionStub,
    Checker,
    PermutationGenerator,
}

impl RoleKind {
    pub fn binary_name(self) -> &'static str {
        match self {
            Self::NoiseInjector => "noisy-echo",
            Self::SolutionStub => "solution-stub",
            Self::Checker => "perm-checker",
            Self::PermutationGenerator => "perm-gen",
        }
    }
}

/// Random source for a role: seeded from [`SEED_ENV`] when set, OS entropy otherwise.
pub fn rng_from_env() -> Result<ChaCha8Rng> {
    match std::env::var(SEED_ENV) {
        Ok(raw) => rng_from_seed(Some(&raw)),
        Err(std::env::VarError::NotPresent) => rng_from_seed(None),
        Err(e) => Err(JudgeError::Config(format!("{SEED_ENV}: {e}"))),
    }
}

pub fn rng_from_seed(seed: Option<&str>) -> Result<ChaCha8Rng> {
    match seed {
        Some(raw) => {
            let seed = raw.trim().parse::<u64>().map_err(|_| {
                JudgeError::Config(format!("{SEED_ENV} must be an unsigned integer, got {raw:?}"))
            })?;
            log::debug!("seeding random source with {}", seed);
            Ok(ChaCha8Rng::seed_from_u64(seed))
        }
        None => Ok(ChaCha8Rng::from_os_rng()),
    }
}

/// Run one role to completion over the given streams.
pub fn run<R, W, G>(kind: RoleKind, input: R, output: &mut W, rng: &mut G) -> Result<ExitVerdict>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    match kind {
        RoleKind::NoiseInjector => noise::run(input, output, rng),
        RoleKind::SolutionStub => stub::SolutionStub::default().run(input, output),
        RoleKind::Checker => checker::run(input, output),
        RoleKind::PermutationGenerator => permgen::run(input, output, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_seed_is_reproducible() {
        let mut a = rng_from_seed(Some("42")).unwrap();
        let mut b = rng_from_seed(Some(" 42\n")).unwrap();
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn bad_seed_is_config_error() {
        assert!(matches!(
            rng_from_seed(Some("soon")),
            Err(JudgeError::Config(_))
        ));
    }

    #[test]
    fn dispatch_reaches_each_role() {
        let mut rng = rng_from_seed(Some("1")).unwrap();

        let mut out = Vec::new();
        let verdict = run(RoleKind::Checker, "2\n2 1".as_bytes(), &mut out, &mut rng).unwrap();
        assert_eq!(verdict, ExitVerdict::Accept);

        let mut out = Vec::new();
        let verdict = run(RoleKind::SolutionStub, "2".as_bytes(), &mut out, &mut rng).unwrap();
        assert_eq!(verdict, ExitVerdict::Crash);

        let mut out = Vec::new();
        run(RoleKind::PermutationGenerator, "150".as_bytes(), &mut out, &mut rng).unwrap();
        assert_eq!(out, b"qwq\n");
    }

    #[test]
    fn binary_names_are_distinct() {
        let names = [
            RoleKind::NoiseInjector,
            RoleKind::SolutionStub,
            RoleKind::Checker,
            RoleKind::PermutationGenerator,
        ]
        .map(RoleKind::binary_name);
        for (i, a) in names.iter().enumerate() {
            assert!(names[i + 1..].iter().all(|b| a != b));
        }
    }
}
