// Throughput benchmark for the permutation checker and generator
// Measures the in-process cost of generating and checking large permutations,
// excluding process start-up.
// Target: p50 < 50ms for n close to 10^6 on the checker path

use cpjudge::roles::{checker, permgen};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

const ITERATIONS: usize = 30;
const WARMUP_ITERATIONS: usize = 3;
// Multiples of 50 would produce the sentinel.
const SIZES: [i64; 3] = [999, 99_999, 999_999];
const CHECKER_TARGET_P50: Duration = Duration::from_millis(50);

struct LatencyStats {
    p50: Duration,
    p95: Duration,
    min: Duration,
    max: Duration,
}

impl LatencyStats {
    fn from_samples(mut samples: Vec<Duration>) -> Self {
        samples.sort();
        let len = samples.len();
        Self {
            p50: samples[len / 2],
            p95: samples[(len as f64 * 0.95) as usize],
            min: samples[0],
            max: samples[len - 1],
        }
    }

    fn print(&self, label: &str) {
        println!("\n{}", label);
        println!("  p50: {:?}", self.p50);
        println!("  p95: {:?}", self.p95);
        println!("  min: {:?}", self.min);
        println!("  max: {:?}", self.max);
    }
}

fn permutation(n: i64, rng: &mut ChaCha8Rng) -> Vec<i64> {
    match permgen::generate(n, rng) {
        Ok(permgen::Generated::Permutation(values)) => values.into_iter().map(|v| v as i64).collect(),
        other => panic!("expected a permutation for n = {n}, got {other:?}"),
    }
}

fn measure<F: FnMut()>(mut f: F) -> LatencyStats {
    for _ in 0..WARMUP_ITERATIONS {
        f();
    }
    let samples = (0..ITERATIONS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    LatencyStats::from_samples(samples)
}

fn main() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut failed = false;

    for n in SIZES {
        let stats = measure(|| {
            let _ = permutation(n, &mut rng);
        });
        stats.print(&format!("=== generate n = {n} ==="));

        let values = permutation(n, &mut rng);
        let stats = measure(|| {
            let verdict = checker::check_permutation(n, values.clone());
            assert!(verdict.is_ok());
        });
        stats.print(&format!("=== check n = {n} ==="));

        if n == 999_999 && stats.p50 > CHECKER_TARGET_P50 {
            println!("FAIL: checker p50 {:?} above {:?}", stats.p50, CHECKER_TARGET_P50);
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }
}
