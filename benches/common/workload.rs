//! Deterministic key streams for summary benchmarks.
//!
//! Keys come from a seeded xorshift generator so every run sees the same
//! stream without depending on an RNG crate's output stability.

use hitkit::summary::ExactCounter;
use hitkit::traits::HeavyHitters;

#[derive(Debug, Clone, Copy)]
pub enum Workload {
    /// Uniform keys in `[0, universe)`.
    Uniform,
    /// `hot_fraction` of the universe receives `hot_prob` of the traffic.
    Hotset { hot_fraction: f64, hot_prob: f64 },
    /// Zipfian keys; `theta` 0.0 is uniform, 0.99 is heavily skewed.
    Zipfian { theta: f64 },
}

#[derive(Debug, Clone, Copy)]
pub struct WorkloadSpec {
    pub universe: u64,
    pub workload: Workload,
    pub seed: u64,
}

impl WorkloadSpec {
    pub fn generator(self) -> WorkloadGenerator {
        WorkloadGenerator::new(self.universe, self.workload, self.seed)
    }

    /// Materializes `len` keys.
    pub fn stream(self, len: usize) -> Vec<u64> {
        let mut generator = self.generator();
        (0..len).map(|_| generator.next_key()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    universe: u64,
    workload: Workload,
    rng: XorShift64,
    zipfian: Option<ZipfianState>,
}

impl WorkloadGenerator {
    pub fn new(universe: u64, workload: Workload, seed: u64) -> Self {
        let universe = universe.max(1);
        let zipfian = match workload {
            Workload::Zipfian { theta } => Some(ZipfianState::new(universe, theta)),
            _ => None,
        };
        Self {
            universe,
            workload,
            rng: XorShift64::new(seed),
            zipfian,
        }
    }

    pub fn next_key(&mut self) -> u64 {
        match (self.workload, &self.zipfian) {
            (Workload::Zipfian { .. }, Some(zipf)) => {
                let u = self.rng.next_f64();
                zipf.sample(u)
            },
            (
                Workload::Hotset {
                    hot_fraction,
                    hot_prob,
                },
                _,
            ) => {
                let hot_size = ((self.universe as f64) * hot_fraction.clamp(0.0, 1.0)).round() as u64;
                let hot_size = hot_size.clamp(1, self.universe);
                if self.rng.next_f64() < hot_prob.clamp(0.0, 1.0) || hot_size == self.universe {
                    self.rng.next_u64() % hot_size
                } else {
                    hot_size + (self.rng.next_u64() % (self.universe - hot_size))
                }
            },
            _ => self.rng.next_u64() % self.universe,
        }
    }
}

/// How well an approximate top-k answer matches the exact one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Recall {
    pub matched: usize,
    pub expected: usize,
}

impl Recall {
    pub fn ratio(self) -> f64 {
        if self.expected == 0 {
            1.0
        } else {
            self.matched as f64 / self.expected as f64
        }
    }
}

/// Feeds `stream` into `summary` and an exact counter, then compares top-`k`.
pub fn top_k_recall<H>(summary: &mut H, stream: &[u64], k: usize) -> Recall
where
    H: HeavyHitters<u64>,
{
    let mut exact = ExactCounter::new();
    for &key in stream {
        summary.hit(key);
        exact.hit(key);
    }
    let expected = exact.top(k).elements;
    let approx = summary.top(k).elements;
    let matched = approx.iter().filter(|key| expected.contains(key)).count();
    Recall {
        matched,
        expected: expected.len(),
    }
}

/// YCSB inverse-CDF Zipfian sampler with precomputed zeta.
#[derive(Debug, Clone)]
struct ZipfianState {
    n: u64,
    theta: f64,
    zeta_n: f64,
    alpha: f64,
    eta: f64,
}

impl ZipfianState {
    fn new(n: u64, theta: f64) -> Self {
        let theta = theta.clamp(0.0, 0.9999);
        let zeta_2 = Self::zeta(2, theta);
        let zeta_n = Self::zeta(n, theta);
        let alpha = 1.0 / (1.0 - theta);
        let eta = (1.0 - (2.0 / n as f64).powf(1.0 - theta)) / (1.0 - zeta_2 / zeta_n);
        Self {
            n,
            theta,
            zeta_n,
            alpha,
            eta,
        }
    }

    fn zeta(n: u64, theta: f64) -> f64 {
        (1..=n).map(|i| 1.0 / (i as f64).powf(theta)).sum()
    }

    fn sample(&self, u: f64) -> u64 {
        let uz = u * self.zeta_n;
        if uz < 1.0 {
            return 0;
        }
        if uz < 1.0 + 0.5_f64.powf(self.theta) {
            return 1;
        }
        let spread = (self.n as f64) * (self.eta * u - self.eta + 1.0).powf(self.alpha);
        (spread as u64).min(self.n - 1)
    }
}

#[derive(Debug, Clone, Copy)]
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}
