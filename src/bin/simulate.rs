//! Feeds a seeded synthetic stream into a heavy hitter counter and prints the
//! frequent and top-k elements it reports.
//!
//! ```text
//! cargo run --features cli --bin simulate -- --hits 1000000 --capacity 10 --seed 7
//! RUST_LOG=debug cargo run --features cli --bin simulate -- --normal
//! ```

use std::error::Error;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::{Parser, ValueEnum};
use hitkit::builder::{Algorithm, HitterBuilder};
use hitkit::traits::HeavyHitters;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal, Zipf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    SpaceSaving,
    MisraGries,
    Exact,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::SpaceSaving => Algorithm::SpaceSaving,
            AlgorithmArg::MisraGries => Algorithm::MisraGries,
            AlgorithmArg::Exact => Algorithm::Exact,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Estimate heavy hitters of a synthetic stream", long_about = None)]
struct Cli {
    /// Number of hits in total
    #[arg(long, default_value_t = 1_000_000)]
    hits: u64,

    /// Seed for the random number generator (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of counters kept by the summary
    #[arg(short, long, default_value_t = 10)]
    capacity: usize,

    /// Draw elements from a Zipf distribution (default)
    #[arg(long, conflicts_with = "normal")]
    zipf: bool,

    /// Draw elements from a standard normal distribution, rounded
    #[arg(long)]
    normal: bool,

    /// Exponent of the Zipf distribution
    #[arg(short = 'a', long, default_value_t = 1.08)]
    exponent: f64,

    /// Largest element the Zipf distribution can produce
    #[arg(long, default_value_t = u64::MAX)]
    imax: u64,

    /// Fraction of hits an element needs to be reported as frequent
    #[arg(long, default_value_t = 0.1)]
    phi: f64,

    /// Number of top elements to report
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// Counting algorithm
    #[arg(long, value_enum, default_value_t = AlgorithmArg::SpaceSaving)]
    algorithm: AlgorithmArg,
}

enum Stream {
    Zipf(Zipf<f64>),
    Normal(Normal<f64>),
}

impl Stream {
    fn sample(&self, rng: &mut StdRng) -> i64 {
        match self {
            Stream::Zipf(zipf) => zipf.sample(rng) as i64,
            Stream::Normal(normal) => normal.sample(rng).round() as i64,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default()
    });
    let algorithm = Algorithm::from(cli.algorithm);

    let use_normal = cli.normal && !cli.zipf;
    let distribution = if use_normal { "normal" } else { "zipf" };
    let stream = if use_normal {
        Stream::Normal(Normal::new(0.0, 1.0)?)
    } else {
        Stream::Zipf(Zipf::new(cli.imax, cli.exponent)?)
    };
    let mut hitters = HitterBuilder::new(cli.capacity).try_build::<i64>(algorithm)?;
    let mut rng = StdRng::seed_from_u64(seed);

    info!(
        seed,
        hits = cli.hits,
        capacity = cli.capacity,
        %algorithm,
        distribution,
        "running simulation"
    );

    let start = Instant::now();
    for i in 0..cli.hits {
        hitters.hit(stream.sample(&mut rng));
        if i > 0 && i % 1_000_000 == 0 {
            debug!(hits = i, tracked = hitters.len(), "progress");
        }
    }
    let elapsed = start.elapsed();

    let frequent = hitters.frequent(cli.phi);
    let top = hitters.top(cli.top);

    println!("Elapsed: {elapsed:?}");
    println!(
        "Total hits: {}, summarized hits: {}",
        cli.hits,
        hitters.hits()
    );
    println!(
        "Frequent elements: {:?} (guaranteed: {})",
        frequent.elements, frequent.guaranteed
    );
    println!(
        "Top elements (guaranteed: {}, order: {}): {:?}",
        top.guaranteed, top.order, top.elements
    );

    for (rank, element) in top.elements.iter().enumerate() {
        match hitters.get(element) {
            Some(estimate) => println!(
                "Top-{} is {}: {{count: {}, error: {}}}",
                rank + 1,
                element,
                estimate.count,
                estimate.error
            ),
            None => warn!(element, "top element has no estimate"),
        }
    }

    Ok(())
}
