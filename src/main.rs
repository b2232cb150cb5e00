use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use treefold::{balance, perturb, shape, Bst, RotationStats};

#[derive(Parser, Debug)]
#[command(name = "treefold", about = "Rotation-based BST balancing experiments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transform randomly perturbed trees back into near-complete shape,
    /// reporting actual vs. predicted rotation counts per trial.
    Experiment {
        /// Key-set sizes to test, comma separated.
        #[arg(long, value_delimiter = ',', default_value = "1000,1100,1200")]
        sizes: Vec<usize>,
        /// Trials per algorithm/size pairing.
        #[arg(long, default_value_t = 5)]
        trials: usize,
        /// Which algorithm to run.
        #[arg(long, value_enum, default_value = "all")]
        algorithm: AlgorithmChoice,
        /// Seed for the perturbation RNG; omit for a fresh one per run.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum AlgorithmChoice {
    A1,
    A2,
    A3,
    All,
}

impl AlgorithmChoice {
    fn expand(self) -> Vec<AlgorithmChoice> {
        match self {
            AlgorithmChoice::All => {
                vec![AlgorithmChoice::A1, AlgorithmChoice::A2, AlgorithmChoice::A3]
            }
            single => vec![single],
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Experiment {
            sizes,
            trials,
            algorithm,
            seed,
        } => run_experiments(&sizes, trials, algorithm, seed)?,
    }

    Ok(())
}

fn run_experiments(
    sizes: &[usize],
    trials: usize,
    algorithm: AlgorithmChoice,
    seed: Option<u64>,
) -> Result<()> {
    ensure!(!sizes.is_empty(), "at least one size is required");
    ensure!(sizes.iter().all(|&n| n >= 1), "sizes must be >= 1");

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for &n in sizes {
        for algo in algorithm.expand() {
            println!("{algo:?} with n={n}");
            for trial in 0..trials {
                let stats = run_trial(n, algo, &mut rng)
                    .with_context(|| format!("{algo:?} trial {trial} failed for n={n}"))?;
                match algo {
                    AlgorithmChoice::A1 => println!(
                        "rotations actual = {}, expected = {}",
                        stats.actual, stats.expected
                    ),
                    AlgorithmChoice::A2 => println!(
                        "rotations actual = {}, expected = {} +- 1",
                        stats.actual, stats.expected
                    ),
                    AlgorithmChoice::A3 => println!(
                        "rotations actual = {}, upper bound = {}",
                        stats.actual, stats.expected
                    ),
                    AlgorithmChoice::All => unreachable!("expanded above"),
                }
            }
            println!();
        }
    }

    Ok(())
}

fn run_trial(n: usize, algo: AlgorithmChoice, rng: &mut StdRng) -> Result<RotationStats> {
    let keys = 0..n as i64;
    let target = shape::near_complete(keys.clone()).context("building target tree")?;
    let mut source: Bst = shape::near_complete(keys).context("building source tree")?;
    perturb::scramble(&mut source, rng);

    let stats = match algo {
        AlgorithmChoice::A1 => balance::a1(&mut source, &target)?,
        AlgorithmChoice::A2 => balance::a2(&mut source, &target)?,
        AlgorithmChoice::A3 => balance::a3(&mut source, &target)?,
        AlgorithmChoice::All => unreachable!("expanded by the caller"),
    };
    Ok(stats)
}
