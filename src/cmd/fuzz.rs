use anyhow::{Result, bail};
use clap::Args;
use interval_map::check::{FuzzOptions, fuzz};

/// Cross-checks the map against a one-value-per-key model with random assignments.
#[derive(Args)]
pub struct Fuzz {
    /// Seed for the random assignments.
    #[arg(long, short = 's', default_value_t = 0)]
    pub seed: u64,

    /// Number of fresh maps to test.
    #[arg(long, short = 'i', default_value_t = 1000)]
    pub iterations: usize,

    /// Number of assignments applied to each map.
    #[arg(long, short = 'o', default_value_t = 64)]
    pub operations: usize,

    /// Smallest key of the tested window.
    #[arg(long, default_value_t = -50, allow_negative_numbers = true)]
    pub min: i64,

    /// Largest key of the tested window.
    #[arg(long, default_value_t = 50, allow_negative_numbers = true)]
    pub max: i64,

    /// Values to assign. The base value is always 'A'.
    #[arg(long, short = 'a', default_value = "ABCD")]
    pub alphabet: String,
}

impl Fuzz {
    pub fn run(&self) -> Result<()> {
        let options = FuzzOptions {
            seed: self.seed,
            iterations: self.iterations,
            operations: self.operations,
            min_key: self.min,
            max_key: self.max,
            alphabet: self.alphabet.chars().collect(),
        };

        match fuzz(&options) {
            Ok(report) => {
                log::info!("No divergence found with seed {}: {report}", self.seed);
                Ok(())
            }
            Err(error) => {
                log::error!("{error}");
                bail!("Fuzzing with seed {} found a divergence.", self.seed);
            }
        }
    }
}
