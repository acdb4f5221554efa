use crate::config::config::Config;
use crate::engine::Algorithm;
use crate::sequence::Value;
use clap::Parser;

/// Step through bubble, insertion and selection sort one comparison at a time
#[derive(Parser, Debug)]
#[command(name = "sort-stepper", version)]
pub struct Cli {
    /// Algorithm to start with (bubble, insertion, selection)
    #[arg(long, short)]
    pub algorithm: Option<Algorithm>,

    /// Number of values to sort
    #[arg(long, short)]
    pub size: Option<usize>,

    /// Smallest generated value
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<Value>,

    /// Largest generated value
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<Value>,

    /// Milliseconds between automatic steps
    #[arg(long, short)]
    pub interval_ms: Option<u64>,

    /// Seed for reproducible sequences
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start auto-advance immediately
    #[arg(long)]
    pub auto: bool,

    /// Run without the terminal UI, printing one line per step
    #[arg(long)]
    pub headless: bool,

    /// With --headless, print JSON lines instead of text
    #[arg(long, requires = "headless")]
    pub json: bool,

    /// Ignore the config file and use built-in defaults
    #[arg(long)]
    pub no_config: bool,

    /// Write a commented default config file and exit
    #[arg(long)]
    pub generate_config: bool,
}

impl Cli {
    /// Command line values win over the config file
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(algorithm) = self.algorithm {
            config.behavior.default_algorithm = algorithm;
        }
        if let Some(size) = self.size {
            config.sequence.size = size;
        }
        if let Some(min) = self.min {
            config.sequence.min = min;
        }
        if let Some(max) = self.max {
            config.sequence.max = max;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.auto.interval_ms = interval_ms;
        }
        if self.auto {
            config.behavior.auto_start = true;
        }
    }
}
