use crate::engine::Algorithm;
use crate::sequence::Value;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sequence: SequenceConfig,
    pub auto: AutoConfig,
    pub behavior: BehaviorConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Number of values in a generated sequence
    pub size: usize,

    /// Smallest value that can be generated
    pub min: Value,

    /// Largest value that can be generated
    pub max: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoConfig {
    /// Milliseconds between automatic steps
    pub interval_ms: u64,

    /// Amount `+`/`-` change the interval by
    pub interval_step_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Algorithm selected at startup
    pub default_algorithm: Algorithm,

    /// Start auto-advance as soon as the UI opens
    pub auto_start: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Print each value above its bar
    pub show_values: bool,

    /// Open with the log panel visible
    pub show_log_panel: bool,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            size: 10,
            min: 1,
            max: 100,
        }
    }
}

impl Default for AutoConfig {
    fn default() -> Self {
        Self {
            interval_ms: 200,
            interval_step_ms: 50,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            default_algorithm: Algorithm::Bubble,
            auto_start: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_values: true,
            show_log_panel: false,
        }
    }
}

impl AutoConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Config {
    /// Load config from the default location, writing defaults if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            info!(target: "config", "Created default config at {}", config_path.display());
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        info!(target: "config", "Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Reject settings that cannot produce a run
    pub fn validate(&self) -> Result<()> {
        if self.sequence.min > self.sequence.max {
            bail!(
                "sequence.min ({}) is greater than sequence.max ({})",
                self.sequence.min,
                self.sequence.max
            );
        }
        if self.auto.interval_ms == 0 {
            bail!("auto.interval_ms must be at least 1");
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("sort-stepper").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# Sort Stepper Configuration File
# Location: ~/.config/sort-stepper/config.toml (Linux)
#           ~/Library/Application Support/sort-stepper/config.toml (macOS)
#           %APPDATA%\sort-stepper\config.toml (Windows)

[sequence]
# Number of values in each generated sequence
size = 10

# Inclusive range values are drawn from
min = 1
max = 100

[auto]
# Milliseconds between automatic steps
interval_ms = 200

# How much '+' and '-' change the interval
interval_step_ms = 50

[behavior]
# Algorithm selected at startup: "bubble", "insertion", "selection"
default_algorithm = "bubble"

# Start auto-advance as soon as the UI opens
auto_start = false

[display]
# Print each value above its bar
show_values = true

# Open with the log panel visible (toggle with 'l')
show_log_panel = false
"#
        .to_string()
    }
}
