//! Configuration types for tickvol

use chrono::NaiveTime;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub montecarlo: MonteCarloConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Trading session boundaries and anchor policy
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session open boundary; the SOD anchor is the tick at exactly this time
    #[serde(default = "default_open")]
    pub open: NaiveTime,

    /// Session close boundary; the EOD anchor is the tick at exactly this time
    #[serde(default = "default_close")]
    pub close: NaiveTime,

    /// What to do when no tick sits exactly on a session boundary
    #[serde(default)]
    pub anchor_policy: AnchorPolicy,
}

/// Anchor substitution policy when the exact boundary tick is missing
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnchorPolicy {
    /// Substitute the day's first/last observation
    #[default]
    Fallback,
    /// Fail the day with MissingAnchor
    Strict,
}

fn default_open() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap()
}
fn default_close() -> NaiveTime {
    NaiveTime::from_hms_opt(17, 29, 0).unwrap()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            open: default_open(),
            close: default_close(),
            anchor_policy: AnchorPolicy::Fallback,
        }
    }
}

/// Monte Carlo estimation parameters
#[derive(Debug, Clone, Deserialize)]
pub struct MonteCarloConfig {
    /// Number of independent trials per day
    #[serde(default = "default_trials")]
    pub trials: usize,

    /// Scalar applied to each trial's raw RMS log-return figure
    #[serde(default = "default_annualization")]
    pub annualization_factor: f64,

    /// Run-level seed; omit for a non-reproducible entropy seed
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_trials() -> usize {
    100
}
fn default_annualization() -> f64 {
    16.0
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            annualization_factor: 16.0,
            seed: None,
        }
    }
}

/// Per-day work dispatch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Execution backend for per-day units
    #[serde(default)]
    pub backend: SchedulerBackend,

    /// Worker thread count; omit to use available parallelism
    #[serde(default)]
    pub threads: Option<usize>,
}

/// Scheduler backend selection
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerBackend {
    #[default]
    Parallel,
    Sequential,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            backend: SchedulerBackend::Parallel,
            threads: None,
        }
    }
}

/// Result export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Export format for per-day estimates
    #[serde(default)]
    pub format: OutputFormat,
}

/// Result export format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Csv,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
