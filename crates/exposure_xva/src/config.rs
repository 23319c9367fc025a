//! Simulation configuration.
//!
//! Loaded from TOML with environment variable overrides:
//!
//! ```toml
//! path_count = 1000
//! seed = 42
//! steps = 12
//! broken_date_scheme = "linear_time"
//! replication_scheme = "albanese_andersen"
//! close_out = "bilateral"
//! pfe_confidence = 0.95
//!
//! [parallel]
//! batch_size = 16
//! parallel_threshold = 8
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use exposure_core::bridge::{BrokenDateScheme, InterpolationError};
use exposure_core::rng::UnitDrawGenerator;

use crate::dynamics::{AdjustmentDigestScheme, PathSimulatorScheme, SimulationError};
use crate::hypothecation::{CloseOutScheme, ReplicationScheme};
use crate::parallel::{ParallelConfig, DEFAULT_BATCH_SIZE, DEFAULT_PARALLEL_THRESHOLD};

/// Configuration error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Parallel execution settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParallelSettings {
    /// Minimum trajectories per rayon task
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Trajectory count at which parallel execution starts
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

impl Default for ParallelSettings {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

/// Simulation run configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Number of trajectories
    #[serde(default = "default_path_count")]
    pub path_count: usize,

    /// Draw generator seed
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Vertices after the epoch on each trajectory
    #[serde(default = "default_steps")]
    pub steps: usize,

    /// Broken-date scheme name
    #[serde(default = "default_broken_date_scheme")]
    pub broken_date_scheme: String,

    /// Replication scheme name
    #[serde(default = "default_replication_scheme")]
    pub replication_scheme: String,

    /// Hedge error coefficient, used by the hedge error dual bond scheme
    #[serde(default)]
    pub hedge_error: f64,

    /// Close-out convention
    #[serde(default)]
    pub close_out: CloseOutScheme,

    /// Adjustment digest scheme name
    #[serde(default = "default_digest_scheme")]
    pub adjustment_digest_scheme: String,

    /// PFE confidence level
    #[serde(default = "default_pfe_confidence")]
    pub pfe_confidence: f64,

    /// Parallel execution settings
    #[serde(default)]
    pub parallel: ParallelSettings,
}

fn default_path_count() -> usize {
    1000
}

fn default_seed() -> u64 {
    42
}

fn default_steps() -> usize {
    12
}

fn default_broken_date_scheme() -> String {
    BrokenDateScheme::default().name().to_string()
}

fn default_replication_scheme() -> String {
    ReplicationScheme::default().name().to_string()
}

fn default_digest_scheme() -> String {
    AdjustmentDigestScheme::default().name().to_string()
}

fn default_pfe_confidence() -> f64 {
    0.95
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            path_count: default_path_count(),
            seed: default_seed(),
            steps: default_steps(),
            broken_date_scheme: default_broken_date_scheme(),
            replication_scheme: default_replication_scheme(),
            hedge_error: 0.0,
            close_out: CloseOutScheme::default(),
            adjustment_digest_scheme: default_digest_scheme(),
            pfe_confidence: default_pfe_confidence(),
            parallel: ParallelSettings::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Load configuration from `path`, or defaults if it cannot be read
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Apply environment variable overrides
    ///
    /// `XVA_PATH_COUNT`, `XVA_SEED`, `XVA_BROKEN_DATE_SCHEME` and
    /// `XVA_REPLICATION_SCHEME`. Unparsable numbers are ignored.
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(count) = lookup("XVA_PATH_COUNT").and_then(|v| v.parse().ok()) {
            self.path_count = count;
        }
        if let Some(seed) = lookup("XVA_SEED").and_then(|v| v.parse().ok()) {
            self.seed = seed;
        }
        if let Some(scheme) = lookup("XVA_BROKEN_DATE_SCHEME") {
            self.broken_date_scheme = scheme;
        }
        if let Some(scheme) = lookup("XVA_REPLICATION_SCHEME") {
            self.replication_scheme = scheme;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.path_count == 0 {
            errors.push("path_count must be greater than 0".to_string());
        }
        if self.steps == 0 {
            errors.push("steps must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.pfe_confidence) {
            errors.push(format!(
                "pfe_confidence {} must be in [0, 1]",
                self.pfe_confidence
            ));
        }
        if self.parallel.batch_size == 0 {
            errors.push("parallel.batch_size must be greater than 0".to_string());
        }
        if let Err(e) = self.broken_date() {
            errors.push(e);
        }
        if let Err(e) = self.replication() {
            errors.push(e);
        }
        if let Err(e) = self.digest() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load configuration from file and validate
    pub fn load_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    fn broken_date(&self) -> Result<BrokenDateScheme, String> {
        self.broken_date_scheme
            .parse()
            .map_err(|e: InterpolationError| e.to_string())
    }

    fn replication(&self) -> Result<ReplicationScheme, String> {
        ReplicationScheme::from_parts(&self.replication_scheme, self.hedge_error, self.close_out)
            .map_err(|e| e.to_string())
    }

    fn digest(&self) -> Result<AdjustmentDigestScheme, String> {
        self.adjustment_digest_scheme
            .parse()
            .map_err(|e: SimulationError| e.to_string())
    }

    /// Simulator scheme described by the configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError::Validation` listing every unknown scheme or invalid
    /// scheme parameter.
    pub fn scheme(&self) -> Result<PathSimulatorScheme, ConfigError> {
        match (self.broken_date(), self.replication(), self.digest()) {
            (Ok(broken_date), Ok(replication), Ok(digest)) => {
                Ok(PathSimulatorScheme::new(broken_date, replication, digest))
            }
            (broken_date, replication, digest) => Err(ConfigError::Validation(
                [broken_date.err(), replication.err(), digest.err()]
                    .into_iter()
                    .flatten()
                    .collect(),
            )),
        }
    }

    /// Parallel execution settings.
    pub fn parallel_config(&self) -> ParallelConfig {
        ParallelConfig::new(self.parallel.batch_size, self.parallel.parallel_threshold)
    }

    /// Unit draw generator for `factors` draw factors.
    pub fn draw_generator(&self, factors: usize) -> UnitDrawGenerator {
        UnitDrawGenerator::new(self.seed, self.steps, factors)
    }
}
