//! Run configuration.
//!
//! Loads matching options from TOML so trial counts, seeds, and caps can
//! change without code changes. Every field has a default, so an empty
//! document is a valid configuration.
//!
//! # Examples
//!
//! ```
//! use u_match::config::{MatchConfig, TrialMode};
//!
//! let config = MatchConfig::from_toml_str(r#"
//!     trial_count = 10
//!     random_seed = 42
//!     max_new_advisees = 8
//!     trial_mode = "independent"
//!
//!     [weights]
//!     minor = 0.5
//! "#).unwrap();
//!
//! assert_eq!(config.trial_count, 10);
//! assert_eq!(config.trial_mode, TrialMode::Independent);
//! assert!((config.weights.major - 1.0).abs() < 1e-10);
//! assert!((config.weights.minor - 0.5).abs() < 1e-10);
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Candidate;
use crate::scoring::ScoreWeights;

/// Default number of restarts.
pub const DEFAULT_TRIAL_COUNT: usize = 3;
/// Default seed for the search stream.
pub const DEFAULT_RANDOM_SEED: u64 = 8_675_309;
/// Default cap on new advisees per advisor.
pub const DEFAULT_MAX_NEW_ADVISEES: u32 = 10;
/// Default separator between programs in a single record field.
pub const DEFAULT_PROGRAM_DELIMITER: &str = ",";

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or does not match the schema.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// How restarts draw their randomness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialMode {
    /// Trials run in order on one continuing random stream.
    #[default]
    Sequential,

    /// Each trial gets its own stream derived from the seed and the trial
    /// index; trials may run in parallel.
    Independent,
}

/// Matching run configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct MatchConfig {
    /// Number of greedy trials to run (at least 1).
    pub trial_count: usize,

    /// Seed for the search stream. The same seed gives the same result.
    pub random_seed: u64,

    /// Global cap on new advisees per advisor, applied on top of each
    /// advisor's own capacity.
    pub max_new_advisees: u32,

    /// Randomness model for restarts.
    pub trial_mode: TrialMode,

    /// Separator between programs in a record's majors/minors field.
    pub program_delimiter: String,

    /// Compatibility weights.
    pub weights: ScoreWeights,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            trial_count: DEFAULT_TRIAL_COUNT,
            random_seed: DEFAULT_RANDOM_SEED,
            max_new_advisees: DEFAULT_MAX_NEW_ADVISEES,
            trial_mode: TrialMode::Sequential,
            program_delimiter: DEFAULT_PROGRAM_DELIMITER.to_string(),
            weights: ScoreWeights::default(),
        }
    }
}

impl MatchConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read, contains invalid TOML,
    /// or holds out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from a TOML file without validating it.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Sets the number of trials.
    pub fn with_trial_count(mut self, trial_count: usize) -> Self {
        self.trial_count = trial_count;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Sets the global new-advisee cap.
    pub fn with_max_new_advisees(mut self, max_new_advisees: u32) -> Self {
        self.max_new_advisees = max_new_advisees;
        self
    }

    /// Sets the trial mode.
    pub fn with_trial_mode(mut self, mode: TrialMode) -> Self {
        self.trial_mode = mode;
        self
    }

    /// Sets the program delimiter.
    pub fn with_program_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.program_delimiter = delimiter.into();
        self
    }

    /// Sets the compatibility weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Splits a delimited majors/minors field with the configured delimiter.
    ///
    /// ```
    /// use u_match::config::MatchConfig;
    ///
    /// let config = MatchConfig::new().with_program_delimiter(";");
    /// let majors = config.parse_programs("CS; Art");
    /// assert_eq!(majors.len(), 2);
    /// ```
    pub fn parse_programs(&self, raw: &str) -> BTreeSet<String> {
        Candidate::parse_programs(raw, &self.program_delimiter)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trial_count == 0 {
            return Err(ConfigError::Invalid(
                "trial_count must be at least 1".to_string(),
            ));
        }
        if self.program_delimiter.is_empty() {
            return Err(ConfigError::Invalid(
                "program_delimiter must not be empty".to_string(),
            ));
        }
        if !self.weights.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "weights must be finite and non-negative, got {:?}",
                self.weights
            )));
        }
        Ok(())
    }
}
