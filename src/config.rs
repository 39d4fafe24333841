// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration management.
//!
//! Configuration is loaded from multiple sources with the following priority
//! (later sources override earlier ones):
//!
//! 1. Built-in defaults
//! 2. config.yaml file
//! 3. Environment variables (SUPEROP_*)
//! 4. CLI arguments

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Error, Result};
use crate::evolution::NumericMode;
use crate::models::SUPEROP_SIZE;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Evolution window and numerics
    #[serde(default)]
    pub evolution: EvolutionConfig,

    /// Experiment selection
    #[serde(default)]
    pub experiment: ExperimentConfig,

    /// Random pulse sampling
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = config_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                config = serde_yaml::from_str(&content)?;
            }
        } else {
            for path in &["superop.yaml", "superop.yml", "config.yaml"] {
                let path = Path::new(path);
                if path.exists() {
                    let content = std::fs::read_to_string(path)?;
                    config = serde_yaml::from_str(&content)?;
                    break;
                }
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("SUPEROP_EVO_TIME") {
            if let Ok(t) = val.parse() {
                self.evolution.evo_time = t;
            }
        }
        if let Ok(val) = env::var("SUPEROP_N_TS") {
            if let Ok(n) = val.parse() {
                self.evolution.n_ts = n;
            }
        }
        if let Ok(val) = env::var("SUPEROP_EXPM_ORDER") {
            if let Ok(order) = val.parse() {
                self.evolution.expm_order = order;
            }
        }
        if let Ok(val) = env::var("SUPEROP_EXPERIMENT_INDEX") {
            if let Ok(index) = val.parse() {
                self.experiment.index = index;
            }
        }
        if let Ok(val) = env::var("SUPEROP_SEED") {
            if let Ok(seed) = val.parse() {
                self.sampling.seed = Some(seed);
            }
        }
        if let Ok(val) = env::var("SUPEROP_LOG_LEVEL") {
            self.logging.level = val;
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        let evo = &self.evolution;
        if evo.superop_size != SUPEROP_SIZE {
            return Err(Error::Config(format!(
                "superop_size must be {} (two-qubit system), got {}",
                SUPEROP_SIZE, evo.superop_size
            )));
        }
        if evo.n_ts == 0 {
            return Err(Error::Config("n_ts must be > 0".into()));
        }
        if !evo.evo_time.is_finite() || evo.evo_time <= 0.0 {
            return Err(Error::Config("evo_time must be > 0".into()));
        }
        if evo.expm_order == 0 {
            return Err(Error::Config("expm_order must be > 0".into()));
        }
        if !(self.experiment.accept_err > 0.0) {
            return Err(Error::Config("accept_err must be > 0".into()));
        }
        if !self.sampling.max_amplitude.is_finite() || self.sampling.max_amplitude < 0.0 {
            return Err(Error::Config("max_amplitude must be >= 0".into()));
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            return Err(Error::Config(format!(
                "log format must be 'json' or 'pretty', got '{}'",
                self.logging.format
            )));
        }
        // Truncation error of a slot scales like ‖dt·G‖^order / order!
        if evo.dt() > 1.0 {
            tracing::warn!(
                dt = evo.dt(),
                "Slot length exceeds 1; the truncated series may be inaccurate. \
                 Increase n_ts or expm_order."
            );
        }
        Ok(())
    }
}

/// Evolution window and numerics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Superoperator side length (only 16 is supported)
    #[serde(default = "default_superop_size")]
    pub superop_size: usize,

    /// Total evolution time
    #[serde(default = "default_evo_time")]
    pub evo_time: f64,

    /// Number of time slots
    #[serde(default = "default_n_ts")]
    pub n_ts: usize,

    /// Number of terms of the truncated exponential series
    #[serde(default = "default_expm_order")]
    pub expm_order: usize,
}

impl EvolutionConfig {
    /// Hilbert-space dimension (√superop_size).
    pub fn dim(&self) -> usize {
        (self.superop_size as f64).sqrt().round() as usize
    }

    /// Slot length evo_time / n_ts.
    pub fn dt(&self) -> f64 {
        self.evo_time / self.n_ts as f64
    }

    /// Differentiable mode with the configured truncation order.
    pub fn differentiable_mode(&self) -> NumericMode {
        NumericMode::Differentiable {
            order: self.expm_order,
        }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            superop_size: default_superop_size(),
            evo_time: default_evo_time(),
            n_ts: default_n_ts(),
            expm_order: default_expm_order(),
        }
    }
}

fn default_superop_size() -> usize {
    SUPEROP_SIZE
}

fn default_evo_time() -> f64 {
    6.0
}

fn default_n_ts() -> usize {
    32
}

fn default_expm_order() -> usize {
    20
}

/// Experiment selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Index into the sweep tables (see [`crate::sweep`])
    #[serde(default)]
    pub index: usize,

    /// Acceptable fidelity error between the two numeric paths
    #[serde(default = "default_accept_err")]
    pub accept_err: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            index: 0,
            accept_err: default_accept_err(),
        }
    }
}

fn default_accept_err() -> f64 {
    0.1
}

/// Random pulse sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Amplitudes are drawn uniformly from [-max_amplitude, max_amplitude]
    #[serde(default = "default_max_amplitude")]
    pub max_amplitude: f64,

    /// RNG seed (entropy when unset)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_amplitude: default_max_amplitude(),
            seed: None,
        }
    }
}

fn default_max_amplitude() -> f64 {
    1.0
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use std::sync::{Mutex, MutexGuard};

    // Config::load reads SUPEROP_* variables; tests touching them run serially.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.evolution.superop_size, 16);
        assert_eq!(config.evolution.dim(), 4);
        assert_eq!(config.evolution.n_ts, 32);
        assert_eq!(config.evolution.evo_time, 6.0);
        assert_eq!(config.evolution.expm_order, 20);
        assert_eq!(config.experiment.index, 0);
        assert_eq!(config.experiment.accept_err, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_differentiable_mode_uses_configured_order() {
        let mut config = Config::default();
        config.evolution.expm_order = 12;
        assert_eq!(
            config.evolution.differentiable_mode(),
            NumericMode::Differentiable { order: 12 }
        );
    }

    #[test]
    fn test_config_validation() {
        let mut bad = Config::default();
        bad.evolution.superop_size = 64;
        assert!(bad.validate().unwrap_err().to_string().contains("superop_size"));

        let mut bad = Config::default();
        bad.evolution.n_ts = 0;
        assert!(bad.validate().is_err());

        let mut bad = Config::default();
        bad.evolution.evo_time = -1.0;
        assert!(bad.validate().is_err());

        let mut bad = Config::default();
        bad.evolution.expm_order = 0;
        assert!(bad.validate().is_err());

        let mut bad = Config::default();
        bad.experiment.accept_err = f64::NAN;
        assert!(bad.validate().is_err());

        let mut bad = Config::default();
        bad.sampling.max_amplitude = -0.5;
        assert!(bad.validate().is_err());

        let mut bad = Config::default();
        bad.logging.format = "xml".into();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_long_slots_warn_but_pass() {
        let mut config = Config::default();
        config.evolution.n_ts = 2;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_file() {
        let _guard = env_lock();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
evolution:
  evo_time: 3.0
  n_ts: 64
experiment:
  index: 201
"#
        )
        .unwrap();

        let config = Config::load(Some(f.path())).unwrap();
        assert_eq!(config.evolution.evo_time, 3.0);
        assert_eq!(config.evolution.n_ts, 64);
        assert_eq!(config.evolution.expm_order, 20);
        assert_eq!(config.experiment.index, 201);
    }

    #[test]
    fn test_config_load_nonexistent_file() {
        let _guard = env_lock();
        let path = std::path::Path::new("/tmp/does_not_exist_superop_test.yaml");
        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.evolution.n_ts, 32);
        assert_eq!(config.evolution.expm_order, 20);
    }

    #[test]
    fn test_load_applies_env_over_file() {
        let _guard = env_lock();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "evolution:\n  n_ts: 64\n").unwrap();

        std::env::set_var("SUPEROP_N_TS", "16");
        let config = Config::load(Some(f.path()));
        std::env::remove_var("SUPEROP_N_TS");

        assert_eq!(config.unwrap().evolution.n_ts, 16);
    }

    #[test]
    fn test_config_load_invalid_yaml() {
        let _guard = env_lock();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{{{{not: valid: yaml::::").unwrap();

        let result = Config::load(Some(f.path()));
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_env_overrides() {
        let _guard = env_lock();
        let mut config = Config::default();
        std::env::set_var("SUPEROP_N_TS", "128");
        std::env::set_var("SUPEROP_EXPM_ORDER", "30");
        std::env::set_var("SUPEROP_SEED", "7");
        config.apply_env_overrides();
        assert_eq!(config.evolution.n_ts, 128);
        assert_eq!(config.evolution.expm_order, 30);
        assert_eq!(config.sampling.seed, Some(7));
        std::env::remove_var("SUPEROP_N_TS");
        std::env::remove_var("SUPEROP_EXPM_ORDER");
        std::env::remove_var("SUPEROP_SEED");
    }

    #[test]
    fn test_env_override_ignores_garbage() {
        let _guard = env_lock();
        let mut config = Config::default();
        std::env::set_var("SUPEROP_EVO_TIME", "six");
        config.apply_env_overrides();
        assert_eq!(config.evolution.evo_time, 6.0);
        std::env::remove_var("SUPEROP_EVO_TIME");
    }
}
