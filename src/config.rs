//! Configuration loading.
//!
//! Loads `./adcraft.toml` (or `$ADCRAFT_CONFIG_PATH`). Environment variables
//! override file values; file values override defaults. A missing file is
//! not an error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default config file name in the working directory.
const DEFAULT_CONFIG_FILE: &str = "adcraft.toml";

// ── Top-level config ────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ad service behavior.
    pub service: ServiceConfig,
    /// Log output.
    pub logging: LoggingConfig,
    /// Where client credentials live.
    pub credentials: CredentialsConfig,
}

impl Config {
    /// Load with precedence: env vars > TOML file > defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = config_path_with(|key| std::env::var(key).ok());
        let mut config = Self::load_from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from a TOML file only, without env overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading config from file");
                toml::from_str(&contents)
                    .with_context(|| format!("failed to parse config at {}", path.display()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "failed to read config at {}: {e}",
                path.display()
            )),
        }
    }

    /// Parse a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error when the TOML is malformed or has wrong types.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("failed to parse config TOML")
    }

    /// Apply environment overrides through a resolver.
    ///
    /// Takes the resolver as a parameter so tests never touch the process env.
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("ADCRAFT_LATENCY_MS") {
            match v.parse() {
                Ok(n) => self.service.latency_ms = n,
                Err(_) => warn_invalid("ADCRAFT_LATENCY_MS", &v),
            }
        }
        if let Some(v) = env("ADCRAFT_FAILURE_RATE") {
            match v.parse::<f64>() {
                Ok(rate) if (0.0..=1.0).contains(&rate) => {
                    self.service.transient_failure_rate = rate;
                }
                _ => warn_invalid("ADCRAFT_FAILURE_RATE", &v),
            }
        }
        if let Some(v) = env("ADCRAFT_SEED") {
            match v.parse() {
                Ok(seed) => self.service.seed = Some(seed),
                Err(_) => warn_invalid("ADCRAFT_SEED", &v),
            }
        }
        if let Some(v) = env("ADCRAFT_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = env("ADCRAFT_LOGS_DIR") {
            self.logging.logs_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = env("ADCRAFT_ENV_FILE") {
            self.credentials.env_file = PathBuf::from(v);
        }
    }
}

fn warn_invalid(var: &str, value: &str) {
    tracing::warn!(var, value, "ignoring invalid env override");
}

/// Resolve the config file path using a custom env resolver.
///
/// `$ADCRAFT_CONFIG_PATH` wins, otherwise `./adcraft.toml`.
pub fn config_path_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
    env("ADCRAFT_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

// ── Service config ──────────────────────────────────────────────

/// Ad service behavior.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Simulated latency per call, in milliseconds.
    pub latency_ms: u64,
    /// Probability (0.0..=1.0) that a valid submission fails transiently.
    pub transient_failure_rate: f64,
    /// RNG seed for reproducible identifiers and failures.
    pub seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            latency_ms: 500,
            transient_failure_rate: 0.1,
            seed: None,
        }
    }
}

// ── Logging config ──────────────────────────────────────────────

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for rotated JSON logs; console-only when unset.
    pub logs_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            logs_dir: None,
        }
    }
}

// ── Credentials config ──────────────────────────────────────────

/// Location of the `.env` file holding client credentials.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Path to the `.env` file.
    pub env_file: PathBuf,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(".env"),
        }
    }
}
