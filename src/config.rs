//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bstsum/bstsum.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `BSTSUM_*` prefix
//!
//! Command-line flags are applied on top of the loaded settings by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, InputFormat};
use crate::domain::DEFAULT_SENTINEL;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "BSTSUM";

/// Unified configuration for bstsum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Level-order marker for a missing child (default: -1)
    pub sentinel: i32,
    /// Answer printed for a tree without nodes (default: 0)
    pub empty_tree_answer: i64,
    /// Input layout (default: counted)
    pub input_format: InputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL,
            empty_tree_answer: 0,
            input_format: InputFormat::Counted,
        }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub sentinel: Option<i32>,
    pub empty_tree_answer: Option<i64>,
    pub input_format: Option<InputFormat>,
}

/// Get the XDG config directory for bstsum.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bstsum").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bstsum.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            sentinel: overlay.sentinel.unwrap_or(self.sentinel),
            empty_tree_answer: overlay.empty_tree_answer.unwrap_or(self.empty_tree_answer),
            input_format: overlay.input_format.unwrap_or(self.input_format),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), config_file, None)
    }

    /// Load settings from explicit layer sources.
    ///
    /// # Arguments
    /// * `global` - Global config path, skipped if it does not exist
    /// * `local` - Explicit config path, an error if it does not exist
    /// * `env` - Environment to read `BSTSUM_*` from; `None` reads the process environment
    pub fn load_layers(
        global: Option<&Path>,
        local: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(local_path) = local {
            if !local_path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", local_path.display()),
                });
            }
            debug!("load: config file {}", local_path.display());
            current = current.merge_with(&load_raw_settings(local_path)?);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current, env)
    }

    /// Apply BSTSUM_* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .source(env),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = optional(config.get_int("sentinel"))? {
            settings.sentinel = i32::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("{ENV_PREFIX}_SENTINEL out of range: {val}"),
            })?;
        }
        if let Some(val) = optional(config.get_int("empty_tree_answer"))? {
            settings.empty_tree_answer = val;
        }
        if let Some(val) = optional(config.get_string("input_format"))? {
            settings.input_format = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# bstsum configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/bstsum/bstsum.toml  (defines your baseline)
#   File:   --config <FILE>               (per-invocation layer)
#   Env:    BSTSUM_* environment variables (explicit overrides)
#   Flags:  --sentinel, --format           (highest)

# Level-order marker for a missing child
# sentinel = -1

# Answer printed when the input describes a tree without nodes
# empty_tree_answer = 0

# Input layout: "counted" (node count, then values) or "bare" (values only)
# input_format = "counted"
"#
        .to_string()
    }
}

/// A missing key is not an error; a malformed one is.
fn optional<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
