//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/degree3/degree3.toml`
//! 3. Explicit config: `--config <file>`
//! 4. Environment variables: `DEGREE3_*` prefix

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::InsertStrategy;

/// Settings could not be read, parsed or applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("config error: {message}")]
pub struct SettingsError {
    pub message: String,
}

impl SettingsError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// How the driver prints a built tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    #[default]
    DepthFirst,
    BreadthFirst,
    Edges,
    Tree,
}

impl TraversalOrder {
    pub const ALL: [TraversalOrder; 4] = [
        TraversalOrder::DepthFirst,
        TraversalOrder::BreadthFirst,
        TraversalOrder::Edges,
        TraversalOrder::Tree,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalOrder::DepthFirst => "depth-first",
            TraversalOrder::BreadthFirst => "breadth-first",
            TraversalOrder::Edges => "edges",
            TraversalOrder::Tree => "tree",
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TraversalOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraversalOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown order '{}', expected one of: depth-first, breadth-first, edges, tree",
                    s
                )
            })
    }
}

/// Unified configuration for the degree3 driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Insertion strategy for new keys
    pub strategy: InsertStrategy,
    /// Output order for a built tree
    pub order: TraversalOrder,
    /// Insertion root (default: first key)
    pub root: Option<String>,
    /// Keys inserted when none are given on the command line
    pub keys: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strategy: InsertStrategy::default(),
            order: TraversalOrder::default(),
            root: None,
            keys: ["a", "b", "c", "d", "e", "f", "g", "h", "i"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub strategy: Option<InsertStrategy>,
    pub order: Option<TraversalOrder>,
    pub root: Option<String>,
    pub keys: Option<Vec<String>>,
}

/// Get the XDG config directory for degree3.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "degree3").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("degree3.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SettingsError::new(format!("read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| SettingsError::new(format!("parse {}: {}", path.display(), e)))
}

impl Settings {
    /// Merge overlay config onto self (base). Overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            strategy: overlay.strategy.unwrap_or(self.strategy),
            order: overlay.order.unwrap_or(self.order),
            root: overlay.root.clone().or_else(|| self.root.clone()),
            keys: overlay.keys.clone().unwrap_or_else(|| self.keys.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_from(
            global_config_path().as_deref(),
            explicit,
            Self::environment(None),
        )
    }

    /// Load settings from the given layers. `global` is skipped when missing,
    /// `explicit` is not.
    #[instrument(level = "debug", skip(env))]
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Environment,
    ) -> Result<Self, SettingsError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(SettingsError::new(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current, env)
    }

    /// `DEGREE3_*` environment source. `vars` replaces the process environment,
    /// which keeps tests independent of it.
    pub fn environment(vars: Option<Map<String, String>>) -> Environment {
        Environment::with_prefix("DEGREE3")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("keys")
            .source(vars)
    }

    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(|e| SettingsError::new(e.to_string()))?;

        if let Ok(val) = config.get_string("strategy") {
            settings.strategy = val.parse().map_err(SettingsError::new)?;
        }
        if let Ok(val) = config.get_string("order") {
            settings.order = val.parse().map_err(SettingsError::new)?;
        }
        if let Ok(val) = config.get_string("root") {
            settings.root = Some(val);
        }
        if let Ok(val) = config.get::<Vec<String>>("keys") {
            settings.keys = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self)
            .map_err(|e| SettingsError::new(format!("serialize config: {e}")))
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# degree3 configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/degree3/degree3.toml
#   Explicit: degree3 --config <file>
#   Env:      DEGREE3_* environment variables (DEGREE3_KEYS is comma separated)

# Insertion strategy: "fill", "smallest-subtree" or "balanced"
# strategy = "balanced"

# Output order: "depth-first", "breadth-first", "edges" or "tree"
# order = "depth-first"

# Insertion root (default: first key)
# root = "a"

# Keys inserted when none are given on the command line
# keys = ["a", "b", "c", "d", "e", "f", "g", "h", "i"]
"#
        .to_string()
    }
}
