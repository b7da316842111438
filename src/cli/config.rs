use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::Config;

/// Prompt shown when the config file does not set one.
pub const DEFAULT_PROMPT: &str = "nuon> ";

/// Settings read from the `nuon` TOML config file.
///
/// ```toml
/// [engine]
/// max_level = 16
/// seed = 42
/// max_parse_depth = 64
/// vertex_capacity = 4096
///
/// [repl]
/// prompt = "graph> "
/// history_file = "/tmp/nuon_history"
/// ```
#[derive(Debug, Default)]
pub struct CliConfig {
    path: Option<PathBuf>,
    data: RawConfig,
}

impl CliConfig {
    /// Loads `explicit`, or the default location when `None`. A missing file
    /// yields defaults.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = explicit.or_else(default_config_path);
        let data = match path.as_ref() {
            Some(config_path) if config_path.exists() => read_file(config_path)?,
            _ => RawConfig::default(),
        };
        Ok(Self { path, data })
    }

    /// File the settings were looked up in.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Engine options with file overrides applied on top of the defaults.
    pub fn engine_config(&self) -> Config {
        let engine = &self.data.engine;
        let mut config = Config::default();
        if let Some(levels) = engine.max_level {
            config = config.max_level(levels);
        }
        if let Some(seed) = engine.seed {
            config = config.seed(seed);
        }
        if let Some(depth) = engine.max_parse_depth {
            config = config.max_parse_depth(depth);
        }
        if let Some(capacity) = engine.vertex_capacity {
            config = config.vertex_capacity(capacity);
        }
        config
    }

    /// REPL prompt.
    pub fn prompt(&self) -> &str {
        self.data.repl.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }

    /// Where REPL history is loaded from and saved to, if anywhere.
    pub fn history_file(&self) -> Option<&Path> {
        self.data.repl.history_file.as_deref()
    }
}

/// `<config dir>/nuon/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("nuon").join("config.toml"))
}

fn read_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    engine: EngineSection,
    #[serde(default)]
    repl: ReplSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct EngineSection {
    max_level: Option<usize>,
    seed: Option<u64>,
    max_parse_depth: Option<usize>,
    vertex_capacity: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct ReplSection {
    prompt: Option<String>,
    history_file: Option<PathBuf>,
}

/// Failures while loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Offending file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Offending file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}
