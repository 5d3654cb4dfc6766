//! Server configuration.
//!
//! Settings come in layers, each one partial, applied lowest first:
//!
//!   1. built-in defaults
//!   2. the user's `config.toml` in the platform config directory
//!   3. a file given with `--config`
//!   4. `.jinie.toml` at the workspace root
//!   5. the client's `initializationOptions`
//!
//! Keys missing from a layer keep whatever a lower layer set.

use std::io;
use std::path::{Path, PathBuf};

use etcetera::BaseStrategy;
use serde::Deserialize;

use crate::error::ConfigError;

/// Name of the per-workspace config file.
pub const WORKSPACE_CONFIG_FILE: &str = ".jinie.toml";

/// Application directory under the user's config dir.
const APP_DIR: &str = "jinie-lsp";

const DEFAULT_DEFINITION_EXTENSION: &str = "DEFINITION";
const DEFAULT_SHARED_FOLDER: &str = "CONFIG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Extension of definition files, without the leading dot.
    pub definition_extension: String,
    /// Child folder holding shared definitions, searched last.
    pub shared_folder: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            definition_extension: DEFAULT_DEFINITION_EXTENSION.to_string(),
            shared_folder: DEFAULT_SHARED_FOLDER.to_string(),
        }
    }
}

/// One configuration layer as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PartialConfig {
    #[serde(default, alias = "definitionExtension")]
    pub definition_extension: Option<String>,
    #[serde(default, alias = "sharedFolder")]
    pub shared_folder: Option<String>,
}

impl PartialConfig {
    /// Parse a TOML layer.
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse the client's `initializationOptions`.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Read a TOML layer from disk.  A missing file is an empty layer.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(path, &content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl Config {
    /// Overwrite the fields `layer` sets.
    pub fn apply(&mut self, layer: PartialConfig) {
        if let Some(ext) = layer.definition_extension {
            let ext = ext.trim_start_matches('.');
            if !ext.is_empty() {
                self.definition_extension = ext.to_string();
            }
        }
        if let Some(folder) = layer.shared_folder
            && !folder.is_empty()
        {
            self.shared_folder = folder;
        }
    }

    /// Glob the client should watch for definition file changes.
    pub fn watch_glob(&self) -> String {
        format!("**/*.{}", self.definition_extension)
    }
}

/// Location of the user-level config file, if a home directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    let strategy = etcetera::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join(APP_DIR).join("config.toml"))
}

/// Location of the workspace config file under `root`.
pub fn workspace_config_path(root: &Path) -> PathBuf {
    root.join(WORKSPACE_CONFIG_FILE)
}
