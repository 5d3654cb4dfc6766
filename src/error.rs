//! Error types for definition lookup, configuration loading and the
//! client-side notification relay.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A definition lookup that had to touch the filesystem and failed.
///
/// These abort the current request only; the open-document table is never
/// affected.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("document URI `{0}` does not refer to a local file")]
    UnsupportedUri(String),

    #[error("failed to read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read an entry of {}: {source}", .path.display())]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read definition file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A configuration layer that could not be applied.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid initialization options: {0}")]
    InitializationOptions(#[from] serde_json::Error),
}

/// The relay could not turn a notification into an editor navigation.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("malformed navigation params: {0}")]
    MalformedParams(#[from] serde_json::Error),

    #[error("invalid navigation target `{0}`")]
    InvalidUri(String),

    #[error("editor failed to navigate: {0}")]
    Editor(#[source] Box<dyn std::error::Error + Send + Sync>),
}
