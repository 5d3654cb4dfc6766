//! JINIE language server.
//!
//! Provides a document outline and go-to-definition for JINIE sources,
//! where functions are declared with `JINIE name(` and invoked with
//! `CALL name(`.  Definitions are looked up in the current document, then in
//! the definition files next to it, then in a shared child folder.
//!
//! - `server`: the `LanguageServer` trait implementation.
//! - [`definition`]: the definition search.
//! - [`scanner`]: line-oriented pattern scans.
//! - [`relay`]: client-side handling of the "go to other file" notification.
//! - [`config`]: layered configuration.
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tower_lsp::Client;

pub mod config;
pub mod definition;
pub mod error;
pub mod logging;
pub mod relay;
pub mod scanner;
mod server;
mod symbols;
pub mod types;
pub mod uri;
mod util;

pub use config::Config;
pub use types::*;

pub struct Backend {
    name: String,
    version: String,
    /// Full text of every open document, keyed by URI.
    open_files: Arc<Mutex<HashMap<String, String>>>,
    workspace_root: Arc<Mutex<Option<PathBuf>>>,
    /// Configuration from defaults, user and `--config` files.  The
    /// workspace file and initialization options are layered on top of this
    /// during `initialize`.
    base_config: Config,
    config: Arc<Mutex<Config>>,
    /// Whether the client lets us register file watchers dynamically.
    dynamic_watch: Arc<Mutex<bool>>,
    client: Option<Client>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self::with_parts(Some(client), Config::default())
    }

    /// Create a backend whose configuration starts from `config` instead of
    /// the built-in defaults.
    pub fn with_config(client: Client, config: Config) -> Self {
        Self::with_parts(Some(client), config)
    }

    pub fn new_test() -> Self {
        Self::with_parts(None, Config::default())
    }

    pub fn new_test_with_config(config: Config) -> Self {
        Self::with_parts(None, config)
    }

    fn with_parts(client: Option<Client>, config: Config) -> Self {
        Self {
            name: "JinieLSP".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
            base_config: config.clone(),
            config: Arc::new(Mutex::new(config)),
            dynamic_watch: Arc::new(Mutex::new(false)),
            client,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_version(&self) -> &str {
        &self.version
    }
}
