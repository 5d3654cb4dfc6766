/// Utility functions for the JINIE language server.
///
/// This module contains helper methods for reading the shared backend state
/// (open documents, configuration, workspace root) and for mirroring log
/// messages to the editor.
use tower_lsp::lsp_types::*;

use crate::Backend;
use crate::config::Config;

impl Backend {
    /// Current text of the open document `uri`.
    pub fn get_open_file(&self, uri: &str) -> Option<String> {
        self.open_files
            .lock()
            .ok()
            .and_then(|files| files.get(uri).cloned())
    }

    /// Public helper for tests: the URIs of all open documents.
    pub fn open_uris(&self) -> Vec<String> {
        if let Ok(files) = self.open_files.lock() {
            let mut uris: Vec<String> = files.keys().cloned().collect();
            uris.sort();
            uris
        } else {
            Vec::new()
        }
    }

    /// Snapshot of the effective configuration.
    pub fn config(&self) -> Config {
        self.config
            .lock()
            .map(|config| config.clone())
            .unwrap_or_else(|_| self.base_config.clone())
    }

    pub(crate) fn set_config(&self, config: Config) {
        if let Ok(mut current) = self.config.lock() {
            *current = config;
        }
    }

    /// Glob for the definition-file watcher.  Relative to the workspace
    /// root once `initialize` has recorded one, workspace-wide otherwise.
    pub fn watch_pattern(&self) -> GlobPattern {
        let pattern = self.config().watch_glob();
        let root = self
            .workspace_root
            .lock()
            .ok()
            .and_then(|guard| guard.clone());

        match root.and_then(|root| Url::from_file_path(root).ok()) {
            Some(base) => GlobPattern::Relative(RelativePattern {
                base_uri: OneOf::Right(base),
                pattern,
            }),
            None => GlobPattern::String(pattern),
        }
    }

    /// Send a message to the editor's log, when connected to one.
    pub(crate) async fn log(&self, typ: MessageType, message: String) {
        if let Some(client) = &self.client {
            client.log_message(typ, message).await;
        }
    }
}
