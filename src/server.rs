/// LSP server trait implementation.
///
/// This module contains the `impl LanguageServer for Backend` block,
/// which handles all LSP protocol messages (initialize, didOpen, didChange,
/// didClose, documentSymbol, definition, etc.).
use tower_lsp::LanguageServer;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tracing::{debug, error, info, warn};

use crate::Backend;
use crate::config::{PartialConfig, workspace_config_path};
use crate::types::{GotoOtherFile, Resolution};

/// Registration id of the definition-file watcher.
const WATCHER_REGISTRATION_ID: &str = "jinie-definition-files";

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        // Extract and store the workspace root path
        let workspace_root = params
            .root_uri
            .as_ref()
            .and_then(|uri| uri.to_file_path().ok());

        let mut config = self.base_config.clone();
        let mut warnings = Vec::new();

        if let Some(root) = workspace_root {
            match PartialConfig::load(&workspace_config_path(&root)) {
                Ok(layer) => config.apply(layer),
                Err(e) => warnings.push(e.to_string()),
            }
            if let Ok(mut wr) = self.workspace_root.lock() {
                *wr = Some(root);
            }
        }

        if let Some(options) = params.initialization_options
            && !options.is_null()
        {
            match PartialConfig::from_json(options) {
                Ok(layer) => config.apply(layer),
                Err(e) => warnings.push(e.to_string()),
            }
        }

        for warning in warnings {
            warn!("{warning}; keeping previous settings");
            self.log(MessageType::WARNING, warning).await;
        }

        info!(
            extension = %config.definition_extension,
            shared_folder = %config.shared_folder,
            "configuration loaded"
        );
        self.set_config(config);

        let dynamic_watch = params
            .capabilities
            .workspace
            .as_ref()
            .and_then(|ws| ws.did_change_watched_files.as_ref())
            .and_then(|caps| caps.dynamic_registration)
            .unwrap_or(false);
        if let Ok(mut flag) = self.dynamic_watch.lock() {
            *flag = dynamic_watch;
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                document_symbol_provider: Some(OneOf::Left(true)),
                definition_provider: Some(OneOf::Left(true)),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: self.name.clone(),
                version: Some(self.version.clone()),
            }),
            offset_encoding: None,
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let dynamic_watch = self.dynamic_watch.lock().map(|flag| *flag).unwrap_or(false);

        if dynamic_watch && let Some(client) = &self.client {
            let glob_pattern = self.watch_pattern();
            let options = DidChangeWatchedFilesRegistrationOptions {
                watchers: vec![FileSystemWatcher {
                    glob_pattern: glob_pattern.clone(),
                    kind: None,
                }],
            };
            let registration = Registration {
                id: WATCHER_REGISTRATION_ID.to_string(),
                method: "workspace/didChangeWatchedFiles".to_string(),
                register_options: serde_json::to_value(options).ok(),
            };
            match client.register_capability(vec![registration]).await {
                Ok(()) => debug!(?glob_pattern, "registered definition file watcher"),
                Err(e) => warn!(error = %e, "client refused file watcher registration"),
            }
        }

        info!("JinieLSP initialized");
        self.log(MessageType::INFO, "JinieLSP initialized!".to_string())
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        let uri = doc.uri.to_string();

        if let Ok(mut files) = self.open_files.lock() {
            files.insert(uri.clone(), doc.text);
        }

        debug!(%uri, "opened");
        self.log(MessageType::INFO, format!("Opened file: {}", uri))
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.to_string();

        // Full sync: the first change carries the whole document.
        if let Some(change) = params.content_changes.into_iter().next()
            && let Ok(mut files) = self.open_files.lock()
        {
            files.insert(uri, change.text);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri.to_string();

        if let Ok(mut files) = self.open_files.lock() {
            files.remove(&uri);
        }

        debug!(%uri, "closed");
        self.log(MessageType::INFO, format!("Closed file: {}", uri))
            .await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        for change in params.changes {
            info!(uri = %change.uri, kind = ?change.typ, "definition file changed");
            self.log(
                MessageType::INFO,
                format!("Definition file changed: {}", change.uri),
            )
            .await;
        }
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        Ok(self.document_symbols(params.text_document.uri.as_str()))
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some(content) = self.get_open_file(uri.as_str()) else {
            return Ok(None);
        };

        match self.resolve_definition(&uri, &content, position) {
            Ok(Some(Resolution::Local(location))) => {
                Ok(Some(GotoDefinitionResponse::Scalar(location)))
            }
            Ok(Some(Resolution::CrossFile { location, target })) => {
                if let Some(client) = &self.client {
                    client.send_notification::<GotoOtherFile>(target).await;
                }
                Ok(Some(GotoDefinitionResponse::Scalar(location)))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                error!(%uri, error = %e, "definition lookup failed");
                self.log(MessageType::ERROR, format!("Definition lookup failed: {e}"))
                    .await;
                let mut err = Error::internal_error();
                err.message = e.to_string().into();
                Err(err)
            }
        }
    }
}
