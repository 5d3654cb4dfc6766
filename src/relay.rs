//! Client side of the "go to other file" notification.
//!
//! When a definition is found in another file the server sends
//! [`GotoOtherFile`] with the file's URI and the declaration position.  An
//! editor integration feeds those notifications to a [`NavigationRelay`],
//! which opens the file (unless it already is) and puts the cursor on the
//! declaration.

use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::{Range, Url};
use tracing::debug;

use crate::error::RelayError;
use crate::types::{GotoOtherFile, GotoOtherFileParams};

/// The editor operations the relay needs.
pub trait Editor {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether `uri` is already open.
    fn is_open(&self, uri: &Url) -> bool;

    /// Open `uri` and make it the active document.
    fn open_document(&mut self, uri: &Url) -> Result<(), Self::Error>;

    /// Set the selection of the open document `uri` and reveal it.
    fn set_selection(&mut self, uri: &Url, selection: Range) -> Result<(), Self::Error>;
}

pub struct NavigationRelay<E> {
    editor: E,
}

impl<E: Editor> NavigationRelay<E> {
    pub fn new(editor: E) -> Self {
        Self { editor }
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Open the target document and place a zero-width selection at the
    /// declaration.
    pub fn handle(&mut self, params: GotoOtherFileParams) -> Result<(), RelayError> {
        let uri = Url::parse(&params.uri).map_err(|_| RelayError::InvalidUri(params.uri.clone()))?;

        if !self.editor.is_open(&uri) {
            self.editor
                .open_document(&uri)
                .map_err(|e| RelayError::Editor(Box::new(e)))?;
        }

        let selection = Range {
            start: params.position,
            end: params.position,
        };
        debug!(%uri, line = selection.start.line, "navigating to declaration");
        self.editor
            .set_selection(&uri, selection)
            .map_err(|e| RelayError::Editor(Box::new(e)))
    }

    /// Dispatch a raw server notification.
    ///
    /// Returns `Ok(false)` for methods the relay does not handle.
    pub fn handle_notification(
        &mut self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<bool, RelayError> {
        if method != GotoOtherFile::METHOD {
            return Ok(false);
        }
        let params: GotoOtherFileParams = serde_json::from_value(params)?;
        self.handle(params)?;
        Ok(true)
    }
}
