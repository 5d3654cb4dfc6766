//! Data types used throughout the JINIE language server.
//!
//! This module contains the "model" structs extracted from JINIE text
//! (symbols, call sites, definition sites), the outcome of a definition
//! lookup, and the custom server→client notification that asks the editor
//! to jump into another file.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::{Location, Position, Range};

/// Keyword that introduces a function declaration (`JINIE name(`).
pub const DECLARATION_KEYWORD: &str = "JINIE";

/// Keyword that introduces a function invocation (`CALL name(`).
pub const INVOCATION_KEYWORD: &str = "CALL";

/// A declared function found in a document.
///
/// Symbols are never stored; they are derived from the document text each
/// time the outline is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The declared name (e.g. "add", "math.add").
    pub name: String,
    /// Span of the name on its line.  Used both as the display range and
    /// the selection range.
    pub range: Range,
}

/// The invocation under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// The invoked function name.
    pub name: String,
    /// Span of the name on the requested line.
    pub range: Range,
}

/// A declaration located in a definition file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionSite {
    /// The function name that was searched for.
    pub name: String,
    /// `file://` URI of the definition file, encoded for the editor.
    pub uri: String,
    /// Start of the declaration text inside that file.
    pub position: Position,
}

/// Outcome of a successful definition lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The declaration lives in the requesting document.
    Local(Location),
    /// The declaration lives in a definition file.
    ///
    /// `location` is what gets returned to the request; its URI is always the
    /// requesting document.  `target` is the payload of the
    /// [`GotoOtherFile`] notification and names the file that actually
    /// contains the declaration.
    CrossFile {
        location: Location,
        target: GotoOtherFileParams,
    },
}

impl Resolution {
    /// The location returned synchronously to the definition request.
    pub fn location(&self) -> &Location {
        match self {
            Resolution::Local(location) => location,
            Resolution::CrossFile { location, .. } => location,
        }
    }

    /// The notification payload, when the editor must be told to open
    /// another file.
    pub fn notification(&self) -> Option<&GotoOtherFileParams> {
        match self {
            Resolution::Local(_) => None,
            Resolution::CrossFile { target, .. } => Some(target),
        }
    }
}

/// Payload of the "go to other file" notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GotoOtherFileParams {
    pub uri: String,
    pub position: Position,
}

impl From<DefinitionSite> for GotoOtherFileParams {
    fn from(site: DefinitionSite) -> Self {
        Self {
            uri: site.uri,
            position: site.position,
        }
    }
}

/// Server→client notification asking the editor to open a file and move the
/// cursor.  It reuses the `textDocument/definition` method name.
pub enum GotoOtherFile {}

impl Notification for GotoOtherFile {
    type Params = GotoOtherFileParams;
    const METHOD: &'static str = "textDocument/definition";
}
