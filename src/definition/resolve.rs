/// Goto-definition resolution.
///
/// Given a cursor position in a JINIE document this module:
///   1. Takes the `CALL name(` invocation on the cursor's line.
///   2. Looks for `JINIE name(` in the document itself.
///   3. Falls back to the definition files next to the document.
///   4. Falls back to the definition files in the shared child folder.
///
/// A hit in the document returns a location spanning the declaration line.
/// A hit in a definition file returns a zero-width location tagged with the
/// *requesting* document's URI, plus a [`GotoOtherFileParams`] payload
/// naming the real file; the server sends that payload to the client so the
/// editor can open it.
use std::path::{Path, PathBuf};

use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::Backend;
use crate::config::Config;
use crate::error::DefinitionError;
use crate::scanner;
use crate::types::{GotoOtherFileParams, Resolution};
use crate::uri::containing_dir;

use super::files::search_folder;

/// The on-disk places a declaration is looked for once the document
/// itself has no match, in search order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTier {
    SiblingFiles,
    SharedFolder,
}

impl SearchTier {
    pub const ORDER: [SearchTier; 2] = [SearchTier::SiblingFiles, SearchTier::SharedFolder];

    /// Folder searched by this tier, relative to the document's directory.
    pub fn folder(self, dir: &Path, config: &Config) -> PathBuf {
        match self {
            SearchTier::SiblingFiles => dir.to_path_buf(),
            SearchTier::SharedFolder => dir.join(&config.shared_folder),
        }
    }
}

/// Run the full lookup for the call on `position`'s line.
pub fn find_definition(
    config: &Config,
    uri: &Url,
    content: &str,
    position: Position,
) -> Result<Option<Resolution>, DefinitionError> {
    let Some(call) = scanner::call_site_at(content, position) else {
        debug!(line = position.line, "no invocation on requested line");
        return Ok(None);
    };
    let name = call.name.as_str();

    // ── Current document ──
    if let Some((line_idx, line)) = scanner::find_declaration_line(content, name) {
        debug!(name, line = line_idx, "resolved in document");
        return Ok(Some(Resolution::Local(Location {
            uri: uri.clone(),
            range: scanner::full_line_range(line_idx, line),
        })));
    }

    // ── Definition files on disk ──
    let dir = containing_dir(uri.as_str())
        .ok_or_else(|| DefinitionError::UnsupportedUri(uri.to_string()))?;

    for tier in SearchTier::ORDER {
        let folder = tier.folder(&dir, config);
        if let Some(site) = search_folder(&folder, name, &config.definition_extension)? {
            debug!(name, ?tier, file = %site.uri, "resolved in definition file");
            let location = Location {
                uri: uri.clone(),
                range: Range {
                    start: site.position,
                    end: site.position,
                },
            };
            return Ok(Some(Resolution::CrossFile {
                location,
                target: GotoOtherFileParams::from(site),
            }));
        }
    }

    debug!(name, "no declaration found");
    Ok(None)
}

impl Backend {
    /// Handle a "go to definition" request against `content`, the current
    /// text of `uri`.
    ///
    /// Returns `Ok(None)` when the line has no invocation or no declaration
    /// exists anywhere searched.  Filesystem failures abort the lookup.
    pub fn resolve_definition(
        &self,
        uri: &Url,
        content: &str,
        position: Position,
    ) -> Result<Option<Resolution>, DefinitionError> {
        let config = self.config();
        find_definition(&config, uri, content, position)
    }
}
