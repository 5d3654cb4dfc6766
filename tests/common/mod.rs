#![allow(dead_code)]

pub mod wire;

use jinie_lsp::{Backend, Config};
use std::fs;
use std::path::Path;
use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;

pub fn create_test_backend() -> Backend {
    Backend::new_test()
}

pub fn create_test_backend_with_config(config: Config) -> Backend {
    Backend::new_test_with_config(config)
}

/// Helper: create a temp directory holding the given files (paths relative
/// to the directory, parents created as needed).
pub fn create_workspace(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for (rel_path, content) in files {
        let full = dir.path().join(rel_path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("failed to create dirs");
        }
        fs::write(&full, content).expect("failed to write file");
    }
    dir
}

/// `file://` URI of `rel_path` inside `root`.
pub fn file_uri(root: &Path, rel_path: &str) -> Url {
    Url::from_file_path(root.join(rel_path)).expect("absolute path")
}

pub async fn open_document(backend: &Backend, uri: &Url, text: &str) {
    backend
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: uri.clone(),
                language_id: "jinie".to_string(),
                version: 1,
                text: text.to_string(),
            },
        })
        .await;
}

pub fn definition_params(uri: &Url, line: u32, character: u32) -> GotoDefinitionParams {
    GotoDefinitionParams {
        text_document_position_params: TextDocumentPositionParams {
            text_document: TextDocumentIdentifier { uri: uri.clone() },
            position: Position { line, character },
        },
        work_done_progress_params: WorkDoneProgressParams::default(),
        partial_result_params: PartialResultParams::default(),
    }
}
