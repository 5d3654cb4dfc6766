mod common;

use common::{create_test_backend, create_test_backend_with_config, create_workspace, open_document};
use jinie_lsp::{Backend, Config};
use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;

#[allow(deprecated)]
fn initialize_params(root: Option<Url>, options: Option<serde_json::Value>) -> InitializeParams {
    InitializeParams {
        root_uri: root,
        initialization_options: options,
        ..InitializeParams::default()
    }
}

#[test]
fn test_backend_name_version() {
    let backend = Backend::new_test();
    assert_eq!(backend.get_name(), "JinieLSP");
    assert_eq!(backend.get_version(), env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_initialize_advertises_capabilities() {
    let backend = create_test_backend();
    let result = backend
        .initialize(initialize_params(None, None))
        .await
        .unwrap();

    let caps = result.capabilities;
    assert_eq!(
        caps.text_document_sync,
        Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL))
    );
    assert_eq!(caps.definition_provider, Some(OneOf::Left(true)));
    assert_eq!(caps.document_symbol_provider, Some(OneOf::Left(true)));
    assert!(caps.completion_provider.is_none());
    assert!(result.offset_encoding.is_none());
    assert_eq!(result.server_info.unwrap().name, "JinieLSP");
}

#[tokio::test]
async fn test_workspace_config_file_is_applied() {
    let dir = create_workspace(&[(".jinie.toml", "definition_extension = \"defs\"\n")]);
    let backend = create_test_backend();
    let root = Url::from_file_path(dir.path()).unwrap();

    backend
        .initialize(initialize_params(Some(root), None))
        .await
        .unwrap();

    let config = backend.config();
    assert_eq!(config.definition_extension, "defs");
    assert_eq!(config.shared_folder, "CONFIG");
}

#[tokio::test]
async fn test_watch_pattern_is_relative_to_workspace_root() {
    let dir = create_workspace(&[(".jinie.toml", "definition_extension = \"defs\"\n")]);
    let backend = create_test_backend();
    let root = Url::from_file_path(dir.path()).unwrap();

    backend
        .initialize(initialize_params(Some(root.clone()), None))
        .await
        .unwrap();

    match backend.watch_pattern() {
        GlobPattern::Relative(relative) => {
            assert_eq!(relative.base_uri, OneOf::Right(root));
            assert_eq!(relative.pattern, "**/*.defs");
        }
        other => panic!("Expected a relative pattern, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_watch_pattern_without_workspace_root() {
    let backend = create_test_backend();
    backend
        .initialize(initialize_params(None, None))
        .await
        .unwrap();

    assert_eq!(
        backend.watch_pattern(),
        GlobPattern::String("**/*.DEFINITION".to_string())
    );
}

#[tokio::test]
async fn test_initialization_options_override_workspace_file() {
    let dir = create_workspace(&[(
        ".jinie.toml",
        "definition_extension = \"defs\"\nshared_folder = \"SHARED\"\n",
    )]);
    let backend = create_test_backend();
    let root = Url::from_file_path(dir.path()).unwrap();
    let options = serde_json::json!({ "sharedFolder": "GLOBAL" });

    backend
        .initialize(initialize_params(Some(root), Some(options)))
        .await
        .unwrap();

    let config = backend.config();
    assert_eq!(config.definition_extension, "defs");
    assert_eq!(config.shared_folder, "GLOBAL");
}

#[tokio::test]
async fn test_startup_config_is_the_base_layer() {
    let backend = create_test_backend_with_config(Config {
        definition_extension: "lib".to_string(),
        shared_folder: "CONFIG".to_string(),
    });
    let options = serde_json::json!({ "sharedFolder": "COMMON" });

    backend
        .initialize(initialize_params(None, Some(options)))
        .await
        .unwrap();

    let config = backend.config();
    assert_eq!(config.definition_extension, "lib");
    assert_eq!(config.shared_folder, "COMMON");
}

#[tokio::test]
async fn test_broken_workspace_config_keeps_defaults() {
    let dir = create_workspace(&[(".jinie.toml", "definition_extension = [\n")]);
    let backend = create_test_backend();
    let root = Url::from_file_path(dir.path()).unwrap();

    let result = backend.initialize(initialize_params(Some(root), None)).await;
    assert!(result.is_ok());
    assert_eq!(backend.config(), Config::default());
}

#[tokio::test]
async fn test_document_table_follows_open_and_close() {
    let backend = create_test_backend();
    let a = Url::parse("file:///work/a.jinie").unwrap();
    let b = Url::parse("file:///work/b.jinie").unwrap();
    open_document(&backend, &a, "JINIE a()\n").await;
    open_document(&backend, &b, "JINIE b()\n").await;
    assert_eq!(backend.open_uris(), vec![a.to_string(), b.to_string()]);

    backend
        .did_close(DidCloseTextDocumentParams {
            text_document: TextDocumentIdentifier { uri: a.clone() },
        })
        .await;
    assert_eq!(backend.open_uris(), vec![b.to_string()]);
    assert!(backend.get_open_file(a.as_str()).is_none());
}

#[tokio::test]
async fn test_watched_file_changes_are_accepted() {
    let backend = create_test_backend();
    backend
        .did_change_watched_files(DidChangeWatchedFilesParams {
            changes: vec![FileEvent {
                uri: Url::parse("file:///work/lib.DEFINITION").unwrap(),
                typ: FileChangeType::CHANGED,
            }],
        })
        .await;
    assert!(backend.open_uris().is_empty());
}

#[tokio::test]
async fn test_shutdown() {
    let backend = create_test_backend();
    assert!(backend.shutdown().await.is_ok());
}
