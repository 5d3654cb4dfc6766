use std::fs;
use zed_extension_api::{self as zed, LanguageServerId, Result, settings::LspSettings};

const SERVER_NAME: &str = "jinie_lsp";

struct JinieExtension {
    cached_binary_path: Option<String>,
}

impl JinieExtension {
    fn language_server_binary_path(
        &mut self,
        language_server_id: &LanguageServerId,
        worktree: &zed::Worktree,
    ) -> Result<String> {
        // An explicit path in the user's settings wins.
        if let Some(path) = LspSettings::for_worktree(SERVER_NAME, worktree)
            .ok()
            .and_then(|settings| settings.binary)
            .and_then(|binary| binary.path)
        {
            return Ok(path);
        }

        // Check cached path
        if let Some(path) = &self.cached_binary_path {
            if fs::metadata(path).is_ok_and(|stat| stat.is_file()) {
                return Ok(path.clone());
            }
        }

        let binary_name = match zed::current_platform().0 {
            zed::Os::Windows => "jinie_lsp.exe",
            _ => SERVER_NAME,
        };

        let path = worktree.which(binary_name).ok_or_else(|| {
            zed::set_language_server_installation_status(
                language_server_id,
                &zed::LanguageServerInstallationStatus::Failed(format!(
                    "{binary_name} not found on PATH"
                )),
            );
            format!("{binary_name} not found on PATH; install it with `cargo install jinie_lsp`")
        })?;

        self.cached_binary_path = Some(path.clone());
        Ok(path)
    }
}

impl zed::Extension for JinieExtension {
    fn new() -> Self {
        Self {
            cached_binary_path: None,
        }
    }

    fn language_server_command(
        &mut self,
        language_server_id: &LanguageServerId,
        worktree: &zed::Worktree,
    ) -> Result<zed::Command> {
        let binary_path = self.language_server_binary_path(language_server_id, worktree)?;

        let args = LspSettings::for_worktree(SERVER_NAME, worktree)
            .ok()
            .and_then(|settings| settings.binary)
            .and_then(|binary| binary.arguments)
            .unwrap_or_else(|| vec!["--stdio".to_string()]);

        Ok(zed::Command {
            command: binary_path,
            args,
            env: Default::default(),
        })
    }

    /// Forward `lsp.jinie_lsp.initialization_options` from the user's
    /// settings (e.g. `definitionExtension`, `sharedFolder`).
    fn language_server_initialization_options(
        &mut self,
        _language_server_id: &LanguageServerId,
        worktree: &zed::Worktree,
    ) -> Result<Option<zed::serde_json::Value>> {
        Ok(LspSettings::for_worktree(SERVER_NAME, worktree)
            .ok()
            .and_then(|settings| settings.initialization_options))
    }
}

zed::register_extension!(JinieExtension);
