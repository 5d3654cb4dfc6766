/// Definition-file discovery.
///
/// A definition file is a regular file whose name ends in
/// `.<definition extension>`.  Folders are listed fresh on every lookup and
/// files are visited in whatever order the OS returns them; nothing is
/// sorted or cached, so with duplicate declarations the winner depends on
/// the filesystem.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::DefinitionError;
use crate::scanner;
use crate::types::DefinitionSite;
use crate::uri::path_to_uri;

/// List the definition files directly inside `dir`.
///
/// Fails if the directory or one of its entries cannot be read.
pub fn definition_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, DefinitionError> {
    let entries = fs::read_dir(dir).map_err(|source| DefinitionError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let suffix = format!(".{extension}");
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DefinitionError::ReadEntry {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && entry.file_name().to_string_lossy().ends_with(&suffix) {
            files.push(path);
        }
    }
    Ok(files)
}

/// Search the definition files in `dir` for a declaration of `name`.
///
/// The first file containing the literal declaration text wins.
pub fn search_folder(
    dir: &Path,
    name: &str,
    extension: &str,
) -> Result<Option<DefinitionSite>, DefinitionError> {
    for path in definition_files(dir, extension)? {
        let content = fs::read_to_string(&path).map_err(|source| DefinitionError::ReadFile {
            path: path.clone(),
            source,
        })?;

        if let Some(position) = scanner::locate_declaration(&content, name) {
            debug!(
                name,
                file = %path.display(),
                line = position.line,
                "found declaration in definition file"
            );
            return Ok(Some(DefinitionSite {
                name: name.to_string(),
                uri: path_to_uri(&path),
                position,
            }));
        }
    }
    Ok(None)
}
