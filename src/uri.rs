//! Conversions between document URIs and filesystem paths.
//!
//! Editors on Windows send URIs such as `file:///c%3A/work/main.jinie`,
//! with the drive-letter colon percent-encoded.  These helpers accept that
//! form and produce it again when a definition file is reported back.

use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Characters escaped in the path component of a generated URI.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}')
    .add(b':');

/// Split a leading `X:` drive letter off `path`.
fn split_drive(path: &str) -> Option<(char, &str)> {
    let mut chars = path.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic)?;
    if chars.next() != Some(':') {
        return None;
    }
    Some((letter, &path[2..]))
}

/// Convert a `file://` URI into a filesystem path.
///
/// Returns `None` for other schemes or when the decoded path is not UTF-8.
pub fn uri_to_path(uri: &str) -> Option<PathBuf> {
    let encoded = uri.strip_prefix("file://")?;
    let decoded = percent_decode_str(encoded).decode_utf8().ok()?;

    // `/c:/work` names a drive path; drop the slash in front of the letter.
    if let Some(rest) = decoded.strip_prefix('/')
        && split_drive(rest).is_some()
    {
        return Some(PathBuf::from(rest));
    }

    if decoded.is_empty() {
        return None;
    }

    Some(PathBuf::from(decoded.as_ref()))
}

/// The directory containing the document named by `uri`.
pub fn containing_dir(uri: &str) -> Option<PathBuf> {
    uri_to_path(uri)?.parent().map(Path::to_path_buf)
}

/// Encode `path` as a `file://` URI.
///
/// Drive paths have their backslashes turned into `/`, the drive letter
/// lower-cased and its colon written as `%3A`.
pub fn path_to_uri(path: &Path) -> String {
    let raw = path.to_string_lossy();

    if let Some((letter, rest)) = split_drive(&raw) {
        let rest = rest.replace('\\', "/");
        let encoded = utf8_percent_encode(&rest, PATH_SEGMENT);
        return format!("file:///{}%3A{}", letter.to_ascii_lowercase(), encoded);
    }

    let encoded = utf8_percent_encode(&raw, PATH_SEGMENT);
    if raw.starts_with('/') {
        format!("file://{encoded}")
    } else {
        format!("file:///{encoded}")
    }
}
