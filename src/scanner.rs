//! Line-oriented pattern scans over JINIE text.
//!
//! Nothing here builds a syntax tree.  Declarations (`JINIE name(`) and
//! invocations (`CALL name(`) are recognised by pattern on each line, and a
//! name captured from an invocation is afterwards matched as a literal
//! string, never re-interpreted as a pattern.
//!
//! All columns are UTF-16 code units, the LSP default position encoding.

use std::sync::LazyLock;

use regex::Regex;
use tower_lsp::lsp_types::{Position, Range};

use crate::types::{CallSite, DECLARATION_KEYWORD, INVOCATION_KEYWORD, Symbol};

/// Characters allowed in a function name: ASCII word characters and dots.
const NAME_PATTERN: &str = r"[A-Za-z0-9_.]+";

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{DECLARATION_KEYWORD} ({NAME_PATTERN})\("))
        .expect("declaration pattern is valid")
});

static INVOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{INVOCATION_KEYWORD} ({NAME_PATTERN})\("))
        .expect("invocation pattern is valid")
});

/// Number of UTF-16 code units in `s`.
pub(crate) fn utf16_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}

/// The literal text that declares `name` (e.g. `JINIE add(`).
pub fn declaration_text(name: &str) -> String {
    format!("{DECLARATION_KEYWORD} {name}(")
}

/// Range covering `name` on `line_idx`, starting at the first occurrence of
/// the name text anywhere in the line.
///
/// The first occurrence is used even when the match that produced `name`
/// sits further right, so `CALLfoo JINIE foo(` reports the span of the
/// leading `foo`.  Outline consumers rely on this exact behaviour.
fn first_index_range(line: &str, line_idx: u32, name: &str) -> Range {
    let byte_col = line.find(name).unwrap_or(0);
    let start = utf16_len(&line[..byte_col]);
    Range {
        start: Position {
            line: line_idx,
            character: start,
        },
        end: Position {
            line: line_idx,
            character: start + utf16_len(name),
        },
    }
}

/// All declared names on a single line, left to right.
pub fn declarations_in_line(line: &str) -> Vec<&str> {
    DECLARATION
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Extract one [`Symbol`] per declaration occurrence, in line order then
/// left-to-right order.  Duplicates are kept.
pub fn extract_symbols(text: &str) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    for (line_idx, line) in text.lines().enumerate() {
        for name in declarations_in_line(line) {
            symbols.push(Symbol {
                name: name.to_string(),
                range: first_index_range(line, line_idx as u32, name),
            });
        }
    }
    symbols
}

/// The invocation on the line under `position`.
///
/// Only the line matters; the first `CALL name(` on it wins regardless of
/// the cursor column.
pub fn call_site_at(text: &str, position: Position) -> Option<CallSite> {
    let line = text.lines().nth(position.line as usize)?;
    let name = INVOCATION.captures(line)?.get(1)?.as_str();
    Some(CallSite {
        name: name.to_string(),
        range: first_index_range(line, position.line, name),
    })
}

/// First line of `text` declaring `name`, with its index.
pub fn find_declaration_line<'a>(text: &'a str, name: &str) -> Option<(u32, &'a str)> {
    let needle = declaration_text(name);
    text.lines()
        .enumerate()
        .find(|(_, line)| line.contains(&needle))
        .map(|(idx, line)| (idx as u32, line))
}

/// Position of the first occurrence of the declaration text for `name`.
///
/// The line is found by counting newlines before the match, so this works on
/// the raw file contents without splitting them first.
pub fn locate_declaration(text: &str, name: &str) -> Option<Position> {
    let offset = text.find(&declaration_text(name))?;
    let before = &text[..offset];
    let line = before.matches('\n').count() as u32;
    let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
    Some(Position {
        line,
        character: utf16_len(&text[line_start..offset]),
    })
}

/// Range spanning the whole of `line`.
pub fn full_line_range(line_idx: u32, line: &str) -> Range {
    Range {
        start: Position {
            line: line_idx,
            character: 0,
        },
        end: Position {
            line: line_idx,
            character: utf16_len(line),
        },
    }
}
