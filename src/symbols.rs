//! Document outline (`textDocument/documentSymbol`).
//!
//! Every `JINIE name(` declaration becomes a flat `FUNCTION` symbol.  The
//! list is rebuilt from the stored text on each request.

use tower_lsp::lsp_types::*;

use crate::Backend;
use crate::scanner;
use crate::types::Symbol;

#[allow(deprecated)]
fn to_document_symbol(symbol: Symbol) -> DocumentSymbol {
    DocumentSymbol {
        name: symbol.name,
        detail: None,
        kind: SymbolKind::FUNCTION,
        tags: None,
        deprecated: None,
        range: symbol.range,
        selection_range: symbol.range,
        children: None,
    }
}

impl Backend {
    /// Outline of the open document `uri`, or `None` if it is not open.
    pub fn document_symbols(&self, uri: &str) -> Option<DocumentSymbolResponse> {
        let content = self.get_open_file(uri)?;
        let symbols = scanner::extract_symbols(&content)
            .into_iter()
            .map(to_document_symbol)
            .collect();
        Some(DocumentSymbolResponse::Nested(symbols))
    }
}
