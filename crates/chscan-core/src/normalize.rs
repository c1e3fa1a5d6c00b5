//! Markup stripping and text normalization.
//!
//! Filings arrive as HTML/XHTML renderings of statutory accounts. All
//! field extraction runs over a flattened form of the document: tags
//! discarded, text nodes joined by single spaces, whitespace collapsed,
//! and (for the manifest-driven extractors) case-folded. Parsing is
//! lenient: malformed markup is recovered best-effort rather than
//! failing the document.

use scraper::Html;

use crate::error::NormalizeError;

/// Strip markup from a raw document, preserving the original casing.
///
/// Text node content is joined with single spaces and runs of
/// whitespace are collapsed, so the result does not depend on the
/// source formatting. A run containing a line break collapses to a
/// single break rather than a space: line breaks inside text nodes
/// are sentence boundaries for the sentence extractor. Used by the
/// directory scan, where matched sentences are reported in their
/// original casing.
pub fn strip_markup(raw: &str) -> Result<String, NormalizeError> {
    if raw.contains('\u{0}') {
        return Err(NormalizeError::Parse("content contains NUL bytes".into()));
    }

    let document = Html::parse_document(raw);
    let joined = document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");

    Ok(collapse_whitespace(&joined))
}

/// Strip markup and case-fold, producing text ready for pattern search.
///
/// Folding happens here, once per document; the extraction strategies
/// never re-fold. Idempotent: normalizing already-plain text again
/// yields the same string.
pub fn normalize(raw: &str) -> Result<String, NormalizeError> {
    Ok(strip_markup(raw)?.to_lowercase())
}

/// Decode raw bytes as UTF-8 and normalize.
///
/// Invalid encoding surfaces as [`NormalizeError::Decode`] with the
/// offset of the first bad byte, rather than producing garbage text.
pub fn normalize_bytes(raw: &[u8]) -> Result<String, NormalizeError> {
    let text = std::str::from_utf8(raw).map_err(|e| NormalizeError::Decode(e.valid_up_to()))?;
    normalize(text)
}

// Each whitespace run collapses to one character: a line break if the
// run contains one, a space otherwise. Leading and trailing runs are
// dropped.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending: Option<char> = None;
    for c in text.chars() {
        if c.is_whitespace() {
            if !out.is_empty() {
                let brk = c == '\n' || c == '\r' || pending == Some('\n');
                pending = Some(if brk { '\n' } else { ' ' });
            }
        } else {
            if let Some(sep) = pending.take() {
                out.push(sep);
            }
            out.push(c);
        }
    }
    out
}
