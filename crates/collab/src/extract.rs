//! Chat context from extracted document text
//!
//! The text-extraction collaborator hands back raw per-page text; these
//! helpers shape it into the prompt context the chat collaborator expects
//! and keep it inside a length budget.

use serde::{Deserialize, Serialize};

/// Result of the text-extraction collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentText {
    pub text: String,
    pub pages: u32,
    pub document_name: String,
}

/// Default budget for prompt context, in characters.
pub const DEFAULT_CONTEXT_BUDGET: usize = 8_000;

const TRUNCATION_MARKER: &str = "\n\n[Content truncated for length...]";

/// One page's contribution to the context: whitespace collapsed, prefixed
/// with the page number.
pub fn page_context(page: u32, text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("Page {page}: {collapsed}\n\n")
}

/// Full prompt preamble around the extracted text.
pub fn prepare_context(document: &DocumentText) -> String {
    format!(
        "Document: {}\nTotal Pages: {}\nExtracted Text (first 10 pages):\n{}\n\n\
         Please analyze this construction document and answer questions about its \
         content, specifications, measurements, materials, and technical details.",
        document.document_name, document.pages, document.text
    )
}

/// Cut `context` down to at most `max_len` characters plus a marker.
///
/// Prefers a sentence or line boundary when one falls in the last fifth of
/// the budget; always cuts on a char boundary.
pub fn truncate_context(context: &str, max_len: usize) -> String {
    if context.chars().count() <= max_len {
        return context.to_string();
    }

    let mut cut = context
        .char_indices()
        .nth(max_len)
        .map(|(index, _)| index)
        .unwrap_or(context.len());
    let truncated = &context[..cut];

    let boundary = truncated.rfind('.').max(truncated.rfind('\n'));
    if let Some(boundary) = boundary {
        // A boundary close to the budget keeps the text readable.
        if truncated[..boundary].chars().count() > max_len * 4 / 5 {
            cut = boundary + 1;
        }
    }
    format!("{}{TRUNCATION_MARKER}", &context[..cut])
}
