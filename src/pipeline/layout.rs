//! Build the renderer-independent layout of the output document.
//!
//! The final document has a fixed two-page shape: page 1 carries the
//! redacted text (a heading, then one paragraph per source line), page 2
//! carries the generated summary (a heading, then one block per summary
//! line — lines prefixed with `*` become bullet items, the rest plain
//! paragraphs, so a model preamble like "Here is the summary:" renders as
//! prose rather than a bullet).
//!
//! Keeping layout construction separate from rendering makes the page
//! structure a deterministic, unit-testable transform; the
//! [`crate::adapters::DocumentRenderer`] only turns blocks into bytes.

use serde::{Deserialize, Serialize};

/// Paginated block layout handed to the document renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLayout {
    pub pages: Vec<Page>,
}

/// One output page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub blocks: Vec<Block>,
}

/// A layout block the renderer knows how to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    /// Page-level heading.
    Heading(String),
    /// Plain paragraph.
    Paragraph(String),
    /// Bullet list item (the leading `*` already stripped).
    Bullet(String),
}

/// Heading of the redacted-text page.
pub const REDACTED_HEADING: &str = "Redacted Document:";

/// Heading of the summary page.
pub const SUMMARY_HEADING: &str = "AI-Generated Summary:";

/// Assemble the two-page layout from the redacted text and its summary.
pub fn build_layout(redacted_text: &str, summary: &str) -> DocumentLayout {
    let mut page1 = vec![Block::Heading(REDACTED_HEADING.to_string())];
    for line in redacted_text.split('\n') {
        page1.push(Block::Paragraph(line.to_string()));
    }

    let mut page2 = vec![Block::Heading(SUMMARY_HEADING.to_string())];
    for line in summary.trim().split('\n') {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix('*') {
            page2.push(Block::Bullet(rest.trim().to_string()));
        } else {
            page2.push(Block::Paragraph(line.to_string()));
        }
    }

    DocumentLayout {
        pages: vec![Page { blocks: page1 }, Page { blocks: page2 }],
    }
}
