//! Plain text rendering for reconstructed documents.

use crate::error::Result;
use crate::model::{Block, Document};

use super::RenderOptions;

/// Convert a document to plain text.
///
/// Paragraphs are separated by blank lines. With page breaks enabled, a form
/// feed marks each page boundary.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();
    let mut pending_break = false;

    for block in &doc.blocks {
        match block {
            Block::PageBreak => pending_break = true,
            Block::Paragraph(p) => {
                if !options.page_selection.includes(p.page) || p.is_empty() {
                    continue;
                }
                if !output.is_empty() {
                    if pending_break && options.page_breaks {
                        output.push_str("\n\u{000C}\n");
                    } else {
                        output.push_str("\n\n");
                    }
                }
                pending_break = false;
                output.push_str(p.plain_text().trim());
            }
        }
    }

    Ok(output)
}
