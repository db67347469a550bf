//! Document-level types.

use super::{Paragraph, ParagraphRole};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// The reconstructed paragraph stream of a whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Number of pages that were reconstructed
    pub page_count: u32,

    /// Paragraphs in reading order, with page breaks between pages
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Iterate over the paragraphs, skipping page breaks.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            Block::PageBreak => None,
        })
    }

    /// Paragraphs belonging to one page (1-indexed).
    pub fn page_paragraphs(&self, page: u32) -> Result<Vec<&Paragraph>> {
        if page == 0 || page > self.page_count {
            return Err(Error::PageOutOfRange(page, self.page_count));
        }
        Ok(self.paragraphs().filter(|p| p.page == page).collect())
    }

    /// Number of paragraphs in the document.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    /// Check if the document has any visible text.
    pub fn has_text(&self) -> bool {
        self.paragraphs().any(|p| !p.is_empty())
    }

    /// Fail with [`Error::NoExtractableText`] when no page produced text.
    ///
    /// Hosts use this to report scanned or image-only input to their callers.
    pub fn ensure_text(&self) -> Result<&Self> {
        if self.has_text() {
            Ok(self)
        } else {
            Err(Error::NoExtractableText)
        }
    }

    /// Get plain text content of the entire document.
    ///
    /// Paragraphs are separated by blank lines; page breaks add nothing extra.
    pub fn plain_text(&self) -> String {
        self.paragraphs()
            .filter(|p| !p.is_empty())
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Compute content statistics.
    pub fn stats(&self) -> DocumentStats {
        let mut stats = DocumentStats {
            page_count: self.page_count,
            ..Default::default()
        };
        for p in self.paragraphs() {
            match p.role {
                ParagraphRole::Heading1 | ParagraphRole::Heading2 => stats.heading_count += 1,
                ParagraphRole::Body => stats.body_count += 1,
                ParagraphRole::Caption => stats.caption_count += 1,
                ParagraphRole::ListItem => stats.list_item_count += 1,
            }
            stats.run_count += p.runs.len() as u32;
            stats.word_count += p.plain_text().split_whitespace().count() as u32;
        }
        stats.paragraph_count = stats.heading_count
            + stats.body_count
            + stats.caption_count
            + stats.list_item_count;
        stats
    }
}

/// An element of the output stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),

    /// Boundary between two consecutive pages
    PageBreak,
}

impl Block {
    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is a page break.
    pub fn is_page_break(&self) -> bool {
        matches!(self, Block::PageBreak)
    }
}

/// Content statistics of a reconstructed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Pages reconstructed
    pub page_count: u32,
    /// All paragraphs, any role
    pub paragraph_count: u32,
    /// Heading1 and Heading2 paragraphs
    pub heading_count: u32,
    /// Body paragraphs
    pub body_count: u32,
    /// Caption paragraphs
    pub caption_count: u32,
    /// List items
    pub list_item_count: u32,
    /// Styled runs
    pub run_count: u32,
    /// Whitespace-separated words
    pub word_count: u32,
}
