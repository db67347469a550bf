//! Paragraph segmentation.

use crate::model::{Alignment, ParagraphRole, TextFragment};

use super::lines::TextLine;
use super::options::{LayoutOptions, SegmentationMode};

/// A paragraph candidate: consecutive lines plus their classification.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// The lines in this block, top to bottom
    pub lines: Vec<TextLine>,
    /// Semantic role, Body until classified
    pub role: ParagraphRole,
    /// Horizontal alignment, Left until classified
    pub alignment: Alignment,
}

impl TextBlock {
    /// Create a new unclassified block.
    pub fn new(lines: Vec<TextLine>) -> Self {
        Self {
            lines,
            role: ParagraphRole::Body,
            alignment: Alignment::Left,
        }
    }

    /// Representative font size: that of the first line.
    pub fn font_size(&self) -> f32 {
        self.lines.first().map(|l| l.font_size).unwrap_or(0.0)
    }

    /// Fragments in line-major order.
    pub fn fragments(&self) -> impl Iterator<Item = &TextFragment> {
        self.lines.iter().flat_map(|l| l.fragments.iter())
    }

    /// Combined text of all lines, joined with single spaces.
    pub fn text(&self, word_gap: f32) -> String {
        self.lines
            .iter()
            .map(|l| l.text(word_gap))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the block is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Group lines into paragraph candidates.
pub fn segment_lines(lines: Vec<TextLine>, options: &LayoutOptions) -> Vec<TextBlock> {
    if options.segmentation == SegmentationMode::PerLine {
        return lines
            .into_iter()
            .map(|line| TextBlock::new(vec![line]))
            .collect();
    }

    let mut blocks: Vec<TextBlock> = Vec::new();
    let mut current: Vec<TextLine> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            if should_break_block(prev, &line, options) {
                blocks.push(TextBlock::new(std::mem::take(&mut current)));
            }
        }
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(TextBlock::new(current));
    }

    blocks
}

/// Determine if `curr` starts a new paragraph after `prev`.
fn should_break_block(prev: &TextLine, curr: &TextLine, options: &LayoutOptions) -> bool {
    // Large spacing indicates a new paragraph
    let gap = prev.y - curr.y;
    if gap > options.paragraph_gap_ratio * curr.font_size {
        return true;
    }

    if (curr.font_size - prev.font_size).abs() > options.font_size_delta {
        return true;
    }

    // Short lines are headings or standalone elements
    let prev_len = prev.text(options.word_gap).trim().chars().count();
    prev_len < options.short_line_chars
}
