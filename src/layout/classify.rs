//! Paragraph role and alignment classification.

use regex::Regex;

use crate::model::{Alignment, ParagraphRole};

use super::options::LayoutOptions;
use super::segment::TextBlock;

/// Assigns roles and alignment to paragraph candidates.
#[derive(Debug, Clone)]
pub struct RoleClassifier {
    heading1_min_size: f32,
    heading2_min_size: f32,
    caption_max_size: f32,
    center_band: (f32, f32),
    word_gap: f32,
    list_marker_regex: Regex,
}

impl RoleClassifier {
    /// Create a classifier from layout options.
    pub fn new(options: &LayoutOptions) -> Self {
        Self {
            heading1_min_size: options.heading1_min_size,
            heading2_min_size: options.heading2_min_size,
            caption_max_size: options.caption_max_size,
            center_band: (options.center_band_start, options.center_band_end),
            word_gap: options.word_gap,
            list_marker_regex: Regex::new(r"^\s*[-*•·▪◦‣∙●○■□–—]\s").unwrap(),
        }
    }

    /// Classify a block in place.
    pub fn classify(&self, block: &mut TextBlock, page_width: f32) {
        block.alignment = self.alignment(block, page_width);
        block.role = self.role(block);
    }

    /// Infer alignment from the first line's mean fragment position.
    pub fn alignment(&self, block: &TextBlock, page_width: f32) -> Alignment {
        match block.lines.first() {
            Some(line) => infer_alignment(
                line.average_x(),
                page_width,
                self.center_band.0,
                self.center_band.1,
            ),
            None => Alignment::Left,
        }
    }

    /// Pick the role; the first matching rule wins.
    ///
    /// Expects `block.alignment` to be set already.
    pub fn role(&self, block: &TextBlock) -> ParagraphRole {
        let font_size = block.font_size();
        let centered = block.alignment == Alignment::Center;
        let bold = block.lines.iter().any(|l| l.has_bold());

        if font_size > self.heading1_min_size && (centered || bold) {
            return ParagraphRole::Heading1;
        }
        if font_size > self.heading2_min_size && (bold || centered) {
            return ParagraphRole::Heading2;
        }
        if font_size < self.caption_max_size {
            return ParagraphRole::Caption;
        }
        if self.is_list_item(&block.text(self.word_gap)) {
            return ParagraphRole::ListItem;
        }
        ParagraphRole::Body
    }

    /// Check for a leading bullet, dash or asterisk followed by whitespace.
    pub fn is_list_item(&self, text: &str) -> bool {
        self.list_marker_regex.is_match(text)
    }
}

/// Map a mean X position onto an alignment.
///
/// Positions inside the open band `(start, end)` of the page width are
/// centered, positions at or beyond `end` are right-aligned. An unusable page
/// width falls back to left.
pub fn infer_alignment(average_x: f32, page_width: f32, start: f32, end: f32) -> Alignment {
    if !page_width.is_finite() || page_width <= 0.0 || !average_x.is_finite() {
        return Alignment::Left;
    }
    if average_x >= end * page_width {
        Alignment::Right
    } else if average_x > start * page_width {
        Alignment::Center
    } else {
        Alignment::Left
    }
}
