//! Layout thresholds and engine configuration.

use crate::error::{Error, Result};
use crate::render::PageSelection;

/// Options for reconstructing document structure.
///
/// Every threshold is a fixed constant by default. None of them is derived
/// from the document being processed.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Maximum anchor distance for two fragments to share a line
    pub line_merge_threshold: f32,

    /// Vertical gap, as a multiple of the current line's font size,
    /// above which a new paragraph starts
    pub paragraph_gap_ratio: f32,

    /// Font size change (points) above which a new paragraph starts
    pub font_size_delta: f32,

    /// Lines with fewer characters than this never absorb the next line
    pub short_line_chars: usize,

    /// Font size above which a bold or centered paragraph is a Heading1
    pub heading1_min_size: f32,

    /// Font size above which a bold or centered paragraph is a Heading2
    pub heading2_min_size: f32,

    /// Font size below which a paragraph is a Caption
    pub caption_max_size: f32,

    /// Left edge of the centered band, as a fraction of page width
    pub center_band_start: f32,

    /// Right edge of the centered band, as a fraction of page width
    pub center_band_end: f32,

    /// Horizontal gap between fragments above which a space is inferred
    pub word_gap: f32,

    /// How lines are grouped into paragraphs
    pub segmentation: SegmentationMode,

    /// Whether to process pages in parallel
    pub parallel: bool,

    /// Which pages to reconstruct
    pub pages: PageSelection,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line clustering threshold.
    pub fn with_line_merge_threshold(mut self, threshold: f32) -> Self {
        self.line_merge_threshold = threshold;
        self
    }

    /// Set the paragraph gap ratio.
    pub fn with_paragraph_gap_ratio(mut self, ratio: f32) -> Self {
        self.paragraph_gap_ratio = ratio;
        self
    }

    /// Set the font size delta that breaks paragraphs.
    pub fn with_font_size_delta(mut self, delta: f32) -> Self {
        self.font_size_delta = delta;
        self
    }

    /// Set the short-line cutoff.
    pub fn with_short_line_chars(mut self, chars: usize) -> Self {
        self.short_line_chars = chars;
        self
    }

    /// Set the heading and caption size cutoffs.
    pub fn with_role_sizes(mut self, heading1: f32, heading2: f32, caption: f32) -> Self {
        self.heading1_min_size = heading1;
        self.heading2_min_size = heading2;
        self.caption_max_size = caption;
        self
    }

    /// Set the centered band as fractions of page width.
    pub fn with_center_band(mut self, start: f32, end: f32) -> Self {
        self.center_band_start = start;
        self.center_band_end = end;
        self
    }

    /// Set the word gap threshold.
    pub fn with_word_gap(mut self, gap: f32) -> Self {
        self.word_gap = gap;
        self
    }

    /// Set segmentation mode.
    pub fn with_segmentation(mut self, mode: SegmentationMode) -> Self {
        self.segmentation = mode;
        self
    }

    /// Treat every line as its own paragraph.
    pub fn per_line(mut self) -> Self {
        self.segmentation = SegmentationMode::PerLine;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Check that every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("line_merge_threshold", self.line_merge_threshold),
            ("paragraph_gap_ratio", self.paragraph_gap_ratio),
            ("font_size_delta", self.font_size_delta),
            ("heading1_min_size", self.heading1_min_size),
            ("heading2_min_size", self.heading2_min_size),
            ("caption_max_size", self.caption_max_size),
            ("center_band_start", self.center_band_start),
            ("center_band_end", self.center_band_end),
            ("word_gap", self.word_gap),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.center_band_start >= self.center_band_end {
            return Err(Error::InvalidConfig(format!(
                "center band start {} must be below its end {}",
                self.center_band_start, self.center_band_end
            )));
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            line_merge_threshold: 1.5,
            paragraph_gap_ratio: 1.5,
            font_size_delta: 3.0,
            short_line_chars: 50,
            heading1_min_size: 18.0,
            heading2_min_size: 14.0,
            caption_max_size: 10.0,
            center_band_start: 0.35,
            center_band_end: 0.65,
            word_gap: 2.5,
            segmentation: SegmentationMode::Merge,
            parallel: true,
            pages: PageSelection::All,
        }
    }
}

/// How lines are grouped into paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentationMode {
    /// Merge consecutive lines using gap, font size and line length heuristics
    #[default]
    Merge,
    /// Every line is its own paragraph
    PerLine,
}
