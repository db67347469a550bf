//! Paragraph and run-level output types.

use serde::{Deserialize, Serialize};

/// A reconstructed paragraph, ready to map onto a native paragraph or
/// heading construct of the target format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Semantic role
    pub role: ParagraphRole,

    /// Horizontal alignment
    pub alignment: Alignment,

    /// Styled runs in reading order
    pub runs: Vec<StyledRun>,

    /// Representative font size (the first line's)
    pub font_size: f32,

    /// Page the paragraph came from (1-indexed)
    pub page: u32,
}

impl Paragraph {
    /// Create an empty body paragraph.
    pub fn new(page: u32) -> Self {
        Self {
            role: ParagraphRole::Body,
            alignment: Alignment::Left,
            runs: Vec::new(),
            font_size: 0.0,
            page,
        }
    }

    /// Add a styled run.
    pub fn add_run(&mut self, run: StyledRun) {
        self.runs.push(run);
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        self.role.heading_level().is_some()
    }

    /// Get the heading level (1-2) or None.
    pub fn heading_level(&self) -> Option<u8> {
        self.role.heading_level()
    }
}

/// Semantic role of a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphRole {
    /// Top-level heading
    Heading1,
    /// Second-level heading
    Heading2,
    /// Regular body text
    #[default]
    Body,
    /// Small text such as figure captions
    Caption,
    /// Bulleted list item
    ListItem,
}

impl ParagraphRole {
    /// Heading level for heading roles.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            ParagraphRole::Heading1 => Some(1),
            ParagraphRole::Heading2 => Some(2),
            _ => None,
        }
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
}

/// A maximal span of paragraph text sharing one style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledRun {
    /// The text content, including inferred spaces
    pub text: String,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Fixed-width font
    pub monospace: bool,

    /// Portable font family name
    pub font_family: String,

    /// Size in half-points, the unit word-processor formats use for run size
    pub size_points: u32,
}

impl StyledRun {
    /// Create a plain run with the default family.
    pub fn new(text: impl Into<String>, font_family: impl Into<String>, size_points: u32) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            monospace: false,
            font_family: font_family.into(),
            size_points,
        }
    }

    /// Mark the run bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Mark the run italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Check if any emphasis is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.monospace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let mut p = Paragraph::new(1);
        p.add_run(StyledRun::new("Hello ", "Arial", 24));
        p.add_run(StyledRun::new("world", "Arial", 24).bold());
        p.add_run(StyledRun::new("!", "Arial", 24));

        assert_eq!(p.plain_text(), "Hello world!");
        assert!(!p.is_empty());
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(ParagraphRole::Heading1.heading_level(), Some(1));
        assert_eq!(ParagraphRole::Heading2.heading_level(), Some(2));
        assert_eq!(ParagraphRole::Caption.heading_level(), None);

        let mut p = Paragraph::new(1);
        p.role = ParagraphRole::Heading2;
        assert!(p.is_heading());
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_string(&ParagraphRole::ListItem).unwrap();
        assert_eq!(json, "\"list_item\"");
        let json = serde_json::to_string(&Alignment::Center).unwrap();
        assert_eq!(json, "\"center\"");
    }

    #[test]
    fn test_run_styling() {
        let run = StyledRun::new("x", "Arial", 20);
        assert!(!run.has_styling());
        assert!(run.italic().has_styling());
    }
}
