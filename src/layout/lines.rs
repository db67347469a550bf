//! Line clustering.
//!
//! Fragments whose rounded baselines sit within the merge threshold of a line
//! anchor join that line. Fragments are first put into a canonical order so
//! the result does not depend on the order the extractor emitted them in.

use std::cmp::Ordering;

use crate::model::TextFragment;

/// A text line composed of fragments on approximately the same baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Anchor Y position (rounded baseline of the line's first fragment)
    pub y: f32,
    /// The fragments in this line, sorted by X position
    pub fragments: Vec<TextFragment>,
    /// Largest fragment height in the line
    pub font_size: f32,
}

impl TextLine {
    /// Start a line anchored at `y`.
    pub fn new(y: f32, fragment: TextFragment) -> Self {
        Self {
            y,
            font_size: fragment.height,
            fragments: vec![fragment],
        }
    }

    /// Add a fragment, raising the line's font size if needed.
    pub fn push(&mut self, fragment: TextFragment) {
        if fragment.height > self.font_size {
            self.font_size = fragment.height;
        }
        self.fragments.push(fragment);
    }

    /// Leftmost X position.
    pub fn x(&self) -> f32 {
        self.fragments
            .iter()
            .map(|f| f.x)
            .min_by(|a, b| a.total_cmp(b))
            .unwrap_or(0.0)
    }

    /// Mean X position of the line's fragments.
    pub fn average_x(&self) -> f32 {
        if self.fragments.is_empty() {
            return 0.0;
        }
        self.fragments.iter().map(|f| f.x).sum::<f32>() / self.fragments.len() as f32
    }

    /// Combined text of all fragments with inferred word spaces.
    pub fn text(&self, word_gap: f32) -> String {
        let mut result = String::new();
        for (i, fragment) in self.fragments.iter().enumerate() {
            if i > 0 && needs_space(&self.fragments[i - 1], fragment, word_gap) {
                result.push(' ');
            }
            result.push_str(&fragment.text);
        }
        result
    }

    /// Whether any fragment is set in a bold face.
    pub fn has_bold(&self) -> bool {
        self.fragments.iter().any(|f| f.is_bold())
    }
}

/// Decide whether a space belongs between two fragments of one line.
///
/// A space is inferred when the horizontal gap exceeds `word_gap`, unless one
/// side already carries whitespace. Touching or overlapping fragments never
/// get one.
pub fn needs_space(prev: &TextFragment, next: &TextFragment, word_gap: f32) -> bool {
    let gap = next.x - prev.right();
    if gap <= word_gap {
        return false;
    }
    let prev_ends_with_space = prev.text.ends_with(char::is_whitespace);
    let next_starts_with_space = next.text.starts_with(char::is_whitespace);
    !prev_ends_with_space && !next_starts_with_space
}

/// Round a baseline to one decimal place.
pub fn round_y(y: f32) -> f32 {
    tenths(y) as f32 / 10.0
}

/// A coordinate in whole tenths of a unit.
///
/// Clustering compares integers so that decimal inputs an exact threshold
/// apart never merge through float error.
fn tenths(value: f32) -> i64 {
    (f64::from(value) * 10.0).round() as i64
}

/// Group fragments into lines, top of page first.
///
/// Blank fragments are skipped. Within a line fragments run left to right.
pub fn cluster_lines(mut fragments: Vec<TextFragment>, threshold: f32) -> Vec<TextLine> {
    fragments.retain(|f| !f.is_blank());
    fragments.sort_by(canonical_order);

    let limit = tenths(threshold);
    let mut lines: Vec<TextLine> = Vec::new();
    for fragment in fragments {
        let y = tenths(fragment.y);
        match lines
            .iter_mut()
            .find(|line| (tenths(line.y) - y).abs() < limit)
        {
            Some(line) => line.push(fragment),
            None => lines.push(TextLine::new(y as f32 / 10.0, fragment)),
        }
    }

    for line in &mut lines {
        line.fragments.sort_by(|a, b| a.x.total_cmp(&b.x));
    }
    lines.sort_by(|a, b| b.y.total_cmp(&a.y));
    lines
}

/// Total order over fragments: top to bottom, then left to right, then by
/// content so that exact duplicates in position still sort stably.
fn canonical_order(a: &TextFragment, b: &TextFragment) -> Ordering {
    tenths(b.y)
        .cmp(&tenths(a.y))
        .then_with(|| a.x.total_cmp(&b.x))
        .then_with(|| b.y.total_cmp(&a.y))
        .then_with(|| a.text.cmp(&b.text))
        .then_with(|| a.width.total_cmp(&b.width))
        .then_with(|| a.height.total_cmp(&b.height))
        .then_with(|| a.font_name.cmp(&b.font_name))
}
