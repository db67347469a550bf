//! Styled run assembly.

use crate::model::{StyledRun, TextFragment};

use super::fonts::{normalize_font, FontFamily};
use super::lines::needs_space;
use super::segment::TextBlock;

/// Style attributes that must match for fragments to share a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunStyle {
    bold: bool,
    italic: bool,
    family: FontFamily,
}

impl RunStyle {
    fn of(fragment: &TextFragment) -> Self {
        Self {
            bold: fragment.is_bold(),
            italic: fragment.is_italic(),
            family: normalize_font(&fragment.font_name),
        }
    }

    fn start_run(self, text: String, height: f32) -> StyledRun {
        StyledRun {
            text,
            bold: self.bold,
            italic: self.italic,
            monospace: self.family.is_monospace(),
            font_family: self.family.name().to_string(),
            size_points: size_points(height),
        }
    }
}

/// Run size for a fragment height: twice the height, rounded.
pub fn size_points(height: f32) -> u32 {
    (height.max(0.0) * 2.0).round() as u32
}

/// Coalesce a block's fragments into styled runs.
///
/// Inferred spaces are attached to the front of the fragment that follows
/// them. Lines of one paragraph are joined with a single space.
pub fn assemble_runs(block: &TextBlock, word_gap: f32) -> Vec<StyledRun> {
    let mut runs: Vec<StyledRun> = Vec::new();
    let mut current_style: Option<RunStyle> = None;
    let mut ends_with_space = true;

    for (line_idx, line) in block.lines.iter().enumerate() {
        for (frag_idx, fragment) in line.fragments.iter().enumerate() {
            let separator = if frag_idx > 0 {
                needs_space(&line.fragments[frag_idx - 1], fragment, word_gap)
            } else {
                line_idx > 0
                    && !ends_with_space
                    && !fragment.text.starts_with(char::is_whitespace)
            };

            let mut piece = String::with_capacity(fragment.text.len() + 1);
            if separator {
                piece.push(' ');
            }
            piece.push_str(&fragment.text);
            ends_with_space = piece.ends_with(char::is_whitespace);

            let style = RunStyle::of(fragment);
            match runs.last_mut() {
                Some(run) if current_style == Some(style) => run.text.push_str(&piece),
                _ => {
                    runs.push(style.start_run(piece, fragment.height));
                    current_style = Some(style);
                }
            }
        }
    }

    runs
}
