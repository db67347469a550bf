//! Layout inference: from positioned fragments to classified paragraphs.
//!
//! The stages run in order for each page: [`lines`] clusters fragments into
//! lines, [`segment`] merges lines into paragraph candidates, [`classify`]
//! assigns roles and alignment, [`runs`] coalesces styled runs (using
//! [`fonts`] for family names), and [`engine`] ties the stages together.

pub mod classify;
pub mod engine;
pub mod fonts;
pub mod lines;
mod options;
pub mod runs;
pub mod segment;

pub use classify::{infer_alignment, RoleClassifier};
pub use engine::{LayoutEngine, PageOutput, Reconstruction};
pub use fonts::{clean_font_name, normalize_font, FontFamily};
pub use lines::{cluster_lines, TextLine};
pub use options::{LayoutOptions, SegmentationMode};
pub use runs::assemble_runs;
pub use segment::{segment_lines, TextBlock};
