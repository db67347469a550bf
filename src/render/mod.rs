//! Rendering module for handing the paragraph stream to other formats.

mod json;
mod markdown;
mod options;
mod text;

pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{PageSelection, RenderOptions};
pub use text::to_text;
