//! Document model types for structure reconstruction.
//!
//! Input types describe what the text-extraction collaborator hands over for
//! each page; output types describe the paragraph stream handed to a document
//! serializer. Both sides are plain serde-serializable data.

mod document;
mod fragment;
mod paragraph;

pub use document::{Block, Document, DocumentStats};
pub use fragment::{PageInput, TextFragment};
pub use paragraph::{Alignment, Paragraph, ParagraphRole, StyledRun};
