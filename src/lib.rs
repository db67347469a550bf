//! # relayout
//!
//! Document structure reconstruction from positioned PDF text fragments.
//!
//! Text extractors hand out loose, unordered fragments carrying a position, a
//! size and a raw font name. This library rebuilds lines, paragraphs, headings,
//! captions, list items, alignment and styled runs from them, and emits an
//! ordered paragraph stream with page breaks between pages.
//!
//! ## Quick Start
//!
//! ```no_run
//! use relayout::{reconstruct, render, PageInput, TextFragment};
//!
//! fn main() -> relayout::Result<()> {
//!     let page = PageInput::new(612.0, 792.0)
//!         .with_fragment(TextFragment::new("Title", 250.0, 720.0, 90.0, 22.0, "Helvetica-Bold"))
//!         .with_fragment(TextFragment::new("Body text.", 72.0, 680.0, 60.0, 11.0, "Times-Roman"));
//!
//!     let result = reconstruct(&[page])?;
//!     let markdown = render::to_markdown(&result.document, &render::RenderOptions::default())?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Line clustering**: order-independent, tolerant of baseline jitter
//! - **Paragraph segmentation**: vertical gaps, font size changes, short lines
//! - **Role classification**: headings, captions, list items, alignment
//! - **Styled runs**: bold, italic, monospace and normalized font families
//! - **Parallel processing**: Uses Rayon for multi-page documents
//! - **Output formats**: Markdown, plain text, JSON

pub mod error;
pub mod layout;
pub mod model;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::{
    normalize_font, FontFamily, LayoutEngine, LayoutOptions, PageOutput, Reconstruction,
    SegmentationMode,
};
pub use model::{
    Alignment, Block, Document, DocumentStats, PageInput, Paragraph, ParagraphRole, StyledRun,
    TextFragment,
};
pub use render::{JsonFormat, PageSelection, RenderOptions};
pub use source::{FragmentSource, JsonFragmentSource};

use std::path::Path;

/// Reconstruct pages with default options.
///
/// # Example
///
/// ```no_run
/// use relayout::{reconstruct, PageInput};
///
/// let result = reconstruct(&[PageInput::letter()]).unwrap();
/// assert!(result.document.paragraphs().next().is_none());
/// ```
pub fn reconstruct(pages: &[PageInput]) -> Result<Reconstruction> {
    reconstruct_with_options(pages, LayoutOptions::default())
}

/// Reconstruct pages with custom options.
///
/// # Example
///
/// ```no_run
/// use relayout::{reconstruct_with_options, LayoutOptions, PageInput};
///
/// let options = LayoutOptions::new().per_line().sequential();
/// let result = reconstruct_with_options(&[PageInput::letter()], options).unwrap();
/// ```
pub fn reconstruct_with_options(
    pages: &[PageInput],
    options: LayoutOptions,
) -> Result<Reconstruction> {
    let engine = LayoutEngine::new(options)?;
    Ok(engine.reconstruct(pages))
}

/// Load pages from any fragment source and reconstruct them.
pub fn reconstruct_source(
    source: &dyn FragmentSource,
    options: LayoutOptions,
) -> Result<Reconstruction> {
    let engine = LayoutEngine::new(options)?;
    let pages = source.load_pages()?;
    log::debug!("{}: reconstructing {} pages", source.name(), pages.len());
    Ok(engine.reconstruct(&pages))
}

/// Reconstruct a JSON fragment dump.
///
/// # Example
///
/// ```no_run
/// use relayout::reconstruct_file;
///
/// let result = reconstruct_file("fragments.json").unwrap();
/// println!("Paragraphs: {}", result.document.paragraph_count());
/// ```
pub fn reconstruct_file<P: AsRef<Path>>(path: P) -> Result<Reconstruction> {
    let source = JsonFragmentSource::open(path)?;
    reconstruct_source(&source, LayoutOptions::default())
}

/// Extract plain text from a JSON fragment dump.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let result = reconstruct_file(path)?;
    Ok(result.document.plain_text())
}

/// Convert a JSON fragment dump to Markdown.
///
/// # Example
///
/// ```no_run
/// use relayout::to_markdown;
///
/// let markdown = to_markdown("fragments.json").unwrap();
/// std::fs::write("output.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    to_markdown_with_options(path, &RenderOptions::default())
}

/// Convert a JSON fragment dump to Markdown with custom options.
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let result = reconstruct_file(path)?;
    render::to_markdown(&result.document, options)
}

/// Convert a JSON fragment dump to plain text.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let result = reconstruct_file(path)?;
    render::to_text(&result.document, options)
}

/// Convert a JSON fragment dump to the JSON paragraph stream.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let result = reconstruct_file(path)?;
    render::to_json(&result.document, format)
}

/// Builder for reconstructing and rendering documents.
///
/// # Example
///
/// ```no_run
/// use relayout::{PageSelection, Relayout};
///
/// let markdown = Relayout::new()
///     .with_pages(PageSelection::Range(1..=3))
///     .with_page_breaks()
///     .sequential()
///     .open("fragments.json")?
///     .to_markdown()?;
/// # Ok::<(), relayout::Error>(())
/// ```
pub struct Relayout {
    layout_options: LayoutOptions,
    render_options: RenderOptions,
}

impl Relayout {
    /// Create a new Relayout builder.
    pub fn new() -> Self {
        Self {
            layout_options: LayoutOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Replace the layout options.
    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        let pages = self.layout_options.pages.clone();
        self.layout_options = options;
        if self.layout_options.pages == PageSelection::All {
            self.layout_options.pages = pages;
        }
        self
    }

    /// Emit one paragraph per line instead of merging.
    pub fn per_line(mut self) -> Self {
        self.layout_options = self.layout_options.per_line();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.layout_options = self.layout_options.sequential();
        self
    }

    /// Render page breaks as horizontal rules.
    pub fn with_page_breaks(mut self) -> Self {
        self.render_options = self.render_options.with_page_breaks(true);
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.render_options = self.render_options.with_list_marker(marker);
        self
    }

    /// Disable Markdown escaping.
    pub fn without_escaping(mut self) -> Self {
        self.render_options = self.render_options.with_escaping(false);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.layout_options = self.layout_options.with_pages(pages.clone());
        self.render_options = self.render_options.with_pages(pages);
        self
    }

    /// Reconstruct in-memory pages and return a result wrapper.
    pub fn reconstruct(self, pages: &[PageInput]) -> Result<RelayoutResult> {
        let result = reconstruct_with_options(pages, self.layout_options)?;
        Ok(RelayoutResult::new(result, self.render_options))
    }

    /// Reconstruct pages loaded from a fragment source.
    pub fn load(self, source: &dyn FragmentSource) -> Result<RelayoutResult> {
        let result = reconstruct_source(source, self.layout_options)?;
        Ok(RelayoutResult::new(result, self.render_options))
    }

    /// Reconstruct a JSON fragment dump.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<RelayoutResult> {
        let source = JsonFragmentSource::open(path)?;
        self.load(&source)
    }

    /// Reconstruct an in-memory JSON fragment dump.
    pub fn parse_bytes(self, data: &[u8]) -> Result<RelayoutResult> {
        let source = JsonFragmentSource::from_bytes(data);
        self.load(&source)
    }
}

impl Default for Relayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of reconstructing a document.
pub struct RelayoutResult {
    /// The reconstructed document
    pub document: Document,
    /// Fragments dropped at intake
    pub rejected: Vec<Error>,
    /// Render options to use
    render_options: RenderOptions,
}

impl RelayoutResult {
    fn new(result: Reconstruction, render_options: RenderOptions) -> Self {
        Self {
            document: result.document,
            rejected: result.rejected,
            render_options,
        }
    }

    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get plain text without rendering rules.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get content statistics.
    pub fn stats(&self) -> DocumentStats {
        self.document.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pages() -> Vec<PageInput> {
        vec![
            PageInput::new(600.0, 800.0)
                .with_fragment(TextFragment::new("Title", 260.0, 740.0, 80.0, 22.0, "Arial-Bold"))
                .with_fragment(TextFragment::new("Body text.", 72.0, 690.0, 60.0, 11.0, "Times")),
            PageInput::new(600.0, 800.0)
                .with_fragment(TextFragment::new("More.", 72.0, 700.0, 30.0, 11.0, "Times")),
        ]
    }

    #[test]
    fn test_relayout_builder() {
        let builder = Relayout::new().per_line().sequential().with_page_breaks();
        assert_eq!(builder.layout_options.segmentation, SegmentationMode::PerLine);
        assert!(!builder.layout_options.parallel);
        assert!(builder.render_options.page_breaks);
    }

    #[test]
    fn test_relayout_builder_default() {
        let builder = Relayout::default();
        assert_eq!(builder.layout_options.segmentation, SegmentationMode::Merge);
        assert!(!builder.render_options.page_breaks);
    }

    #[test]
    fn test_relayout_builder_with_pages() {
        let builder = Relayout::new().with_pages(PageSelection::Range(1..=5));
        assert_eq!(builder.layout_options.pages, PageSelection::Range(1..=5));
        assert!(matches!(
            builder.render_options.page_selection,
            PageSelection::Range(_)
        ));
    }

    #[test]
    fn test_layout_options_keep_page_selection() {
        let builder = Relayout::new()
            .with_pages(PageSelection::Pages(vec![2]))
            .with_layout_options(LayoutOptions::new().with_word_gap(4.0));
        assert_eq!(builder.layout_options.pages, PageSelection::Pages(vec![2]));
        assert_eq!(builder.layout_options.word_gap, 4.0);
    }

    #[test]
    fn test_reconstruct_and_render() {
        let result = Relayout::new()
            .with_page_breaks()
            .reconstruct(&sample_pages())
            .unwrap();
        let markdown = result.to_markdown().unwrap();
        assert_eq!(markdown, "# Title\n\nBody text.\n\n---\n\nMore.");
        assert_eq!(result.stats().heading_count, 1);
        assert!(result.rejected.is_empty());
    }

    #[test]
    fn test_reconstruct_invalid_options() {
        let options = LayoutOptions::new().with_center_band(0.7, 0.3);
        assert!(matches!(
            reconstruct_with_options(&sample_pages(), options),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_parse_bytes_invalid() {
        let result = Relayout::new().parse_bytes(b"not json");
        assert!(matches!(result, Err(Error::ExtractionFailed(_))));
    }

    #[test]
    fn test_reconstruct_file_missing() {
        assert!(reconstruct_file("/nonexistent/fragments.json").is_err());
    }
}
