//! Per-page reconstruction and document assembly.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{Block, Document, PageInput, Paragraph, TextFragment};

use super::classify::RoleClassifier;
use super::lines::cluster_lines;
use super::options::LayoutOptions;
use super::runs::assemble_runs;
use super::segment::segment_lines;

/// Paragraphs reconstructed from one page.
#[derive(Debug)]
pub struct PageOutput {
    /// 1-indexed page number
    pub page: u32,
    /// Paragraphs in reading order
    pub paragraphs: Vec<Paragraph>,
    /// Fragments dropped at intake
    pub rejected: Vec<Error>,
}

/// The reconstructed document plus every fragment that had to be dropped.
#[derive(Debug)]
pub struct Reconstruction {
    /// The paragraph stream
    pub document: Document,
    /// One [`Error::MalformedFragment`] per dropped fragment, in page order
    pub rejected: Vec<Error>,
}

impl Reconstruction {
    /// Check if every fragment was usable.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Rebuilds paragraphs, headings and styled runs from positioned fragments.
///
/// Each page runs clustering, segmentation, classification and run assembly
/// in that order. Pages share no state and may run in parallel; the output
/// keeps page order either way.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    options: LayoutOptions,
    classifier: RoleClassifier,
}

impl LayoutEngine {
    /// Create an engine, rejecting unusable options.
    pub fn new(options: LayoutOptions) -> Result<Self> {
        options.validate()?;
        let classifier = RoleClassifier::new(&options);
        Ok(Self {
            options,
            classifier,
        })
    }

    /// Get the engine's options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Reconstruct every selected page and join the results in page order.
    pub fn reconstruct(&self, pages: &[PageInput]) -> Reconstruction {
        let selected: Vec<(u32, &PageInput)> = pages
            .iter()
            .enumerate()
            .map(|(i, page)| (i as u32 + 1, page))
            .filter(|(number, _)| self.options.pages.includes(*number))
            .collect();

        let outputs: Vec<PageOutput> = if self.options.parallel && selected.len() > 1 {
            selected
                .par_iter()
                .map(|(number, page)| self.reconstruct_page(*number, page))
                .collect()
        } else {
            selected
                .iter()
                .map(|(number, page)| self.reconstruct_page(*number, page))
                .collect()
        };

        let mut document = Document::new();
        document.page_count = pages.len() as u32;
        let mut rejected = Vec::new();

        for (i, output) in outputs.into_iter().enumerate() {
            if i > 0 {
                document.push(Block::PageBreak);
            }
            document
                .blocks
                .extend(output.paragraphs.into_iter().map(Block::Paragraph));
            rejected.extend(output.rejected);
        }

        if !rejected.is_empty() {
            log::warn!("Dropped {} malformed fragments", rejected.len());
        }

        Reconstruction { document, rejected }
    }

    /// Reconstruct one page.
    pub fn reconstruct_page(&self, number: u32, page: &PageInput) -> PageOutput {
        let (fragments, rejected) = intake(number, &page.fragments);
        let fragment_count = fragments.len();

        let lines = cluster_lines(fragments, self.options.line_merge_threshold);
        let line_count = lines.len();

        let mut blocks = segment_lines(lines, &self.options);
        let paragraphs: Vec<Paragraph> = blocks
            .iter_mut()
            .map(|block| {
                self.classifier.classify(block, page.width);
                Paragraph {
                    role: block.role,
                    alignment: block.alignment,
                    runs: assemble_runs(block, self.options.word_gap),
                    font_size: block.font_size(),
                    page: number,
                }
            })
            .collect();

        log::debug!(
            "Page {}: {} fragments, {} lines, {} paragraphs",
            number,
            fragment_count,
            line_count,
            paragraphs.len()
        );

        PageOutput {
            page: number,
            paragraphs,
            rejected,
        }
    }
}

/// Split a page's fragments into usable ones and contract violations.
///
/// Blank fragments are neither: they are silently discarded.
fn intake(page: u32, fragments: &[TextFragment]) -> (Vec<TextFragment>, Vec<Error>) {
    let mut accepted = Vec::with_capacity(fragments.len());
    let mut rejected = Vec::new();

    for (index, fragment) in fragments.iter().enumerate() {
        if fragment.is_blank() {
            continue;
        }
        match fragment.check_geometry() {
            None => accepted.push(fragment.clone()),
            Some(reason) => {
                log::warn!(
                    "Dropping fragment {} on page {} ({:?}): {}",
                    index,
                    page,
                    fragment.text,
                    reason
                );
                rejected.push(Error::MalformedFragment {
                    page,
                    index,
                    reason,
                });
            }
        }
    }

    (accepted, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParagraphRole;

    fn engine() -> LayoutEngine {
        LayoutEngine::new(LayoutOptions::default()).unwrap()
    }

    #[test]
    fn test_invalid_options_rejected() {
        let result = LayoutEngine::new(LayoutOptions::new().with_word_gap(f32::INFINITY));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_intake_drops_blank_and_malformed() {
        let fragments = vec![
            TextFragment::new("ok", 72.0, 700.0, 10.0, 12.0, ""),
            TextFragment::new("  ", 72.0, 680.0, 10.0, 12.0, ""),
            TextFragment::new("bad", f32::NAN, 660.0, 10.0, 12.0, ""),
        ];
        let (accepted, rejected) = intake(3, &fragments);
        assert_eq!(accepted.len(), 1);
        assert_eq!(rejected.len(), 1);
        assert!(matches!(
            rejected[0],
            Error::MalformedFragment { page: 3, index: 2, .. }
        ));
    }

    #[test]
    fn test_empty_page() {
        let output = engine().reconstruct_page(1, &PageInput::letter());
        assert!(output.paragraphs.is_empty());
        assert!(output.rejected.is_empty());
    }

    #[test]
    fn test_page_breaks_between_pages() {
        let page = PageInput::new(600.0, 800.0)
            .with_fragment(TextFragment::new("Hi", 72.0, 700.0, 10.0, 12.0, ""));
        let result = engine().reconstruct(&[page.clone(), PageInput::new(600.0, 800.0), page]);

        let kinds: Vec<bool> = result
            .document
            .blocks
            .iter()
            .map(|b| b.is_page_break())
            .collect();
        assert_eq!(kinds, vec![false, true, true, false]);
        assert_eq!(result.document.page_count, 3);
        assert!(result.is_clean());
    }

    #[test]
    fn test_page_selection() {
        use crate::render::PageSelection;

        let make = |text: &str| {
            PageInput::new(600.0, 800.0)
                .with_fragment(TextFragment::new(text, 72.0, 700.0, 10.0, 12.0, ""))
        };
        let options = LayoutOptions::new().with_pages(PageSelection::Pages(vec![2]));
        let result = LayoutEngine::new(options)
            .unwrap()
            .reconstruct(&[make("one"), make("two"), make("three")]);

        let paragraphs: Vec<_> = result.document.paragraphs().collect();
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].plain_text(), "two");
        assert_eq!(paragraphs[0].page, 2);
        assert!(!result.document.blocks.iter().any(|b| b.is_page_break()));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pages: Vec<PageInput> = (0..8)
            .map(|i| {
                let mut page = PageInput::new(600.0, 800.0);
                page.push(TextFragment::new(
                    format!("Heading {}", i),
                    250.0,
                    760.0,
                    100.0,
                    20.0,
                    "Helvetica-Bold",
                ));
                page.push(TextFragment::new("body", 72.0, 700.0, 30.0, 12.0, "Times"));
                page
            })
            .collect();

        let parallel = engine().reconstruct(&pages);
        let sequential = LayoutEngine::new(LayoutOptions::new().sequential())
            .unwrap()
            .reconstruct(&pages);

        assert_eq!(parallel.document, sequential.document);
        let first = parallel.document.paragraphs().next().unwrap();
        assert_eq!(first.role, ParagraphRole::Heading1);
        assert_eq!(first.plain_text(), "Heading 0");
    }
}
