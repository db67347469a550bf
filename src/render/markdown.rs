//! Markdown rendering for reconstructed documents.

use crate::error::Result;
use crate::model::{Block, Document, Paragraph, ParagraphRole, StyledRun};

use super::RenderOptions;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Markdown renderer.
///
/// Alignment has no Markdown equivalent and is not rendered.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();
        let mut pending_break = false;
        let mut in_list = false;

        for block in &doc.blocks {
            match block {
                Block::PageBreak => pending_break = true,
                Block::Paragraph(p) => {
                    if !self.options.page_selection.includes(p.page) || p.is_empty() {
                        continue;
                    }
                    let is_item = p.role == ParagraphRole::ListItem;
                    let ruled = pending_break && self.options.page_breaks && !output.is_empty();
                    // List items are tight; close the list before anything else
                    if in_list && (!is_item || ruled) {
                        output.push('\n');
                    }
                    if ruled {
                        output.push_str("---\n\n");
                    }
                    pending_break = false;
                    in_list = is_item;
                    self.render_paragraph(&mut output, p);
                }
            }
        }

        Ok(output.trim().to_string())
    }

    fn render_paragraph(&self, output: &mut String, para: &Paragraph) {
        match para.role {
            ParagraphRole::Heading1 | ParagraphRole::Heading2 => {
                let level = para
                    .heading_level()
                    .unwrap_or(1)
                    .min(self.options.max_heading_level);
                output.push_str(&"#".repeat(level as usize));
                output.push(' ');
                output.push_str(&self.escape(collapse_whitespace(&para.plain_text()).as_str()));
                output.push_str("\n\n");
            }
            ParagraphRole::ListItem => {
                let text = para.plain_text();
                let item = strip_list_marker(&text).unwrap_or(text.trim());
                output.push(self.options.list_marker);
                output.push(' ');
                let item = self.escape(collapse_whitespace(item).as_str());
                output.push_str(&self.escape_block_start(item));
                output.push('\n');
            }
            ParagraphRole::Caption => {
                output.push('*');
                output.push_str(&self.escape(collapse_whitespace(&para.plain_text()).as_str()));
                output.push_str("*\n\n");
            }
            ParagraphRole::Body => {
                let mut line = String::new();
                for run in &para.runs {
                    self.render_run(&mut line, run);
                }
                output.push_str(&self.escape_block_start(line));
                output.push_str("\n\n");
            }
        }
    }

    fn render_run(&self, output: &mut String, run: &StyledRun) {
        // Markers must hug the text, so surrounding whitespace stays outside
        let core = run.text.trim();
        if core.is_empty() {
            output.push_str(&run.text);
            return;
        }
        let start = run.text.len() - run.text.trim_start().len();
        let leading = &run.text[..start];
        let trailing = &run.text[start + core.len()..];

        let mut styled = if run.monospace {
            format!("`{}`", core)
        } else {
            self.escape(core)
        };
        if run.italic {
            styled = format!("*{}*", styled);
        }
        if run.bold {
            styled = format!("**{}**", styled);
        }

        output.push_str(leading);
        output.push_str(&styled);
        output.push_str(trailing);
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }

    fn escape_block_start(&self, text: String) -> String {
        if self.options.escape_special_chars {
            escape_line_start(&text)
        } else {
            text
        }
    }
}

/// Escape a line start that would otherwise open a heading, quote, list or rule.
fn escape_line_start(text: &str) -> String {
    let body = text.trim_start();
    let indent = &text[..text.len() - body.len()];

    if body.starts_with(['#', '>', '+', '-', '=']) {
        return format!("{}\\{}", indent, body);
    }

    // Ordered list markers: up to nine digits, then `.` or `)`
    let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if (1..=9).contains(&digits) {
        let rest = &body[digits..];
        if rest.starts_with(['.', ')']) && rest[1..].chars().next().map_or(true, char::is_whitespace) {
            return format!("{}{}\\{}", indent, &body[..digits], rest);
        }
    }

    text.to_string()
}

/// Remove a leading bullet, dash or asterisk and the whitespace after it.
fn strip_list_marker(text: &str) -> Option<&str> {
    let trimmed = text.trim_start();
    let mut chars = trimmed.char_indices();
    let (_, marker) = chars.next()?;
    let (rest_start, next) = chars.next()?;
    if is_list_marker(marker) && next.is_whitespace() {
        Some(trimmed[rest_start..].trim())
    } else {
        None
    }
}

fn is_list_marker(c: char) -> bool {
    matches!(
        c,
        '-' | '*' | '•' | '·' | '▪' | '◦' | '‣' | '∙' | '●' | '○' | '■' | '□' | '–' | '—'
    )
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Alignment;

    fn para(page: u32, role: ParagraphRole, runs: Vec<StyledRun>) -> Paragraph {
        Paragraph {
            role,
            alignment: Alignment::Left,
            runs,
            font_size: 12.0,
            page,
        }
    }

    fn run(text: &str) -> StyledRun {
        StyledRun::new(text, "Arial", 24)
    }

    fn doc(blocks: Vec<Block>) -> Document {
        Document {
            page_count: 2,
            blocks,
        }
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
    }

    #[test]
    fn test_escape_line_start() {
        assert_eq!(escape_line_start("# Not a heading"), "\\# Not a heading");
        assert_eq!(escape_line_start("> quoted"), "\\> quoted");
        assert_eq!(escape_line_start("+ x"), "\\+ x");
        assert_eq!(escape_line_start("---"), "\\---");
        assert_eq!(escape_line_start("1. also body"), "1\\. also body");
        assert_eq!(escape_line_start("12) step"), "12\\) step");
        assert_eq!(escape_line_start("2024."), "2024\\.");
        assert_eq!(escape_line_start("3.5 percent"), "3.5 percent");
        assert_eq!(escape_line_start("Plain # text"), "Plain # text");
    }

    #[test]
    fn test_body_does_not_become_block_syntax() {
        let d = doc(vec![
            Block::Paragraph(para(1, ParagraphRole::Body, vec![run("# Not a heading")])),
            Block::Paragraph(para(1, ParagraphRole::Body, vec![run("1. also body")])),
            Block::Paragraph(para(1, ParagraphRole::Body, vec![run("> not quoted")])),
        ]);
        let md = to_markdown(&d, &RenderOptions::new()).unwrap();
        assert_eq!(md, "\\# Not a heading\n\n1\\. also body\n\n\\> not quoted");

        let raw = to_markdown(&d, &RenderOptions::new().with_escaping(false)).unwrap();
        assert!(raw.starts_with("# Not a heading"));
    }

    #[test]
    fn test_strip_list_marker() {
        assert_eq!(strip_list_marker("• item one"), Some("item one"));
        assert_eq!(strip_list_marker("  - item"), Some("item"));
        assert_eq!(strip_list_marker("-5 degrees"), None);
        assert_eq!(strip_list_marker(""), None);
    }

    #[test]
    fn test_render_roles() {
        let d = doc(vec![
            Block::Paragraph(para(1, ParagraphRole::Heading1, vec![run("Chapter 1")])),
            Block::Paragraph(para(1, ParagraphRole::Heading2, vec![run("Overview")])),
            Block::Paragraph(para(1, ParagraphRole::ListItem, vec![run("• first")])),
            Block::Paragraph(para(1, ParagraphRole::Caption, vec![run("Figure 1")])),
        ]);
        let md = to_markdown(&d, &RenderOptions::new()).unwrap();
        assert_eq!(md, "# Chapter 1\n\n## Overview\n\n- first\n\n*Figure 1*");
    }

    #[test]
    fn test_render_styled_runs() {
        let d = doc(vec![Block::Paragraph(para(
            1,
            ParagraphRole::Body,
            vec![
                run("Note:").bold(),
                run(" read ").italic(),
                StyledRun {
                    monospace: true,
                    ..run("x_y")
                },
                run(" now"),
            ],
        ))]);
        let md = to_markdown(&d, &RenderOptions::new()).unwrap();
        assert_eq!(md, "**Note:** *read* `x_y` now");
    }

    #[test]
    fn test_page_break_rules() {
        let d = doc(vec![
            Block::Paragraph(para(1, ParagraphRole::Body, vec![run("one")])),
            Block::PageBreak,
            Block::Paragraph(para(2, ParagraphRole::Body, vec![run("two")])),
        ]);
        let plain = to_markdown(&d, &RenderOptions::new()).unwrap();
        assert_eq!(plain, "one\n\ntwo");

        let ruled = to_markdown(&d, &RenderOptions::new().with_page_breaks(true)).unwrap();
        assert_eq!(ruled, "one\n\n---\n\ntwo");

        let second = to_markdown(&d, &RenderOptions::new().with_page_range(2..=2)).unwrap();
        assert_eq!(second, "two");
    }

    #[test]
    fn test_list_items_are_tight() {
        let d = doc(vec![
            Block::Paragraph(para(1, ParagraphRole::ListItem, vec![run("- a")])),
            Block::Paragraph(para(1, ParagraphRole::ListItem, vec![run("* b")])),
            Block::Paragraph(para(1, ParagraphRole::Body, vec![run("after")])),
        ]);
        let md = to_markdown(&d, &RenderOptions::new().with_list_marker('*')).unwrap();
        assert_eq!(md, "* a\n* b\n\nafter");
    }

    #[test]
    fn test_max_heading_level() {
        let d = doc(vec![Block::Paragraph(para(
            1,
            ParagraphRole::Heading2,
            vec![run("Deep")],
        ))]);
        let md = to_markdown(&d, &RenderOptions::new().with_max_heading(1)).unwrap();
        assert_eq!(md, "# Deep");
    }
}
