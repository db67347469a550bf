//! JSON rendering for reconstructed documents.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Paragraph, ParagraphRole, StyledRun};

    fn sample() -> Document {
        let mut p = Paragraph::new(1);
        p.role = ParagraphRole::Heading1;
        p.add_run(StyledRun::new("Hello", "Arial", 44).bold());
        Document {
            page_count: 1,
            blocks: vec![Block::Paragraph(p)],
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"heading1\""));
        assert!(json.contains("\"type\": \"paragraph\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"size_points\":44"));
    }

    #[test]
    fn test_json_round_trip_page_break() {
        let mut doc = sample();
        doc.blocks.push(Block::PageBreak);
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(json.contains("{\"type\":\"page_break\"}"));
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
