//! Input types supplied by the text-extraction collaborator.

use serde::{Deserialize, Deserializer, Serialize};

/// A positioned run of text as extracted from a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// The text content
    pub text: String,

    /// X position (left edge)
    #[serde(default = "missing", deserialize_with = "lenient_f32")]
    pub x: f32,

    /// Y position (baseline, PDF space: larger is higher on the page)
    #[serde(default = "missing", deserialize_with = "lenient_f32")]
    pub y: f32,

    /// Width of the glyph run
    #[serde(default, deserialize_with = "lenient_f32")]
    pub width: f32,

    /// Height of the glyph run, approximately the font size
    #[serde(default = "missing", deserialize_with = "lenient_f32")]
    pub height: f32,

    /// Raw embedded font name (e.g., "ABCDEF+Helvetica-Bold")
    #[serde(default, alias = "fontName")]
    pub font_name: String,
}

fn missing() -> f32 {
    f32::NAN
}

/// Read a coordinate, turning `null` into NaN.
///
/// serde_json writes non-finite floats as `null`, so a dumped NaN comes back
/// here and is rejected per fragment by the geometry check.
fn lenient_f32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::NAN))
}

impl TextFragment {
    /// Create a new fragment.
    pub fn new(
        text: impl Into<String>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        font_name: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
            font_name: font_name.into(),
        }
    }

    /// Right edge of the glyph run.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Check if the fragment carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether the font name marks a bold face.
    pub fn is_bold(&self) -> bool {
        self.font_name.to_lowercase().contains("bold")
    }

    /// Whether the font name marks an italic face.
    pub fn is_italic(&self) -> bool {
        let name = self.font_name.to_lowercase();
        name.contains("italic") || name.contains("oblique")
    }

    /// Check the geometry against the input contract.
    ///
    /// Returns a description of the first violation found.
    pub fn check_geometry(&self) -> Option<String> {
        let fields = [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Some(format!("{} is not finite ({})", name, value));
            }
        }
        if self.width < 0.0 {
            return Some(format!("width is negative ({})", self.width));
        }
        if self.height < 0.0 {
            return Some(format!("height is negative ({})", self.height));
        }
        None
    }
}

/// The fragments of one page together with its dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    /// Page width in the fragments' coordinate units
    pub width: f32,

    /// Page height in the fragments' coordinate units
    pub height: f32,

    /// Fragments in no particular order
    #[serde(default)]
    pub fragments: Vec<TextFragment>,
}

impl PageInput {
    /// Create an empty page with the given dimensions.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            fragments: Vec::new(),
        }
    }

    /// Create a page with standard Letter size (8.5 x 11 inches).
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }

    /// Add a fragment to the page.
    pub fn push(&mut self, fragment: TextFragment) {
        self.fragments.push(fragment);
    }

    /// Builder-style variant of [`PageInput::push`].
    pub fn with_fragment(mut self, fragment: TextFragment) -> Self {
        self.fragments.push(fragment);
        self
    }

    /// Check if the page has no fragments at all.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_font_name() {
        let f = TextFragment::new("Test", 0.0, 0.0, 20.0, 12.0, "Helvetica-Bold");
        assert!(f.is_bold());
        assert!(!f.is_italic());

        let f = TextFragment::new("Test", 0.0, 0.0, 20.0, 12.0, "Times-BoldItalic");
        assert!(f.is_bold());
        assert!(f.is_italic());

        let f = TextFragment::new("Test", 0.0, 0.0, 20.0, 12.0, "Helvetica-Oblique");
        assert!(f.is_italic());

        let f = TextFragment::new("Test", 0.0, 0.0, 20.0, 12.0, "");
        assert!(!f.is_bold());
        assert!(!f.is_italic());
    }

    #[test]
    fn test_check_geometry() {
        let ok = TextFragment::new("a", 1.0, 2.0, 3.0, 4.0, "F");
        assert!(ok.check_geometry().is_none());

        let bad = TextFragment::new("a", f32::NAN, 2.0, 3.0, 4.0, "F");
        assert!(bad.check_geometry().unwrap().starts_with("x"));

        let bad = TextFragment::new("a", 1.0, 2.0, 3.0, f32::INFINITY, "F");
        assert!(bad.check_geometry().unwrap().starts_with("height"));

        let bad = TextFragment::new("a", 1.0, 2.0, -3.0, 4.0, "F");
        assert!(bad.check_geometry().unwrap().contains("negative"));
    }

    #[test]
    fn test_blank() {
        assert!(TextFragment::new(" \t", 0.0, 0.0, 1.0, 1.0, "").is_blank());
        assert!(!TextFragment::new(" a ", 0.0, 0.0, 1.0, 1.0, "").is_blank());
    }

    #[test]
    fn test_deserialize_camel_case_font_name() {
        let json = r#"{"text":"Hi","x":1,"y":2,"width":3,"height":4,"fontName":"Courier"}"#;
        let f: TextFragment = serde_json::from_str(json).unwrap();
        assert_eq!(f.font_name, "Courier");

        let json = r#"{"text":"Hi","x":1,"y":2,"height":4}"#;
        let f: TextFragment = serde_json::from_str(json).unwrap();
        assert_eq!(f.font_name, "");
        assert_eq!(f.width, 0.0);
    }

    #[test]
    fn test_null_or_missing_geometry_reads_as_nan() {
        let json = r#"{"text":"Hi","x":null,"y":2,"height":4}"#;
        let f: TextFragment = serde_json::from_str(json).unwrap();
        assert!(f.x.is_nan());
        assert!(f.check_geometry().unwrap().starts_with("x"));

        let json = r#"{"text":"Hi","x":1,"height":4}"#;
        let f: TextFragment = serde_json::from_str(json).unwrap();
        assert!(f.y.is_nan());

        let json = r#"{"text":"Hi","x":1,"y":2,"width":null,"height":4}"#;
        let f: TextFragment = serde_json::from_str(json).unwrap();
        assert!(f.check_geometry().unwrap().starts_with("width"));
    }
}
