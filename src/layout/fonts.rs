//! Font name normalization.
//!
//! Embedded PDF font names carry subset tags, foundry suffixes and style
//! markers ("ABCDEF+TimesNewRomanPS-BoldMT"). Output formats want one of a
//! handful of portable families instead. The mapping here is total: every
//! input, including empty or garbled names, yields exactly one family.

use std::fmt;

use unicode_normalization::UnicodeNormalization;

/// Portable font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FontFamily {
    /// Default sans-serif family
    #[default]
    Sans,
    /// Default serif family
    Serif,
    /// Fixed-width family
    Monospace,
    /// Dingbat and symbol family
    Symbol,
}

impl FontFamily {
    /// Every family the normalizer can return.
    pub const ALL: [FontFamily; 4] = [
        FontFamily::Sans,
        FontFamily::Serif,
        FontFamily::Monospace,
        FontFamily::Symbol,
    ];

    /// Family name as written into output documents.
    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Sans => "Arial",
            FontFamily::Serif => "Times New Roman",
            FontFamily::Monospace => "Courier New",
            FontFamily::Symbol => "Symbol",
        }
    }

    /// Check if the family is fixed-width.
    pub fn is_monospace(self) -> bool {
        self == FontFamily::Monospace
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Substring table, checked in order. Lowercase, alphanumeric only.
const FAMILY_TABLE: &[(&str, FontFamily)] = &[
    ("zapfdingbats", FontFamily::Symbol),
    ("dingbats", FontFamily::Symbol),
    ("wingdings", FontFamily::Symbol),
    ("webdings", FontFamily::Symbol),
    ("symbol", FontFamily::Symbol),
    ("courier", FontFamily::Monospace),
    ("consolas", FontFamily::Monospace),
    ("menlo", FontFamily::Monospace),
    ("mono", FontFamily::Monospace),
    ("times", FontFamily::Serif),
    ("georgia", FontFamily::Serif),
    ("garamond", FontFamily::Serif),
    ("cambria", FontFamily::Serif),
    ("palatino", FontFamily::Serif),
    ("bookman", FontFamily::Serif),
    ("helvetica", FontFamily::Sans),
    ("arial", FontFamily::Sans),
    ("calibri", FontFamily::Sans),
    ("verdana", FontFamily::Sans),
];

/// Map a raw font name onto a portable family.
pub fn normalize_font(raw: &str) -> FontFamily {
    if let Some(family) = lookup(&raw.to_lowercase()) {
        return family;
    }

    let cleaned = clean_font_name(raw);
    if let Some(family) = lookup(&cleaned) {
        return family;
    }

    if cleaned.contains("serif") && !cleaned.contains("sans") {
        return FontFamily::Serif;
    }

    FontFamily::Sans
}

/// Strip the subset tag and every non-alphanumeric character.
///
/// The result is NFKC-folded and lowercase; it may be empty.
pub fn clean_font_name(raw: &str) -> String {
    let folded: String = raw.nfkc().collect();
    strip_subset_prefix(&folded)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

fn strip_subset_prefix(name: &str) -> &str {
    if let Some((prefix, rest)) = name.split_once('+') {
        if prefix.len() == 6 && prefix.chars().all(|c| c.is_ascii_uppercase()) {
            return rest;
        }
    }
    name
}

fn lookup(name: &str) -> Option<FontFamily> {
    if name.contains("monotypesorts") {
        return Some(FontFamily::Symbol);
    }
    // The Monotype foundry name is not a fixed-width marker
    let name = name.replace("monotype", "");
    FAMILY_TABLE
        .iter()
        .find(|(needle, _)| name.contains(needle))
        .map(|(_, family)| *family)
}
