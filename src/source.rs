//! Fragment sources: the boundary to the text-extraction collaborator.
//!
//! The layout engine never reads files. A [`FragmentSource`] hands it pages of
//! positioned fragments, and any failure to produce them surfaces as
//! [`Error::ExtractionFailed`].
//!
//! # Example
//!
//! ```no_run
//! use relayout::source::{FragmentSource, JsonFragmentSource};
//!
//! fn main() -> relayout::Result<()> {
//!     let source = JsonFragmentSource::open("fragments.json")?;
//!     let pages = source.load_pages()?;
//!     println!("{} pages", pages.len());
//!     Ok(())
//! }
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::PageInput;

/// Trait for anything that can supply positioned fragments page by page.
pub trait FragmentSource: Send + Sync {
    /// Get the name of this source, used in diagnostics.
    fn name(&self) -> &str;

    /// Load every page in document order.
    fn load_pages(&self) -> Result<Vec<PageInput>>;
}

impl FragmentSource for Vec<PageInput> {
    fn name(&self) -> &str {
        "memory"
    }

    fn load_pages(&self) -> Result<Vec<PageInput>> {
        Ok(self.clone())
    }
}

/// On-disk layout of a fragment dump.
#[derive(Debug, Default, Serialize, Deserialize)]
struct FragmentDump {
    #[serde(default)]
    pages: Vec<PageInput>,
}

/// Reads fragments from JSON of the form
/// `{"pages":[{"width":612,"height":792,"fragments":[...]}]}`.
#[derive(Debug, Clone)]
pub struct JsonFragmentSource {
    name: String,
    data: Vec<u8>,
}

impl JsonFragmentSource {
    /// Read a fragment dump from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            Error::ExtractionFailed(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(Self {
            name: path.display().to_string(),
            data,
        })
    }

    /// Use an in-memory fragment dump.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: "bytes".to_string(),
            data: data.into(),
        }
    }

    /// Read a fragment dump from any reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| Error::ExtractionFailed(format!("cannot read input: {}", e)))?;
        Ok(Self {
            name: "reader".to_string(),
            data,
        })
    }

    /// Size of the raw dump in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the raw dump is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl FragmentSource for JsonFragmentSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_pages(&self) -> Result<Vec<PageInput>> {
        let dump: FragmentDump = serde_json::from_slice(&self.data).map_err(|e| {
            Error::ExtractionFailed(format!("{}: invalid fragment JSON: {}", self.name, e))
        })?;
        log::debug!("{}: loaded {} pages", self.name, dump.pages.len());
        Ok(dump.pages)
    }
}

/// Write pages as a fragment dump that [`JsonFragmentSource`] can read back.
pub fn write_fragment_dump<P: AsRef<Path>>(path: P, pages: &[PageInput]) -> Result<PathBuf> {
    let path = path.as_ref().to_path_buf();
    let dump = FragmentDump {
        pages: pages.to_vec(),
    };
    let json = serde_json::to_string_pretty(&dump)?;
    std::fs::write(&path, json)?;
    Ok(path)
}
