//! Access to the parts of a DOCX zip package.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{ExtractionError, Result};

/// Main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Relationships of the main document part.
pub const RELATIONSHIPS_PART: &str = "word/_rels/document.xml.rels";
/// List numbering definitions.
pub const NUMBERING_PART: &str = "word/numbering.xml";
/// Style definitions.
pub const STYLES_PART: &str = "word/styles.xml";

/// Local file header signature every zip archive starts with.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// An opened DOCX package.
pub struct DocxPackage {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl DocxPackage {
    /// Open a package from its raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::NotOoxml`] if the bytes are not a zip
    /// archive and [`ExtractionError::MissingPart`] if the archive has no
    /// `word/document.xml`.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if !bytes.starts_with(ZIP_MAGIC) {
            return Err(ExtractionError::NotOoxml);
        }
        let archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| match e {
            ZipError::InvalidArchive(_) | ZipError::UnsupportedArchive(_) => {
                ExtractionError::NotOoxml
            }
            other => ExtractionError::Zip(other),
        })?;
        let package = Self { archive };
        if !package.has_part(DOCUMENT_PART) {
            return Err(ExtractionError::MissingPart(DOCUMENT_PART.to_string()));
        }
        Ok(package)
    }

    /// Read and open a package from disk.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or any error of
    /// [`DocxPackage::from_bytes`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_bytes(fs::read(path)?)
    }

    /// Whether the package contains a part with this name.
    #[must_use]
    pub fn has_part(&self, name: &str) -> bool {
        self.archive.index_for_name(name).is_some()
    }

    /// Names of all parts, in archive order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.archive.file_names()
    }

    /// Raw bytes of a part, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the part exists but cannot be decompressed.
    pub fn read_part(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        match self.archive.by_name(name) {
            Ok(mut file) => {
                let mut bytes = Vec::new();
                let _ = file.read_to_end(&mut bytes)?;
                Ok(Some(bytes))
            }
            Err(ZipError::FileNotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// A part decoded as UTF-8 text with any byte order mark removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the part cannot be read or is not UTF-8.
    pub fn read_text_part(&mut self, name: &str) -> Result<Option<String>> {
        let Some(bytes) = self.read_part(name)? else {
            return Ok(None);
        };
        let text = String::from_utf8(strip_bom(&bytes).to_vec())
            .map_err(|_| ExtractionError::Encoding(name.to_string()))?;
        Ok(Some(text))
    }

    /// Like [`DocxPackage::read_text_part`], failing if the part is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::MissingPart`] if the part does not exist.
    pub fn require_text_part(&mut self, name: &str) -> Result<String> {
        self.read_text_part(name)?
            .ok_or_else(|| ExtractionError::MissingPart(name.to_string()))
    }
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}
