//! DOCX extractor for the word2html pipeline.
//!
//! Reads an Office Open XML word-processing package and produces the flat
//! HTML fragment the pipeline normalizes: headings, paragraphs, flat list
//! items tagged with their level, tables, quotes and images.
//!
//! # Example
//!
//! ```ignore
//! let mut extractor = DocxExtractor::from_path("report.docx")?;
//! let conversion = word2html_pipeline::convert(&mut extractor, &options)?;
//! ```

pub mod error;
pub mod numbering;
pub mod package;
pub mod reader;
pub mod relationships;
pub mod styles;
pub mod xml;

pub use error::{ExtractionError, Result};
pub use package::DocxPackage;

use std::path::Path;

use word2html_common::ImageAsset;
use word2html_pipeline::{ExtractedDocument, Extractor, ImageSource};

use crate::numbering::Numbering;
use crate::package::{DOCUMENT_PART, NUMBERING_PART, RELATIONSHIPS_PART, STYLES_PART};
use crate::reader::DocumentReader;
use crate::relationships::Relationships;
use crate::styles::Styles;
use crate::xml::XmlElement;

/// [`Extractor`] over a DOCX package.
pub struct DocxExtractor {
    package: DocxPackage,
}

impl DocxExtractor {
    /// Wrap an opened package.
    #[must_use]
    pub const fn new(package: DocxPackage) -> Self {
        Self { package }
    }

    /// Open a package from raw bytes.
    ///
    /// # Errors
    ///
    /// See [`DocxPackage::from_bytes`].
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        DocxPackage::from_bytes(bytes).map(Self::new)
    }

    /// Open a package from disk.
    ///
    /// # Errors
    ///
    /// See [`DocxPackage::from_path`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        DocxPackage::from_path(path).map(Self::new)
    }

    /// Parse a part that must exist.
    fn parse_required(&mut self, part: &str) -> Result<XmlElement> {
        let text = self.package.require_text_part(part)?;
        xml::parse(&text).map_err(|source| ExtractionError::Xml {
            part: part.to_string(),
            source,
        })
    }

    /// Parse an optional part. Absent or malformed parts yield `None`; the
    /// latter also adds a warning.
    fn parse_optional(
        &mut self,
        part: &str,
        warnings: &mut Vec<String>,
    ) -> Result<Option<XmlElement>> {
        let text = match self.package.read_text_part(part) {
            Ok(Some(text)) => text,
            Ok(None) => return Ok(None),
            Err(ExtractionError::Encoding(_)) => {
                warnings.push(format!("ignoring {part}: not valid UTF-8"));
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        match xml::parse(&text) {
            Ok(root) => Ok(Some(root)),
            Err(e) => {
                warnings.push(format!("ignoring malformed {part}: {e}"));
                Ok(None)
            }
        }
    }
}

impl Extractor for DocxExtractor {
    type Error = ExtractionError;

    fn name(&self) -> &'static str {
        "docx"
    }

    fn extract(
        &mut self,
        on_image: &mut dyn FnMut(ImageAsset) -> ImageSource,
    ) -> Result<ExtractedDocument> {
        let document = self.parse_required(DOCUMENT_PART)?;
        let body = document
            .child("body")
            .ok_or_else(|| ExtractionError::MissingPart(format!("{DOCUMENT_PART}#body")))?;

        let mut warnings = Vec::new();
        let relationships = self
            .parse_optional(RELATIONSHIPS_PART, &mut warnings)?
            .map(|root| Relationships::from_xml(&root))
            .unwrap_or_default();
        let numbering = self
            .parse_optional(NUMBERING_PART, &mut warnings)?
            .map(|root| Numbering::from_xml(&root))
            .unwrap_or_default();
        let styles = self
            .parse_optional(STYLES_PART, &mut warnings)?
            .map(|root| Styles::from_xml(&root))
            .unwrap_or_default();

        let mut reader = DocumentReader::new(
            &styles,
            &numbering,
            &relationships,
            &mut self.package,
            on_image,
        );
        for warning in warnings {
            reader.warn(warning);
        }
        reader.read_body(body);
        let (tree, warnings) = reader.finish();

        Ok(ExtractedDocument { tree, warnings })
    }
}
