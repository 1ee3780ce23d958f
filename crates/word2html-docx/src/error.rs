//! Error types for reading DOCX packages.

use thiserror::Error;

/// Errors that abort extraction of a whole document.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The input is not an Office Open XML (zip) package, e.g. a legacy
    /// binary `.doc` file.
    #[error("not an Office Open XML document")]
    NotOoxml,

    /// A required part is missing from the package.
    #[error("missing package part: {0}")]
    MissingPart(String),

    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip container is damaged.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A part is not well-formed XML.
    #[error("XML parsing error in {part}: {source}")]
    Xml {
        /// Name of the offending part.
        part: String,
        /// Parser error.
        #[source]
        source: quick_xml::Error,
    },

    /// A part is not valid UTF-8.
    #[error("part {0} is not valid UTF-8")]
    Encoding(String),
}

/// Result alias for extraction.
pub type Result<T> = std::result::Result<T, ExtractionError>;
