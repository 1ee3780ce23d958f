//! File-level entry points for the word2html converter.
//!
//! # Scope
//!
//! This crate wires the DOCX extractor into the normalization pipeline:
//! - **Input checks** - extension and size limits of the upload form
//! - **Conversion** - [`convert_file`] and [`convert_bytes`] return the
//!   body fragment, the standalone document and the collected warnings
//!
//! Everything below is re-exported for callers that need finer control.

pub use word2html_docx as docx;
pub use word2html_pipeline as pipeline;
pub use word2html_pipeline::{Conversion, ConversionOptions, ConversionResult};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use word2html_docx::DocxExtractor;

/// Largest accepted input, in bytes (16 MiB).
pub const MAX_INPUT_SIZE: u64 = 16 * 1024 * 1024;

/// File extensions accepted by [`convert_file`], compared case-insensitively.
///
/// Legacy `.doc` files pass this check but are rejected by the extractor
/// unless they are really Office Open XML packages.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["docx", "doc"];

/// Errors from the file-level entry points.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The document itself could not be converted.
    #[error(transparent)]
    Pipeline(#[from] pipeline::ConvertError),

    /// The file name does not end in an accepted extension.
    #[error("unsupported file type {0:?}: expected .docx or .doc")]
    UnsupportedExtension(String),

    /// The input exceeds [`MAX_INPUT_SIZE`].
    #[error("input is {size} bytes, the limit is {limit} bytes")]
    TooLarge {
        /// Size of the input.
        size: u64,
        /// The enforced limit.
        limit: u64,
    },

    /// The input file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Check the extension of an input path against [`ACCEPTED_EXTENSIONS`].
///
/// # Errors
///
/// Returns [`ConvertError::UnsupportedExtension`] with the offending
/// extension (empty if there is none).
pub fn check_extension(path: &Path) -> Result<(), ConvertError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();
    if ACCEPTED_EXTENSIONS
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(&extension))
    {
        Ok(())
    } else {
        Err(ConvertError::UnsupportedExtension(extension))
    }
}

const fn check_size(size: u64) -> Result<(), ConvertError> {
    if size > MAX_INPUT_SIZE {
        Err(ConvertError::TooLarge {
            size,
            limit: MAX_INPUT_SIZE,
        })
    } else {
        Ok(())
    }
}

/// Convert a `.docx` file on disk.
///
/// # Errors
///
/// Returns an error if the extension is not accepted, the file is too large
/// or unreadable, or the document cannot be extracted.
pub fn convert_file(
    path: impl AsRef<Path>,
    options: &ConversionOptions,
) -> Result<Conversion, ConvertError> {
    let path = path.as_ref();
    check_extension(path)?;

    let io_error = |source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(path).map_err(io_error)?;
    check_size(metadata.len())?;
    let bytes = fs::read(path).map_err(io_error)?;

    convert_bytes(bytes, options)
}

/// Convert an in-memory DOCX package.
///
/// # Errors
///
/// Returns [`ConvertError::TooLarge`] for oversized input and
/// [`ConvertError::Pipeline`] if the package cannot be read.
pub fn convert_bytes(
    bytes: Vec<u8>,
    options: &ConversionOptions,
) -> Result<Conversion, ConvertError> {
    check_size(u64::try_from(bytes.len()).unwrap_or(u64::MAX))?;
    let mut extractor =
        DocxExtractor::from_bytes(bytes).map_err(pipeline::ConvertError::extraction)?;
    Ok(pipeline::convert(&mut extractor, options)?)
}
