//! Pipeline-level errors.

use std::error::Error;
use thiserror::Error;

/// Error type for a whole-document conversion.
///
/// Only extractor failures abort a conversion. Image, list and enrichment
/// problems are resolved locally with a fallback and reported as warnings.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The extractor could not turn the input into a fragment tree.
    #[error("document could not be converted: {0}")]
    Extraction(#[source] Box<dyn Error + Send + Sync>),
}

impl ConvertError {
    /// Wrap any extractor error.
    pub fn extraction(error: impl Error + Send + Sync + 'static) -> Self {
        Self::Extraction(Box::new(error))
    }
}
