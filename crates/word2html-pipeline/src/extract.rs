//! The extractor boundary.
//!
//! Turning a document package into a flat HTML fragment is not the
//! pipeline's job. Any source that implements [`Extractor`] can feed it: the
//! extractor builds the tree and hands every embedded image to a callback,
//! which the pipeline wires to the transcoder.

use std::error::Error;

use word2html_common::ImageAsset;
use word2html_dom::HtmlTree;

use crate::transcode::FAILED_IMAGE_ALT;

/// What to put into an `<img>` element for one embedded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    /// Value for the `src` attribute; empty when the image failed.
    pub src: String,
    /// Value for the `style` attribute, if any.
    pub style: Option<String>,
    /// Alt text that must win over the document's own description.
    pub fallback_alt: Option<String>,
}

impl ImageSource {
    /// A successfully inlined image.
    #[must_use]
    pub fn inline(src: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            style: Some(style.into()),
            fallback_alt: None,
        }
    }

    /// Placeholder for an image that could not be converted: empty `src`
    /// and an explanatory alt text.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            src: String::new(),
            style: None,
            fallback_alt: Some(FAILED_IMAGE_ALT.to_string()),
        }
    }

    /// Whether this source carries image data.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.src.is_empty()
    }
}

/// Output of an extractor: the flat fragment tree plus non-fatal messages.
#[derive(Debug, Clone, Default)]
pub struct ExtractedDocument {
    /// Headings, paragraphs, flat list items, tables and resolved images
    /// under the fragment root.
    pub tree: HtmlTree,
    /// Non-fatal messages, passed through to the caller untouched.
    pub warnings: Vec<String>,
}

/// Converts some input into an [`ExtractedDocument`].
pub trait Extractor {
    /// Error raised when the input cannot be read at all.
    type Error: Error + Send + Sync + 'static;

    /// Human-readable name (for diagnostics).
    fn name(&self) -> &'static str;

    /// Build the flat fragment tree, resolving each embedded image through
    /// `on_image` as it is encountered.
    ///
    /// # Errors
    ///
    /// Returns an error only when the input as a whole is unusable; problems
    /// with individual elements become warnings.
    fn extract(
        &mut self,
        on_image: &mut dyn FnMut(ImageAsset) -> ImageSource,
    ) -> Result<ExtractedDocument, Self::Error>;
}
