//! HTML normalization pipeline for the word2html converter.
//!
//! # Scope
//!
//! Given a flat HTML fragment produced by an [`Extractor`], this crate
//! provides:
//! - **Image Transcoding** - decode, flatten, downsample and inline every
//!   embedded image ([`transcode`])
//! - **List Reconstruction** - rebuild nested `<ul>`/`<ol>` trees from flat,
//!   level-tagged list items ([`lists`])
//! - **Style Enrichment** - deterministic inline styles for lists, tables,
//!   text blocks, quotes and images ([`enrich`])
//! - **Document Assembly** - optional font override and a standalone HTML
//!   document with an embedded stylesheet ([`assemble`])
//!
//! Every stage is synchronous and owns no shared state, so independent
//! documents can be converted on separate threads.

pub mod assemble;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod lists;
pub mod options;
pub mod stylesheet;
pub mod transcode;

pub use assemble::{ConversionResult, assemble};
pub use enrich::{Enricher, StylePass, enrich};
pub use error::ConvertError;
pub use extract::{ExtractedDocument, Extractor, ImageSource};
pub use lists::{ListItemMarker, ListReconstructor, rebuild_lists, reconstruct};
pub use options::ConversionOptions;
pub use transcode::{ImageTranscoder, TranscodeError, TranscodedImage, transcode};

pub use word2html_common as common;
pub use word2html_dom as dom;

use word2html_dom::HtmlTree;

/// A finished conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Body fragment and standalone document.
    pub result: ConversionResult,
    /// Extractor messages followed by image failure messages.
    pub warnings: Vec<String>,
    /// The enriched tree, before the font-override wrapper was added.
    pub tree: HtmlTree,
    /// Number of images inlined successfully.
    pub images_converted: usize,
    /// Number of images replaced by a placeholder.
    pub images_failed: usize,
    /// Number of lists rebuilt from flat items.
    pub lists_rebuilt: usize,
}

/// Run the full pipeline: extract, rebuild lists, enrich, assemble.
///
/// # Errors
///
/// Returns [`ConvertError::Extraction`] if the extractor cannot read its
/// input. Every other problem is resolved with a fallback and reported in
/// [`Conversion::warnings`].
pub fn convert<E: Extractor>(
    extractor: &mut E,
    options: &ConversionOptions,
) -> Result<Conversion, ConvertError> {
    let mut transcoder = ImageTranscoder::new(options.effective_max_image_width());
    let extracted = extractor
        .extract(&mut |asset| transcoder.resolve(asset))
        .map_err(ConvertError::extraction)?;

    let mut warnings = extracted.warnings;
    warnings.extend(transcoder.take_warnings());

    let mut conversion = convert_tree(extracted.tree, options);
    conversion.warnings = warnings;
    conversion.images_converted = transcoder.converted();
    conversion.images_failed = transcoder.failed();
    Ok(conversion)
}

/// Run the pipeline stages after extraction on a prebuilt fragment tree.
///
/// Images in `tree` are taken as they are; no transcoding happens here.
#[must_use]
pub fn convert_tree(mut tree: HtmlTree, options: &ConversionOptions) -> Conversion {
    let lists_rebuilt = rebuild_lists(&mut tree);
    enrich(&mut tree);
    let enriched = tree.clone();
    let result = assemble(&mut tree, options);
    Conversion {
        result,
        warnings: Vec::new(),
        tree: enriched,
        images_converted: 0,
        images_failed: 0,
        lists_rebuilt,
    }
}
