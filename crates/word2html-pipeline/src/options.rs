//! Conversion options.

use serde::{Deserialize, Serialize};

/// Default maximum width, in pixels, of embedded images.
pub const DEFAULT_MAX_IMAGE_WIDTH: u32 = 800;

/// Default `<title>` of the standalone document.
pub const DEFAULT_TITLE: &str = "Converted Document";

/// Options controlling a single document conversion.
///
/// Every field is optional when deserializing; missing fields take their
/// defaults. The JSON form uses camelCase keys:
///
/// ```json
/// { "fontFamily": "Georgia, serif", "fontSize": "16px", "maxImageWidth": 640 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionOptions {
    /// CSS font stack applied to the whole fragment. Empty means no override.
    pub font_family: String,
    /// CSS font size applied to the whole fragment. Empty means no override.
    pub font_size: String,
    /// Images wider than this are downsampled. Zero falls back to the default.
    pub max_image_width: u32,
    /// Title of the standalone document.
    pub title: String,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            font_family: String::new(),
            font_size: String::new(),
            max_image_width: DEFAULT_MAX_IMAGE_WIDTH,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl ConversionOptions {
    /// Set the font family override.
    #[must_use]
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    /// Set the font size override.
    #[must_use]
    pub fn with_font_size(mut self, font_size: impl Into<String>) -> Self {
        self.font_size = font_size.into();
        self
    }

    /// Set the maximum image width.
    #[must_use]
    pub const fn with_max_image_width(mut self, max_image_width: u32) -> Self {
        self.max_image_width = max_image_width;
        self
    }

    /// Set the document title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Maximum image width actually used by the transcoder (never zero).
    #[must_use]
    pub const fn effective_max_image_width(&self) -> u32 {
        if self.max_image_width == 0 {
            DEFAULT_MAX_IMAGE_WIDTH
        } else {
            self.max_image_width
        }
    }

    /// Title actually used in the standalone document (never empty).
    #[must_use]
    pub fn effective_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() { DEFAULT_TITLE } else { title }
    }

    /// Whether any font override is requested.
    #[must_use]
    pub fn has_font_override(&self) -> bool {
        !self.font_family.trim().is_empty() || !self.font_size.trim().is_empty()
    }
}
