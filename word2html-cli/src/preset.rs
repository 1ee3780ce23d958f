//! Font presets offered by `--font`.

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// The font families of the upload form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum FontPreset {
    Arial,
    TimesNewRoman,
    Calibri,
    Verdana,
    Georgia,
    CourierNew,
}

impl FontPreset {
    /// CSS font stack for the preset.
    #[must_use]
    pub const fn family(self) -> &'static str {
        match self {
            Self::Arial => "Arial, sans-serif",
            Self::TimesNewRoman => "Times New Roman, serif",
            Self::Calibri => "Calibri, sans-serif",
            Self::Verdana => "Verdana, sans-serif",
            Self::Georgia => "Georgia, serif",
            Self::CourierNew => "Courier New, monospace",
        }
    }

    /// Preset names, comma-separated, for help and error output.
    #[must_use]
    pub fn names() -> String {
        Self::iter()
            .map(|preset| preset.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
