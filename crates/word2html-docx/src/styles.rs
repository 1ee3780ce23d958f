//! Paragraph style resolution (`word/styles.xml`).
//!
//! Paragraphs name their style by id (`w:pStyle w:val="Heading1"`). Ids are
//! locale- and tool-dependent, so the id is first mapped to the style's
//! display name, then normalized (lowercase, no spaces) and matched against
//! the built-in names. Custom styles inherit the meaning of the style they
//! are based on.

use std::collections::HashMap;

use crate::xml::XmlElement;

/// Longest `basedOn` chain followed before giving up.
const MAX_BASED_ON_DEPTH: usize = 16;

/// What a paragraph style turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    /// `<h1>`..`<h6>`.
    Heading(u8),
    /// `List Bullet`, `List Bullet 2`, ...
    ListBullet(u32),
    /// `List Number`, `List Number 2`, ...
    ListNumber(u32),
    /// `Quote`.
    Quote,
    /// `Intense Quote`.
    IntenseQuote,
    /// Anything else; a list item only if it carries numbering.
    Normal,
}

impl ParagraphKind {
    /// Classify a normalized style name (`heading2`, `listbullet3`, ...).
    #[must_use]
    pub fn from_normalized_name(name: &str) -> Self {
        if name == "title" {
            return Self::Heading(1);
        }
        let heading = name
            .strip_prefix("heading")
            .and_then(|level| level.parse::<u8>().ok());
        if let Some(level) = heading {
            return Self::Heading(level.clamp(1, 6));
        }
        if let Some(level) = name.strip_prefix("listbullet") {
            return Self::ListBullet(list_level(level));
        }
        if let Some(level) = name.strip_prefix("listnumber") {
            return Self::ListNumber(list_level(level));
        }
        match name {
            "quote" => Self::Quote,
            "intensequote" => Self::IntenseQuote,
            _ => Self::Normal,
        }
    }
}

fn list_level(suffix: &str) -> u32 {
    suffix.parse::<u32>().ok().filter(|&n| n >= 1).unwrap_or(1)
}

/// Lowercase and strip whitespace: `Heading 1` -> `heading1`.
#[must_use]
pub fn normalize_style_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone)]
struct StyleEntry {
    name: String,
    based_on: Option<String>,
}

/// Paragraph styles by id.
#[derive(Debug, Clone, Default)]
pub struct Styles {
    by_id: HashMap<String, StyleEntry>,
}

impl Styles {
    /// Read paragraph styles from the parsed `w:styles` root element.
    #[must_use]
    pub fn from_xml(root: &XmlElement) -> Self {
        let by_id = root
            .children_named("style")
            .filter(|style| style.attr("type").is_none_or(|t| t == "paragraph"))
            .filter_map(|style| {
                let id = style.attr("styleId")?;
                let name = style.child_val("name").unwrap_or(id);
                Some((
                    id.to_string(),
                    StyleEntry {
                        name: name.to_string(),
                        based_on: style.child_val("basedOn").map(str::to_string),
                    },
                ))
            })
            .collect();
        Self { by_id }
    }

    /// Classify a paragraph by its style id.
    ///
    /// Without a `styles.xml` entry the id itself is used as the name.
    #[must_use]
    pub fn classify(&self, style_id: &str) -> ParagraphKind {
        let mut current = style_id;
        for _ in 0..MAX_BASED_ON_DEPTH {
            let Some(entry) = self.by_id.get(current) else {
                return ParagraphKind::from_normalized_name(&normalize_style_name(current));
            };
            let kind = ParagraphKind::from_normalized_name(&normalize_style_name(&entry.name));
            match (&kind, entry.based_on.as_deref()) {
                (ParagraphKind::Normal, Some(parent)) => current = parent,
                _ => return kind,
            }
        }
        ParagraphKind::Normal
    }
}
