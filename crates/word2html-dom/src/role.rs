//! Element roles.
//!
//! Every element is classified exactly once, when it is created, into the
//! closed set of roles the converter cares about. Later stages dispatch on
//! [`ElementRole`] instead of re-inspecting tag names and class strings.

use strum_macros::{Display, IntoStaticStr};

use crate::AttributesMap;

/// Class prefix the extractor uses for flat bulleted list items.
pub const BULLET_CLASS: &str = "list-bullet";

/// Class prefix the extractor uses for flat numbered list items.
pub const NUMBER_CLASS: &str = "list-number";

/// Ordered (`<ol>`) or unordered (`<ul>`) list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum ListKind {
    /// Bulleted list.
    #[strum(serialize = "ul")]
    Unordered,
    /// Numbered list.
    #[strum(serialize = "ol")]
    Ordered,
}

impl ListKind {
    /// Tag name of the list container for this kind.
    #[must_use]
    pub fn tag_name(self) -> &'static str {
        self.into()
    }
}

/// Nesting level and kind of a flat list item, as encoded in its class.
///
/// `list-bullet` is level 1, `list-bullet-2` level 2 and so on. A suffix that
/// is not a positive integer is ignored and the item falls back to level 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListMarker {
    /// Nesting level, 1-based.
    pub level: u32,
    /// Ordered or unordered.
    pub kind: ListKind,
}

impl ListMarker {
    /// Create a marker, clamping the level to at least 1.
    #[must_use]
    pub fn new(level: u32, kind: ListKind) -> Self {
        Self {
            level: level.max(1),
            kind,
        }
    }

    /// Find the first recognized list class in a space-separated class list.
    #[must_use]
    pub fn from_class_list(classes: &str) -> Option<Self> {
        classes.split_ascii_whitespace().find_map(Self::from_class)
    }

    /// Parse a single class token such as `list-number-3`.
    #[must_use]
    pub fn from_class(class: &str) -> Option<Self> {
        let (kind, suffix) = if let Some(rest) = class.strip_prefix(BULLET_CLASS) {
            (ListKind::Unordered, rest)
        } else if let Some(rest) = class.strip_prefix(NUMBER_CLASS) {
            (ListKind::Ordered, rest)
        } else {
            return None;
        };

        if suffix.is_empty() {
            return Some(Self::new(1, kind));
        }
        let level = suffix
            .strip_prefix('-')?
            .parse::<u32>()
            .ok()
            .filter(|&n| n >= 1)
            .unwrap_or(1);
        Some(Self::new(level, kind))
    }

    /// Class token encoding this marker (inverse of [`ListMarker::from_class`]).
    #[must_use]
    pub fn class_name(self) -> String {
        let prefix = match self.kind {
            ListKind::Unordered => BULLET_CLASS,
            ListKind::Ordered => NUMBER_CLASS,
        };
        if self.level <= 1 {
            prefix.to_string()
        } else {
            format!("{prefix}-{}", self.level)
        }
    }
}

/// Blockquote flavours produced from Word's quote paragraph styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteVariant {
    /// Word's "Quote" style.
    Plain,
    /// Word's "Intense Quote" style (`class="intense"`).
    Intense,
}

/// The role an element plays in the converted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ElementRole {
    /// `<h1>`..`<h6>` with its level.
    Heading(u8),
    /// `<p>`.
    Paragraph,
    /// A list item still in flat form, carrying its level/kind marker.
    FlatListItem(ListMarker),
    /// `<ul>` or `<ol>`.
    List(ListKind),
    /// `<li>` inside a rebuilt list.
    ListItem,
    /// `<table>`.
    Table,
    /// `<tr>`.
    TableRow,
    /// `<td>`.
    TableCell,
    /// `<th>`.
    HeaderCell,
    /// `<img>`.
    Image,
    /// `<br>`.
    LineBreak,
    /// `<blockquote>`.
    Blockquote(QuoteVariant),
    /// Anything else (inline formatting, links, containers).
    Generic,
}

impl ElementRole {
    /// Classify an element from its tag name and attributes.
    ///
    /// A recognized list class wins over the tag name, so both
    /// `<li class="list-bullet-2">` and `<p class="list-number">` become flat
    /// list items.
    #[must_use]
    pub fn classify(tag_name: &str, attrs: &AttributesMap) -> Self {
        let classes = attrs.get("class").unwrap_or("");
        if let Some(marker) = ListMarker::from_class_list(classes) {
            return Self::FlatListItem(marker);
        }

        match tag_name.to_ascii_lowercase().as_str() {
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "p" => Self::Paragraph,
            "ul" => Self::List(ListKind::Unordered),
            "ol" => Self::List(ListKind::Ordered),
            "li" => Self::ListItem,
            "table" => Self::Table,
            "tr" => Self::TableRow,
            "td" => Self::TableCell,
            "th" => Self::HeaderCell,
            "img" => Self::Image,
            "br" => Self::LineBreak,
            "blockquote" => {
                if classes.split_ascii_whitespace().any(|c| c == "intense") {
                    Self::Blockquote(QuoteVariant::Intense)
                } else {
                    Self::Blockquote(QuoteVariant::Plain)
                }
            }
            _ => Self::Generic,
        }
    }

    /// Whether this is a list container (`<ul>`/`<ol>`).
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Whether this is a table cell of either kind.
    #[must_use]
    pub const fn is_cell(self) -> bool {
        matches!(self, Self::TableCell | Self::HeaderCell)
    }
}
