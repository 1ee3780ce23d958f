//! Style enrichment.
//!
//! A fixed sequence of independent [`StylePass`]es walks the fragment tree and
//! writes `style` (and a few `class`/`alt`) attributes. Every pass dispatches
//! on [`ElementRole`] and is deterministic: running the enricher twice gives
//! the same serialization as running it once.
//!
//! Most passes overwrite the `style` attribute outright. The image pass is the
//! exception: it appends only the declarations that are missing, so the
//! transcoder's own style survives.

use strum_macros::{Display, IntoStaticStr};
use word2html_dom::{ElementRole, HtmlTree, ListKind, NodeId, QuoteVariant};

use crate::transcode::IMAGE_STYLE;

/// Class added to every table.
pub const TABLE_CLASS: &str = "docx-table";

/// Alt text given to images that have none.
pub const DEFAULT_IMAGE_ALT: &str = "Document image";

const LIST_MARGINS: &str = "margin-top: 0.5em; margin-bottom: 0.5em; padding-left: 2em";
const TABLE_STYLE: &str = "border-collapse: collapse; width: 100%; margin: 1em 0";
const CELL_STYLE: &str = "border: 1px solid #ddd; padding: 8px; vertical-align: top";
const HEADER_CELL_STYLE: &str = "border: 1px solid #ddd; padding: 8px; vertical-align: top; \
                                 background-color: #f2f2f2; font-weight: bold; text-align: left";
const STRIPED_ROW_STYLE: &str = "background-color: #f9f9f9";
const PARAGRAPH_STYLE: &str = "margin: 0 0 1em 0; line-height: 1.6";
const LIST_ITEM_STYLE: &str = "margin-bottom: 0.25em; line-height: 1.6";
const LINE_BREAK_STYLE: &str = "line-height: 1.6";
const QUOTE_STYLE: &str = "margin: 1em 2em; padding: 0.5em 1em; border-left: 4px solid #ccc; \
                           color: #555; font-style: italic";
const INTENSE_QUOTE_STYLE: &str = "margin: 1em 2em; padding: 0.5em 1em; \
                                   border-left: 4px solid #4472c4; background-color: #f0f4fa; \
                                   color: #1f3864; font-style: italic; font-weight: bold";

/// [CSS Lists § 3.1 `list-style-type`](https://www.w3.org/TR/css-lists-3/#text-markers)
///
/// Marker styles cycled by nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ListStyleType {
    /// `disc`
    Disc,
    /// `circle`
    Circle,
    /// `square`
    Square,
    /// `decimal`
    Decimal,
    /// `lower-alpha`
    LowerAlpha,
    /// `lower-roman`
    LowerRoman,
}

impl ListStyleType {
    /// Marker style for a list of `kind` at 1-based `depth`, cycling every
    /// three levels.
    #[must_use]
    pub const fn for_list(kind: ListKind, depth: usize) -> Self {
        let step = depth.saturating_sub(1) % 3;
        match (kind, step) {
            (ListKind::Unordered, 0) => Self::Disc,
            (ListKind::Unordered, 1) => Self::Circle,
            (ListKind::Unordered, _) => Self::Square,
            (ListKind::Ordered, 0) => Self::Decimal,
            (ListKind::Ordered, 1) => Self::LowerAlpha,
            (ListKind::Ordered, _) => Self::LowerRoman,
        }
    }
}

/// One independent enrichment rule.
pub trait StylePass {
    /// Human-readable name (for diagnostics).
    fn name(&self) -> &'static str;

    /// Apply the rule to every matching element of `tree`.
    fn apply(&self, tree: &mut HtmlTree);
}

/// `list-style-type` by kind and depth, plus fixed margins.
pub struct ListStylePass;

impl StylePass for ListStylePass {
    fn name(&self) -> &'static str {
        "lists"
    }

    fn apply(&self, tree: &mut HtmlTree) {
        for (id, kind, depth) in list_depths(tree) {
            let marker = ListStyleType::for_list(kind, depth);
            set_attr(
                tree,
                id,
                "style",
                &format!("list-style-type: {marker}; {LIST_MARGINS}"),
            );
        }
    }
}

/// Table class, borders, header shading and zebra striping.
pub struct TableStylePass;

impl StylePass for TableStylePass {
    fn name(&self) -> &'static str {
        "tables"
    }

    fn apply(&self, tree: &mut HtmlTree) {
        for table in tree.elements_where(|role| role == ElementRole::Table) {
            add_class(tree, table, TABLE_CLASS);
            set_attr(tree, table, "style", TABLE_STYLE);

            let body_rows: Vec<NodeId> = own_rows(tree, table)
                .into_iter()
                .filter(|&row| has_body_cell(tree, row))
                .collect();
            for (index, row) in body_rows.into_iter().enumerate() {
                if index % 2 == 1 {
                    set_attr(tree, row, "style", STRIPED_ROW_STYLE);
                }
            }
        }

        for cell in tree.elements_where(ElementRole::is_cell) {
            let style = if tree.role(cell) == Some(ElementRole::HeaderCell) {
                HEADER_CELL_STYLE
            } else {
                CELL_STYLE
            };
            set_attr(tree, cell, "style", style);
        }
    }
}

/// Margins and line height for paragraphs, list items and line breaks.
pub struct TextBlockStylePass;

impl StylePass for TextBlockStylePass {
    fn name(&self) -> &'static str {
        "text blocks"
    }

    fn apply(&self, tree: &mut HtmlTree) {
        let blocks: Vec<(NodeId, &str)> = tree
            .iter_all()
            .filter_map(|id| match tree.role(id)? {
                ElementRole::Paragraph => Some((id, PARAGRAPH_STYLE)),
                ElementRole::ListItem => Some((id, LIST_ITEM_STYLE)),
                ElementRole::LineBreak => Some((id, LINE_BREAK_STYLE)),
                _ => None,
            })
            .collect();
        for (id, style) in blocks {
            set_attr(tree, id, "style", style);
        }
    }
}

/// Distinct fixed styles for plain and intense quotes.
pub struct BlockquoteStylePass;

impl StylePass for BlockquoteStylePass {
    fn name(&self) -> &'static str {
        "blockquotes"
    }

    fn apply(&self, tree: &mut HtmlTree) {
        let quotes: Vec<(NodeId, QuoteVariant)> = tree
            .iter_all()
            .filter_map(|id| match tree.role(id)? {
                ElementRole::Blockquote(variant) => Some((id, variant)),
                _ => None,
            })
            .collect();
        for (id, variant) in quotes {
            let style = match variant {
                QuoteVariant::Plain => QUOTE_STYLE,
                QuoteVariant::Intense => INTENSE_QUOTE_STYLE,
            };
            set_attr(tree, id, "style", style);
        }
    }
}

/// Default alt text and responsive sizing for images.
pub struct ImageStylePass;

impl StylePass for ImageStylePass {
    fn name(&self) -> &'static str {
        "images"
    }

    fn apply(&self, tree: &mut HtmlTree) {
        for img in tree.elements_where(|role| role == ElementRole::Image) {
            let Some(element) = tree.as_element_mut(img) else {
                continue;
            };
            if element.attrs.get("alt").is_none_or(|alt| alt.trim().is_empty()) {
                element.attrs.set("alt", DEFAULT_IMAGE_ALT);
            }
            let style = append_declarations(element.attrs.get("style").unwrap_or(""), IMAGE_STYLE);
            element.attrs.set("style", &style);
        }
    }
}

/// Runs the enrichment passes in order.
pub struct Enricher {
    passes: Vec<Box<dyn StylePass>>,
}

impl Enricher {
    /// The standard pass sequence: lists, tables, text blocks, blockquotes,
    /// images.
    #[must_use]
    pub fn new() -> Self {
        Self {
            passes: vec![
                Box::new(ListStylePass),
                Box::new(TableStylePass),
                Box::new(TextBlockStylePass),
                Box::new(BlockquoteStylePass),
                Box::new(ImageStylePass),
            ],
        }
    }

    /// An enricher running exactly `passes`.
    #[must_use]
    pub fn with_passes(passes: Vec<Box<dyn StylePass>>) -> Self {
        Self { passes }
    }

    /// Names of the configured passes, in order.
    pub fn pass_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.passes.iter().map(|pass| pass.name())
    }

    /// Apply every pass to `tree`.
    pub fn enrich(&self, tree: &mut HtmlTree) {
        for pass in &self.passes {
            pass.apply(tree);
        }
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply the standard enrichment passes to `tree`.
pub fn enrich(tree: &mut HtmlTree) {
    Enricher::new().enrich(tree);
}

/// Append to `style` every declaration of `declarations` whose property is
/// not already set. Both are `;`-separated CSS declaration lists.
#[must_use]
pub fn append_declarations(style: &str, declarations: &str) -> String {
    let mut parts: Vec<String> = split_declarations(style).map(str::to_string).collect();
    let mut present: Vec<String> = parts.iter().filter_map(|d| property_name(d)).collect();

    for declaration in split_declarations(declarations) {
        let Some(property) = property_name(declaration) else {
            continue;
        };
        if !present.contains(&property) {
            parts.push(declaration.to_string());
            present.push(property);
        }
    }
    parts.join("; ")
}

fn split_declarations(style: &str) -> impl Iterator<Item = &str> {
    style.split(';').map(str::trim).filter(|d| !d.is_empty())
}

fn property_name(declaration: &str) -> Option<String> {
    let (property, _) = declaration.split_once(':')?;
    Some(property.trim().to_ascii_lowercase())
}

fn set_attr(tree: &mut HtmlTree, id: NodeId, name: &str, value: &str) {
    if let Some(element) = tree.as_element_mut(id) {
        element.attrs.set(name, value);
    }
}

fn add_class(tree: &mut HtmlTree, id: NodeId, class: &str) {
    let Some(element) = tree.as_element_mut(id) else {
        return;
    };
    if element.classes().any(|c| c == class) {
        return;
    }
    let classes = match element.attrs.get("class").map(str::trim) {
        Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
        _ => class.to_string(),
    };
    element.attrs.set("class", &classes);
}

/// Every list container with its kind and 1-based nesting depth, counting
/// only list ancestors.
fn list_depths(tree: &HtmlTree) -> Vec<(NodeId, ListKind, usize)> {
    let mut out = Vec::new();
    let mut stack = vec![(tree.root(), 0_usize)];
    while let Some((id, depth)) = stack.pop() {
        let depth = match tree.role(id) {
            Some(ElementRole::List(kind)) => {
                out.push((id, kind, depth + 1));
                depth + 1
            }
            _ => depth,
        };
        stack.extend(tree.children(id).iter().rev().map(|&child| (child, depth)));
    }
    out
}

/// Rows of `table` itself, in order, skipping rows of nested tables.
fn own_rows(tree: &HtmlTree, table: NodeId) -> Vec<NodeId> {
    let mut rows = Vec::new();
    let mut stack: Vec<NodeId> = tree.children(table).iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        match tree.role(id) {
            Some(ElementRole::TableRow) => rows.push(id),
            Some(ElementRole::Table) => {}
            _ => stack.extend(tree.children(id).iter().rev().copied()),
        }
    }
    rows
}

fn has_body_cell(tree: &HtmlTree, row: NodeId) -> bool {
    tree.children(row)
        .iter()
        .any(|&cell| tree.role(cell) == Some(ElementRole::TableCell))
}
