//! WordprocessingML body to flat HTML.
//!
//! The reader maps block content to the flat fragment the pipeline expects:
//!
//! - `w:p` becomes `<h1>`..`<h6>`, `<blockquote>`, `<p>`, or a flat list item
//!   `<li class="list-bullet[-N]">` / `<li class="list-number[-N]">`. List
//!   items are never nested here.
//! - `w:tbl` becomes `<table>` with `<tr>` and `<td>`/`<th>` cells.
//! - Runs become text wrapped in `<strong>`, `<em>`, `<u>`, `<s>`, `<sup>`,
//!   `<sub>`; adjacent runs with identical formatting share one wrapper.
//! - Drawings become `<img>` elements whose attributes come from the image
//!   callback.
//!
//! Anything else is skipped with a warning. Empty paragraphs are dropped.

use std::collections::HashMap;

use word2html_common::ImageAsset;
use word2html_common::warning::warn_once;
use word2html_dom::{AttributesMap, HtmlTree, ListKind, ListMarker, NodeId};
use word2html_pipeline::ImageSource;

use crate::numbering::{Numbering, paragraph_numbering};
use crate::package::DocxPackage;
use crate::relationships::Relationships;
use crate::styles::{ParagraphKind, Styles};
use crate::xml::{XmlElement, toggle};

/// Block-level elements skipped without a warning.
const IGNORED_BLOCKS: &[&str] = &[
    "sectPr",
    "bookmarkStart",
    "bookmarkEnd",
    "proofErr",
    "permStart",
    "permEnd",
    "commentRangeStart",
    "commentRangeEnd",
    "tblPr",
    "tblGrid",
    "trPr",
    "tcPr",
];

/// Paragraph-level elements skipped without a warning.
const IGNORED_INLINE: &[&str] = &[
    "pPr",
    "bookmarkStart",
    "bookmarkEnd",
    "proofErr",
    "del",
    "moveFrom",
    "commentRangeStart",
    "commentRangeEnd",
    "permStart",
    "permEnd",
];

/// Run-level elements skipped without a warning.
const IGNORED_RUN: &[&str] = &[
    "rPr",
    "lastRenderedPageBreak",
    "fldChar",
    "instrText",
    "delText",
    "commentReference",
    "footnoteReference",
    "endnoteReference",
    "sym",
    "softHyphen",
    "annotationRef",
];

/// Character formatting of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct RunFormat {
    bold: bool,
    italic: bool,
    underline: bool,
    strike: bool,
    superscript: bool,
    subscript: bool,
}

impl RunFormat {
    fn from_properties(rpr: Option<&XmlElement>) -> Self {
        let vertical = rpr.and_then(|p| p.child_val("vertAlign"));
        Self {
            bold: toggle(rpr, "b"),
            italic: toggle(rpr, "i"),
            underline: toggle(rpr, "u"),
            strike: toggle(rpr, "strike") || toggle(rpr, "dstrike"),
            superscript: vertical == Some("superscript"),
            subscript: vertical == Some("subscript"),
        }
    }

    /// Wrapper tags, outermost first.
    fn tags(self) -> impl Iterator<Item = &'static str> {
        [
            (self.bold, "strong"),
            (self.italic, "em"),
            (self.underline, "u"),
            (self.strike, "s"),
            (self.superscript, "sup"),
            (self.subscript, "sub"),
        ]
        .into_iter()
        .filter_map(|(on, tag)| on.then_some(tag))
    }

    fn is_plain(self) -> bool {
        self == Self::default()
    }
}

/// The last formatted run appended to a container, for merging.
#[derive(Debug, Clone, Copy)]
struct OpenRun {
    format: RunFormat,
    outer: NodeId,
    inner: NodeId,
}

/// Builds the flat HTML fragment for one document body.
pub struct DocumentReader<'a> {
    tree: HtmlTree,
    styles: &'a Styles,
    numbering: &'a Numbering,
    relationships: &'a Relationships,
    package: &'a mut DocxPackage,
    on_image: &'a mut dyn FnMut(ImageAsset) -> ImageSource,
    warnings: Vec<String>,
    open_run: Option<OpenRun>,
}

impl<'a> DocumentReader<'a> {
    /// Create a reader over the resolved package metadata.
    #[must_use]
    pub fn new(
        styles: &'a Styles,
        numbering: &'a Numbering,
        relationships: &'a Relationships,
        package: &'a mut DocxPackage,
        on_image: &'a mut dyn FnMut(ImageAsset) -> ImageSource,
    ) -> Self {
        Self {
            tree: HtmlTree::new(),
            styles,
            numbering,
            relationships,
            package,
            on_image,
            warnings: Vec::new(),
            open_run: None,
        }
    }

    /// Record a non-fatal problem once.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.warnings.contains(&message) {
            warn_once("docx", &message);
            self.warnings.push(message);
        }
    }

    /// Read the block content of `w:body` into the fragment root.
    pub fn read_body(&mut self, body: &XmlElement) {
        self.read_blocks(body, NodeId::ROOT);
    }

    /// The finished fragment and the collected warnings.
    #[must_use]
    pub fn finish(self) -> (HtmlTree, Vec<String>) {
        (self.tree, self.warnings)
    }

    fn read_blocks(&mut self, container: &XmlElement, parent: NodeId) {
        for block in container.elements() {
            match block.name.as_str() {
                "p" => self.read_paragraph(block, parent),
                "tbl" => self.read_table(block, parent),
                "sdt" => {
                    if let Some(content) = block.child("sdtContent") {
                        self.read_blocks(content, parent);
                    }
                }
                "customXml" | "ins" | "moveTo" => self.read_blocks(block, parent),
                name if IGNORED_BLOCKS.contains(&name) => {}
                name => self.warn(format!("unsupported element: w:{name}")),
            }
        }
    }

    fn read_paragraph(&mut self, p: &XmlElement, parent: NodeId) {
        let ppr = p.child("pPr");
        let kind = ppr
            .and_then(|pr| pr.child_val("pStyle"))
            .map_or(ParagraphKind::Normal, |id| self.styles.classify(id));
        let numbered = ppr.and_then(paragraph_numbering);

        let (tag, class) = match (kind, numbered) {
            (ParagraphKind::Heading(level), _) => (heading_tag(level), None),
            (ParagraphKind::ListBullet(level), _) => (
                "li",
                Some(ListMarker::new(level, ListKind::Unordered).class_name()),
            ),
            (ParagraphKind::ListNumber(level), _) => (
                "li",
                Some(ListMarker::new(level, ListKind::Ordered).class_name()),
            ),
            (_, Some((num_id, level))) => {
                let kind = self.numbering.kind(&num_id, level);
                let marker = ListMarker::new(level.saturating_add(1), kind);
                ("li", Some(marker.class_name()))
            }
            (ParagraphKind::Quote, None) => ("blockquote", None),
            (ParagraphKind::IntenseQuote, None) => ("blockquote", Some("intense".to_string())),
            (ParagraphKind::Normal, None) => ("p", None),
        };

        let attrs: AttributesMap = class.into_iter().map(|c| ("class", c)).collect();
        let element = self.tree.create_element(tag, attrs);
        self.open_run = None;
        self.read_inline(p, element);
        self.open_run = None;

        if self.has_content(element) {
            self.tree.append_child(parent, element);
        }
    }

    /// Whether a paragraph holds visible text or an image.
    fn has_content(&self, element: NodeId) -> bool {
        self.tree.descendants(element).any(|id| {
            self.tree.as_text(id).is_some_and(|t| !t.trim().is_empty())
                || self
                    .tree
                    .as_element(id)
                    .is_some_and(|e| e.tag_name == "img")
        })
    }

    fn read_inline(&mut self, container: &XmlElement, parent: NodeId) {
        for child in container.elements() {
            match child.name.as_str() {
                "r" => self.read_run(child, parent),
                "hyperlink" => self.read_hyperlink(child, parent),
                "ins" | "moveTo" | "smartTag" | "customXml" | "fldSimple" | "dir" | "bdo" => {
                    self.read_inline(child, parent);
                }
                "sdt" => {
                    if let Some(content) = child.child("sdtContent") {
                        self.read_inline(content, parent);
                    }
                }
                name if IGNORED_INLINE.contains(&name) => {}
                name => self.warn(format!("unsupported element: w:{name}")),
            }
        }
    }

    fn read_hyperlink(&mut self, link: &XmlElement, parent: NodeId) {
        let href = link
            .attr("id")
            .and_then(|id| self.relationships.get(id))
            .map(|rel| rel.target.clone())
            .or_else(|| link.attr("anchor").map(|anchor| format!("#{anchor}")));

        let Some(href) = href else {
            self.read_inline(link, parent);
            return;
        };
        let attrs: AttributesMap = [("href", href)].into_iter().collect();
        let a = self.tree.create_element("a", attrs);
        self.tree.append_child(parent, a);
        self.open_run = None;
        self.read_inline(link, a);
        self.open_run = None;
    }

    fn read_run(&mut self, run: &XmlElement, parent: NodeId) {
        let format = RunFormat::from_properties(run.child("rPr"));
        let target = self.run_target(format, parent);

        for child in run.elements() {
            match child.name.as_str() {
                "t" => self.append_text(target, &child.text()),
                "tab" | "ptab" => self.append_text(target, "\t"),
                "noBreakHyphen" => self.append_text(target, "-"),
                "br" | "cr" => {
                    if child.attr("type").is_none_or(|t| t == "textWrapping") {
                        let br = self.tree.create_element("br", AttributesMap::new());
                        self.tree.append_child(target, br);
                    }
                }
                "drawing" => self.read_drawing(child, target),
                "pict" => self.read_vml_picture(child, target),
                "object" => self.warn("unsupported embedded object skipped"),
                name if IGNORED_RUN.contains(&name) => {}
                name => self.warn(format!("unsupported element: w:{name}")),
            }
        }
    }

    /// Where the content of a run with `format` goes: `parent` for plain
    /// runs, otherwise the innermost wrapper, reusing the previous run's
    /// wrappers when the formatting matches.
    fn run_target(&mut self, format: RunFormat, parent: NodeId) -> NodeId {
        if format.is_plain() {
            self.open_run = None;
            return parent;
        }
        let reusable = self
            .open_run
            .filter(|open| open.format == format && self.tree.last_child(parent) == Some(open.outer));
        if let Some(open) = reusable {
            return open.inner;
        }

        let mut outer = None;
        let mut inner = parent;
        for tag in format.tags() {
            let wrapper = self.tree.create_element(tag, AttributesMap::new());
            self.tree.append_child(inner, wrapper);
            let _ = outer.get_or_insert(wrapper);
            inner = wrapper;
        }
        if let Some(outer) = outer {
            self.open_run = Some(OpenRun {
                format,
                outer,
                inner,
            });
        }
        inner
    }

    fn append_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        let node = self.tree.create_text(text);
        self.tree.append_child(parent, node);
    }

    fn read_drawing(&mut self, drawing: &XmlElement, parent: NodeId) {
        let description = drawing
            .find("docPr")
            .and_then(|pr| pr.attr("descr").or_else(|| pr.attr("title")))
            .unwrap_or("")
            .to_string();
        let Some(embed) = drawing.find("blip").and_then(|blip| blip.attr("embed")) else {
            self.warn("drawing without embedded picture skipped");
            return;
        };
        self.insert_image(embed, &description, parent);
    }

    fn read_vml_picture(&mut self, pict: &XmlElement, parent: NodeId) {
        let Some(image) = pict.find("imagedata") else {
            self.warn("unsupported VML picture skipped");
            return;
        };
        let description = image.attr("title").unwrap_or("").to_string();
        if let Some(id) = image.attr("id") {
            self.insert_image(id, &description, parent);
        }
    }

    fn insert_image(&mut self, relationship_id: &str, description: &str, parent: NodeId) {
        let source = match self.image_bytes(relationship_id) {
            Ok(bytes) => (self.on_image)(ImageAsset::from_bytes(bytes)),
            Err(message) => {
                self.warn(message);
                ImageSource::failed()
            }
        };

        let mut attrs = AttributesMap::new();
        attrs.set("src", source.src);
        match source.fallback_alt {
            Some(alt) => attrs.set("alt", alt),
            None if !description.trim().is_empty() => attrs.set("alt", description.trim()),
            None => {}
        }
        if let Some(style) = source.style {
            attrs.set("style", style);
        }
        let img = self.tree.create_element("img", attrs);
        self.tree.append_child(parent, img);
    }

    fn image_bytes(&mut self, relationship_id: &str) -> Result<Vec<u8>, String> {
        let relationship = self
            .relationships
            .get(relationship_id)
            .ok_or_else(|| format!("image relationship {relationship_id} not found"))?;
        if relationship.external {
            return Err(format!("linked image {} not embedded", relationship.target));
        }
        let part = relationship.part_name();
        match self.package.read_part(&part) {
            Ok(Some(bytes)) => Ok(bytes),
            Ok(None) => Err(format!("image part {part} missing from package")),
            Err(e) => Err(format!("image part {part} unreadable: {e}")),
        }
    }

    fn read_table(&mut self, tbl: &XmlElement, parent: NodeId) {
        let table = self.tree.create_element("table", AttributesMap::new());
        self.tree.append_child(parent, table);

        // Grid column -> cell that started a vertical merge there.
        let mut merge_origins: HashMap<usize, NodeId> = HashMap::new();

        for tr in tbl.children_named("tr") {
            let tr_pr = tr.child("trPr");
            let header = toggle(tr_pr, "tblHeader");
            let row = self.tree.create_element("tr", AttributesMap::new());
            self.tree.append_child(table, row);

            let mut column = tr_pr
                .and_then(|pr| pr.child_val("gridBefore"))
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(0);

            for tc in tr.children_named("tc") {
                let tc_pr = tc.child("tcPr");
                let span = tc_pr
                    .and_then(|pr| pr.child_val("gridSpan"))
                    .and_then(|v| v.parse::<usize>().ok())
                    .filter(|&n| n >= 1)
                    .unwrap_or(1);
                let merge = tc_pr.and_then(|pr| pr.child("vMerge"));
                let start = column;
                column += span;

                match merge.map(|m| m.attr("val").unwrap_or("continue")) {
                    Some("continue") => {
                        if let Some(&origin) = merge_origins.get(&start) {
                            self.extend_rowspan(origin);
                            continue;
                        }
                    }
                    Some(_) => {}
                    None => {
                        for col in start..column {
                            let _ = merge_origins.remove(&col);
                        }
                    }
                }

                let cell = self.read_cell(tc, row, header, span);
                if merge.is_some() {
                    let _ = merge_origins.insert(start, cell);
                }
            }
        }
    }

    fn read_cell(&mut self, tc: &XmlElement, row: NodeId, header: bool, span: usize) -> NodeId {
        let mut attrs = AttributesMap::new();
        if span > 1 {
            attrs.set("colspan", span.to_string());
        }
        let cell = self
            .tree
            .create_element(if header { "th" } else { "td" }, attrs);
        self.tree.append_child(row, cell);
        self.read_blocks(tc, cell);
        cell
    }

    fn extend_rowspan(&mut self, cell: NodeId) {
        let Some(element) = self.tree.as_element_mut(cell) else {
            return;
        };
        let rows = element
            .attrs
            .get("rowspan")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);
        element.attrs.set("rowspan", (rows + 1).to_string());
    }
}

fn heading_tag(level: u8) -> &'static str {
    match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}
