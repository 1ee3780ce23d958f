//! List numbering definitions (`word/numbering.xml`).
//!
//! A paragraph references a list through `w:numPr` (`w:numId` and `w:ilvl`).
//! The `w:num` with that id points at a `w:abstractNum`, whose `w:lvl`
//! entries give the number format per level. Only the distinction between
//! bullets and everything else matters here.

use std::collections::HashMap;

use word2html_dom::ListKind;

use crate::xml::XmlElement;

/// Resolved numbering definitions.
#[derive(Debug, Clone, Default)]
pub struct Numbering {
    /// `numId` -> `abstractNumId`.
    num_to_abstract: HashMap<String, String>,
    /// `abstractNumId` -> level index -> kind.
    abstract_levels: HashMap<String, HashMap<u32, ListKind>>,
}

impl Numbering {
    /// Read definitions from the parsed `w:numbering` root element.
    #[must_use]
    pub fn from_xml(root: &XmlElement) -> Self {
        let mut numbering = Self::default();
        for node in root.elements() {
            match node.name.as_str() {
                "abstractNum" => {
                    let Some(abstract_id) = node.attr("abstractNumId") else {
                        continue;
                    };
                    let levels = node
                        .children_named("lvl")
                        .filter_map(|lvl| {
                            let index = lvl.attr("ilvl")?.parse::<u32>().ok()?;
                            let format = lvl.child_val("numFmt").unwrap_or("bullet");
                            Some((index, kind_for_format(format)))
                        })
                        .collect();
                    let _ = numbering
                        .abstract_levels
                        .insert(abstract_id.to_string(), levels);
                }
                "num" => {
                    let (Some(num_id), Some(abstract_id)) =
                        (node.attr("numId"), node.child_val("abstractNumId"))
                    else {
                        continue;
                    };
                    let _ = numbering
                        .num_to_abstract
                        .insert(num_id.to_string(), abstract_id.to_string());
                }
                _ => {}
            }
        }
        numbering
    }

    /// Kind of list for a `numId` at a 0-based level.
    ///
    /// Unknown ids and levels are treated as bulleted.
    #[must_use]
    pub fn kind(&self, num_id: &str, level: u32) -> ListKind {
        self.num_to_abstract
            .get(num_id)
            .and_then(|abstract_id| self.abstract_levels.get(abstract_id))
            .and_then(|levels| levels.get(&level))
            .copied()
            .unwrap_or(ListKind::Unordered)
    }
}

/// `w:numFmt` values: `bullet` is unordered, every numbering scheme ordered.
#[must_use]
pub fn kind_for_format(format: &str) -> ListKind {
    if format == "bullet" || format == "none" {
        ListKind::Unordered
    } else {
        ListKind::Ordered
    }
}

/// Deepest list level Word defines (`w:ilvl` runs 0..=8).
pub const MAX_LEVEL: u32 = 8;

/// List reference of a paragraph: `(numId, 0-based level)`.
///
/// `numId` 0 removes numbering and yields `None`. Levels past
/// [`MAX_LEVEL`] are clamped to it.
#[must_use]
pub fn paragraph_numbering(ppr: &XmlElement) -> Option<(String, u32)> {
    let num_pr = ppr.child("numPr")?;
    let num_id = num_pr.child_val("numId")?;
    if num_id == "0" {
        return None;
    }
    let level = num_pr
        .child_val("ilvl")
        .and_then(|v| v.parse::<u32>().ok())
        .map_or(0, |level| level.min(MAX_LEVEL));
    Some((num_id.to_string(), level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse;

    const NUMBERING: &str = r#"<w:numbering>
        <w:abstractNum w:abstractNumId="0">
            <w:lvl w:ilvl="0"><w:numFmt w:val="bullet"/></w:lvl>
            <w:lvl w:ilvl="1"><w:numFmt w:val="decimal"/></w:lvl>
        </w:abstractNum>
        <w:abstractNum w:abstractNumId="1">
            <w:lvl w:ilvl="0"><w:numFmt w:val="lowerRoman"/></w:lvl>
        </w:abstractNum>
        <w:num w:numId="5"><w:abstractNumId w:val="0"/></w:num>
        <w:num w:numId="6"><w:abstractNumId w:val="1"/></w:num>
    </w:numbering>"#;

    #[test]
    fn test_kind_by_num_and_level() {
        let numbering = Numbering::from_xml(&parse(NUMBERING).unwrap());
        assert_eq!(numbering.kind("5", 0), ListKind::Unordered);
        assert_eq!(numbering.kind("5", 1), ListKind::Ordered);
        assert_eq!(numbering.kind("6", 0), ListKind::Ordered);
        assert_eq!(numbering.kind("99", 0), ListKind::Unordered);
    }

    #[test]
    fn test_paragraph_numbering() {
        let ppr = parse(r#"<w:pPr><w:numPr><w:ilvl w:val="2"/><w:numId w:val="5"/></w:numPr></w:pPr>"#)
            .unwrap();
        assert_eq!(paragraph_numbering(&ppr), Some(("5".to_string(), 2)));

        let removed =
            parse(r#"<w:pPr><w:numPr><w:numId w:val="0"/></w:numPr></w:pPr>"#).unwrap();
        assert_eq!(paragraph_numbering(&removed), None);

        let deep = parse(
            r#"<w:pPr><w:numPr><w:ilvl w:val="4294967295"/><w:numId w:val="5"/></w:numPr></w:pPr>"#,
        )
        .unwrap();
        assert_eq!(paragraph_numbering(&deep), Some(("5".to_string(), MAX_LEVEL)));
    }
}
