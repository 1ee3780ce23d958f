//! Part relationships (`word/_rels/document.xml.rels`).

use std::collections::HashMap;

use crate::xml::XmlElement;

/// One relationship of the main document part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Target as written in the relationships part.
    pub target: String,
    /// Whether the target is outside the package (hyperlinks).
    pub external: bool,
}

impl Relationship {
    /// Package part name of an internal target, resolved against `word/`.
    ///
    /// `media/image1.png` becomes `word/media/image1.png`,
    /// `../customXml/item.xml` becomes `customXml/item.xml`, and absolute
    /// targets (`/word/media/x.png`) are taken from the package root.
    #[must_use]
    pub fn part_name(&self) -> String {
        let mut segments: Vec<&str> = Vec::new();
        let relative = match self.target.strip_prefix('/') {
            Some(absolute) => absolute,
            None => {
                segments.push("word");
                self.target.as_str()
            }
        };
        for segment in relative.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    let _ = segments.pop();
                }
                other => segments.push(other),
            }
        }
        segments.join("/")
    }
}

/// Relationship id to target map.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    by_id: HashMap<String, Relationship>,
}

impl Relationships {
    /// Read relationships from the parsed `Relationships` root element.
    #[must_use]
    pub fn from_xml(root: &XmlElement) -> Self {
        let by_id = root
            .children_named("Relationship")
            .filter_map(|rel| {
                let id = rel.attr("Id")?;
                let target = rel.attr("Target")?;
                let external = rel
                    .attr("TargetMode")
                    .is_some_and(|mode| mode.eq_ignore_ascii_case("External"));
                Some((
                    id.to_string(),
                    Relationship {
                        target: target.to_string(),
                        external,
                    },
                ))
            })
            .collect();
        Self { by_id }
    }

    /// Look up a relationship by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id)
    }

    /// Number of relationships.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether there are no relationships.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
