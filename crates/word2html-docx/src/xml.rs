//! A small owned element tree over quick-xml events.
//!
//! WordprocessingML parts are small enough to hold in memory, and the reader
//! needs random access (look-ahead into `w:pPr`, `w:tcPr`, drawings), so
//! parts are loaded into [`XmlElement`] trees keyed by local name. Namespace
//! prefixes are dropped; WordprocessingML element names do not clash across
//! the namespaces we read.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

/// An element child: nested element or character data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// Nested element.
    Element(XmlElement),
    /// Character data with entities resolved.
    Text(String),
}

/// An element with its local name, attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Local name (`p` for `w:p`).
    pub name: String,
    /// Attributes as `(local name, unescaped value)`, in document order.
    pub attrs: Vec<(String, String)>,
    /// Children in document order.
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Self {
        let name = String::from_utf8_lossy(local_name(start.name().as_ref())).into_owned();
        let attrs = start
            .attributes()
            .flatten()
            .map(|attr| {
                let key = String::from_utf8_lossy(local_name(attr.key.as_ref())).into_owned();
                let raw = String::from_utf8_lossy(&attr.value).into_owned();
                let value = unescape(&raw).map_or_else(|_| raw.clone(), |v| v.into_owned());
                (key, value)
            })
            .collect();
        Self {
            name,
            attrs,
            children: Vec::new(),
        }
    }

    /// Value of the first attribute with this local name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with this local name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.elements().find(|e| e.name == name)
    }

    /// All child elements with this local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> {
        self.elements().filter(move |e| e.name == name)
    }

    /// First element with this local name anywhere below this one
    /// (depth-first, document order).
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Self> {
        for child in self.elements() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// The `val` attribute of the named child, as used by most
    /// WordprocessingML properties (`<w:pStyle w:val="Heading1"/>`).
    #[must_use]
    pub fn child_val(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|c| c.attr("val"))
    }

    /// Concatenated character data of this element and its descendants.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(t) => out.push_str(t),
                XmlNode::Element(e) => e.collect_text(out),
            }
        }
    }
}

/// ECMA-376 § 17.17.4 on/off properties: present without `val`, or with a
/// `val` other than `false`/`0`/`off`, means on.
#[must_use]
pub fn toggle(properties: Option<&XmlElement>, name: &str) -> bool {
    properties
        .and_then(|p| p.child(name))
        .is_some_and(|e| !matches!(e.attr("val"), Some("false" | "0" | "off" | "none")))
}

/// Parse an XML document into its root element.
///
/// # Errors
///
/// Returns the parser error for malformed input.
pub fn parse(xml: &str) -> Result<XmlElement, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<XmlElement> = vec![XmlElement::default()];

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(XmlElement::from_start(&e)),
            Event::Empty(e) => push_child(&mut stack, XmlNode::Element(XmlElement::from_start(&e))),
            Event::End(_) if stack.len() > 1 => {
                if let Some(done) = stack.pop() {
                    push_child(&mut stack, XmlNode::Element(done));
                }
            }
            Event::Text(e) => {
                push_text(&mut stack, &String::from_utf8_lossy(e.as_ref()));
            }
            Event::CData(e) => {
                push_text(&mut stack, &String::from_utf8_lossy(e.as_ref()));
            }
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                if let Some(resolved) = resolve_entity(&entity) {
                    push_text(&mut stack, &resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    // Unclosed elements at EOF are folded into their parents.
    while stack.len() > 1 {
        if let Some(open) = stack.pop() {
            push_child(&mut stack, XmlNode::Element(open));
        }
    }
    let document = stack.pop().unwrap_or_default();
    Ok(document
        .children
        .into_iter()
        .find_map(|child| match child {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
        .unwrap_or_default())
}

fn push_child(stack: &mut [XmlElement], node: XmlNode) {
    if let Some(top) = stack.last_mut() {
        top.children.push(node);
    }
}

/// Append text, merging with a preceding text node.
fn push_text(stack: &mut [XmlElement], text: &str) {
    let Some(top) = stack.last_mut() else {
        return;
    };
    if let Some(XmlNode::Text(existing)) = top.children.last_mut() {
        existing.push_str(text);
    } else {
        top.children.push(XmlNode::Text(text.to_string()));
    }
}

/// Extract local name from namespaced XML name (e.g., "w:p" -> "p").
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map_or(name, |i| &name[i + 1..])
}

/// Resolve XML entity references.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code).map(|c| c.to_string())
}
