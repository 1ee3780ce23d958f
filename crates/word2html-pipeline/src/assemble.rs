//! Document assembly.
//!
//! Wraps the enriched fragment in an optional font-override container,
//! serializes it, and embeds it into a fixed standalone HTML skeleton. Pure:
//! no I/O and no failure modes.

use word2html_dom::{AttributesMap, HtmlTree, NodeId, escape_text, serialize_children};

use crate::ConversionOptions;
use crate::stylesheet::DOCUMENT_CSS;

/// Class of the font-override wrapper.
pub const CONTENT_CLASS: &str = "docx-content";

/// The two serialized forms of a converted document.
///
/// The standalone document always contains the body fragment verbatim inside
/// its `<body>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    body_fragment_html: String,
    standalone_document_html: String,
}

impl ConversionResult {
    /// The enriched fragment, suitable for embedding in another page.
    #[must_use]
    pub fn body_fragment_html(&self) -> &str {
        &self.body_fragment_html
    }

    /// A complete HTML document with an embedded stylesheet.
    #[must_use]
    pub fn standalone_document_html(&self) -> &str {
        &self.standalone_document_html
    }

    /// The body fragment with HTML metacharacters escaped, for display as
    /// source code.
    #[must_use]
    pub fn escaped_fragment(&self) -> String {
        escape_source(&self.body_fragment_html)
    }

    /// Consume into `(body_fragment_html, standalone_document_html)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.body_fragment_html, self.standalone_document_html)
    }
}

/// Inline style of the font-override wrapper, or `None` when neither font
/// option is set.
///
/// Non-empty declarations are joined by `; `, for example
/// `font-family: Georgia, serif; font-size: 16px`.
#[must_use]
pub fn font_override_style(options: &ConversionOptions) -> Option<String> {
    let declarations: Vec<String> = [
        ("font-family", options.font_family.trim()),
        ("font-size", options.font_size.trim()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(property, value)| format!("{property}: {value}"))
    .collect();

    if declarations.is_empty() {
        None
    } else {
        Some(declarations.join("; "))
    }
}

/// Wrap all top-level content of `tree` in a font-override `<div>` when the
/// options ask for one. Returns the wrapper, if created.
pub fn apply_font_override(tree: &mut HtmlTree, options: &ConversionOptions) -> Option<NodeId> {
    let style = font_override_style(options)?;
    let attrs: AttributesMap = [("class", CONTENT_CLASS), ("style", style.as_str())]
        .into_iter()
        .collect();
    let wrapper = tree.create_element("div", attrs);
    tree.move_children(NodeId::ROOT, wrapper);
    tree.append_child(NodeId::ROOT, wrapper);
    Some(wrapper)
}

/// Assemble the final fragment and standalone document.
///
/// Mutates `tree` only by inserting the font-override wrapper.
pub fn assemble(tree: &mut HtmlTree, options: &ConversionOptions) -> ConversionResult {
    let _ = apply_font_override(tree, options);
    let body_fragment_html = serialize_children(tree, NodeId::ROOT);
    let standalone_document_html = standalone_document(&body_fragment_html, options.effective_title());
    ConversionResult {
        body_fragment_html,
        standalone_document_html,
    }
}

/// Embed `body` into the standalone skeleton.
#[must_use]
pub fn standalone_document(body: &str, title: &str) -> String {
    let title = escape_text(title);
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n\
         <style>{DOCUMENT_CSS}</style>\n\
         </head>\n\
         <body>\n\
         {body}\n\
         </body>\n\
         </html>\n"
    )
}

/// Escape `&`, `<`, `>`, `"` and `'` for showing markup as text.
#[must_use]
pub fn escape_source(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    for c in html.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
