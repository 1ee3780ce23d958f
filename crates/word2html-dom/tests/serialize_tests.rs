//! Tests for HTML serialization and element role classification.

use word2html_dom::{
    AttributesMap, ElementRole, HtmlTree, ListKind, ListMarker, NodeId, QuoteVariant,
    serialize_children, serialize_node,
};

fn attrs(pairs: &[(&str, &str)]) -> AttributesMap {
    pairs.iter().copied().collect()
}

#[test]
fn test_serialize_preserves_attribute_order() {
    let mut tree = HtmlTree::new();
    let img = tree.create_element(
        "img",
        attrs(&[("src", "data:x"), ("alt", "A"), ("style", "width: 1px")]),
    );
    tree.append_child(NodeId::ROOT, img);

    assert_eq!(
        serialize_children(&tree, NodeId::ROOT),
        r#"<img src="data:x" alt="A" style="width: 1px">"#
    );
}

#[test]
fn test_serialize_escapes_text_and_attributes() {
    let mut tree = HtmlTree::new();
    let a = tree.create_element("a", attrs(&[("href", "https://x.test/?a=1&b=\"2\"")]));
    let text = tree.create_text("Fish & <Chips>");
    tree.append_child(NodeId::ROOT, a);
    tree.append_child(a, text);

    assert_eq!(
        serialize_node(&tree, a),
        "<a href=\"https://x.test/?a=1&amp;b=&quot;2&quot;\">Fish &amp; &lt;Chips&gt;</a>"
    );
}

#[test]
fn test_serialize_void_elements_have_no_end_tag() {
    let mut tree = HtmlTree::new();
    let p = tree.create_element("p", AttributesMap::new());
    let one = tree.create_text("one");
    let br = tree.create_element("br", AttributesMap::new());
    let two = tree.create_text("two");
    tree.append_child(NodeId::ROOT, p);
    tree.append_child(p, one);
    tree.append_child(p, br);
    tree.append_child(p, two);

    assert_eq!(serialize_node(&tree, NodeId::ROOT), "<p>one<br>two</p>");
}

#[test]
fn test_serialize_skips_detached_nodes() {
    let mut tree = HtmlTree::new();
    let p = tree.create_element("p", AttributesMap::new());
    let orphan = tree.create_element("h1", AttributesMap::new());
    tree.append_child(NodeId::ROOT, p);

    assert_eq!(serialize_children(&tree, NodeId::ROOT), "<p></p>");
    assert_eq!(tree.role(orphan), Some(ElementRole::Heading(1)));
}

#[test]
fn test_role_classification_by_tag() {
    let empty = AttributesMap::new();
    assert_eq!(ElementRole::classify("H2", &empty), ElementRole::Heading(2));
    assert_eq!(ElementRole::classify("p", &empty), ElementRole::Paragraph);
    assert_eq!(ElementRole::classify("ol", &empty), ElementRole::List(ListKind::Ordered));
    assert_eq!(ElementRole::classify("th", &empty), ElementRole::HeaderCell);
    assert_eq!(ElementRole::classify("img", &empty), ElementRole::Image);
    assert_eq!(ElementRole::classify("strong", &empty), ElementRole::Generic);
    assert_eq!(
        ElementRole::classify("blockquote", &attrs(&[("class", "intense")])),
        ElementRole::Blockquote(QuoteVariant::Intense)
    );
    assert_eq!(
        ElementRole::classify("blockquote", &empty),
        ElementRole::Blockquote(QuoteVariant::Plain)
    );
}

#[test]
fn test_list_class_suffix_levels() {
    assert_eq!(
        ListMarker::from_class("list-bullet"),
        Some(ListMarker::new(1, ListKind::Unordered))
    );
    assert_eq!(
        ListMarker::from_class("list-bullet-2"),
        Some(ListMarker::new(2, ListKind::Unordered))
    );
    assert_eq!(
        ListMarker::from_class("list-number-3"),
        Some(ListMarker::new(3, ListKind::Ordered))
    );
    // Unrecognized suffixes fall back to level 1.
    assert_eq!(
        ListMarker::from_class("list-number-x"),
        Some(ListMarker::new(1, ListKind::Ordered))
    );
    assert_eq!(
        ListMarker::from_class("list-bullet-0"),
        Some(ListMarker::new(1, ListKind::Unordered))
    );
    assert_eq!(ListMarker::from_class("listing"), None);
}

#[test]
fn test_list_class_needs_a_separator_before_the_level() {
    assert_eq!(ListMarker::from_class("list-bulletin"), None);
    assert_eq!(ListMarker::from_class("list-numbered"), None);
    assert_eq!(
        ListMarker::from_class_list("list-bulletin list-number-2"),
        Some(ListMarker::new(2, ListKind::Ordered))
    );
}

#[test]
fn test_list_class_wins_over_tag() {
    let role = ElementRole::classify("p", &attrs(&[("class", "note list-number-2")]));
    assert_eq!(
        role,
        ElementRole::FlatListItem(ListMarker::new(2, ListKind::Ordered))
    );
}

#[test]
fn test_marker_class_name_round_trips() {
    for level in 1..=4 {
        for kind in [ListKind::Unordered, ListKind::Ordered] {
            let marker = ListMarker::new(level, kind);
            assert_eq!(ListMarker::from_class(&marker.class_name()), Some(marker));
        }
    }
}

#[test]
fn test_role_is_fixed_at_creation() {
    let mut tree = HtmlTree::new();
    let p = tree.create_element("p", AttributesMap::new());
    tree.as_element_mut(p)
        .expect("element")
        .attrs
        .set("class", "list-bullet");
    assert_eq!(tree.role(p), Some(ElementRole::Paragraph));
}
