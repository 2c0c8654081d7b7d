//! Tests for the page host and its style sink.

use strata_core::StyleSink;
use strata_dom::{DomTree, ElementData, NodeId};
use strata_page::Page;

#[test]
fn test_nested_fixture_shape() {
    let page = Page::with_nested_divs(3, 2);
    let tree = page.tree();
    let body = tree.body().unwrap();
    let columns: Vec<NodeId> = tree.element_children(body).collect();
    assert_eq!(columns.len(), 2);
    assert_eq!(tree.attribute(columns[1], "id"), Some("column-2"));

    let mut depth = 0;
    let mut node = Some(columns[0]);
    while let Some(current) = node {
        depth += 1;
        assert_eq!(tree.attribute(current, "class"), Some(format!("level-{depth}").as_str()));
        node = tree.element_children(current).next();
    }
    assert_eq!(depth, 3);
}

#[test]
fn test_style_sink_creates_element_once() {
    let mut page = Page::new();
    page.style_sink("overlay").apply_stylesheet("a { outline: none; }");
    page.style_sink("overlay").apply_stylesheet("b { outline: none; }");

    let tree = page.tree();
    let styles: Vec<NodeId> = tree
        .descendants(tree.root())
        .filter(|&n| tree.as_element(n).is_some_and(|e| e.tag_name == "style"))
        .collect();
    assert_eq!(styles.len(), 1);
    assert_eq!(tree.parent(styles[0]), tree.head());
    assert_eq!(page.style_text("overlay").as_deref(), Some("b { outline: none; }"));
}

#[test]
fn test_style_sink_empty_text_clears_element() {
    let mut page = Page::new();
    page.style_sink("overlay").apply_stylesheet("a { outline: none; }");
    page.style_sink("overlay").apply_stylesheet("");
    assert_eq!(page.style_text("overlay").as_deref(), Some(""));
}

#[test]
fn test_style_sink_without_head_uses_document_element() {
    let mut tree = DomTree::new();
    let html = tree.create_element(ElementData::new("html"));
    tree.append_child(tree.root(), html);
    let mut page = Page::from_tree(tree);

    page.style_sink("overlay").apply_stylesheet("a { outline: none; }");

    let style = page.tree().get_element_by_id("overlay").unwrap();
    assert_eq!(page.tree().parent(style), Some(html));
}

#[test]
fn test_missing_style_element_has_no_text() {
    assert_eq!(Page::new().style_text("overlay"), None);
}

#[test]
fn test_resolved_outlines_read_every_style_element() {
    let mut page = Page::with_nested_divs(1, 1);
    let column = page.tree().get_element_by_id("column-1").unwrap();
    page.style_sink("first").apply_stylesheet("div { outline: 1px solid red; }");
    page.style_sink("second").apply_stylesheet("#column-1 { outline: none; }");

    let outlines = page.resolved_outlines();
    assert_eq!(outlines.get(&column), Some(&strata_css::OutlineValue::None));
}
