//! Integration tests for outline resolution.

use strata_css::{ColorValue, OutlineValue, parse_stylesheet, resolve_outlines};
use strata_dom::{DomTree, ElementData, NodeId};

/// `body > main > article`, plus `body > #panel > button`.
fn page() -> (DomTree, [NodeId; 4]) {
    let mut tree = DomTree::with_skeleton();
    let body = tree.body().unwrap();
    let main = tree.create_element(ElementData::new("main"));
    let article = tree.create_element(ElementData::new("article"));
    let panel = tree.create_element(ElementData::new("div").with_attr("id", "panel"));
    let button = tree.create_element(ElementData::new("button"));
    tree.append_child(body, main);
    tree.append_child(main, article);
    tree.append_child(body, panel);
    tree.append_child(panel, button);
    (tree, [main, article, panel, button])
}

#[test]
fn test_parse_stylesheet_rules_and_important() {
    let sheet = parse_stylesheet(
        "body > * { outline: 2px solid #f42525 !important; }\n#panel, #panel * { outline: none !important; }",
    );
    assert_eq!(sheet.rules.len(), 2);
    assert_eq!(sheet.rules[0].selector_text, "body > *");
    assert_eq!(sheet.rules[0].declarations[0].name, "outline");
    assert_eq!(sheet.rules[0].declarations[0].value, "2px solid #f42525");
    assert!(sheet.rules[0].declarations[0].important);
    assert_eq!(sheet.rules[1].selectors.len(), 2);
}

#[test]
fn test_parse_important_spacing_and_case() {
    let sheet = parse_stylesheet("main { outline: 1px dashed red ! IMPORTANT; color: a!b }");
    let decls = &sheet.rules[0].declarations;
    assert_eq!(decls[0].value, "1px dashed red");
    assert!(decls[0].important);
    assert_eq!(decls[1].value, "a!b");
    assert!(!decls[1].important);
}

#[test]
fn test_parse_stylesheet_drops_unsupported_rules() {
    let sheet = parse_stylesheet("a:hover { color: red } p { color: blue }");
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(sheet.rules[0].selector_text, "p");
}

#[test]
fn test_outline_parse() {
    assert_eq!(
        OutlineValue::parse("2px solid #25f48c"),
        Some(OutlineValue::Line {
            width: "2px".to_string(),
            style: "solid".to_string(),
            color: ColorValue::rgb(0x25, 0xf4, 0x8c),
        })
    );
    assert_eq!(OutlineValue::parse("none"), Some(OutlineValue::None));
    assert_eq!(OutlineValue::parse("2px #fff"), Some(OutlineValue::None));
    assert_eq!(OutlineValue::parse("2px solid not-a-color"), None);
    assert_eq!(OutlineValue::parse("solid solid"), None);
}

#[test]
fn test_layer_rule_outlines_depth() {
    let (tree, [main, article, panel, _]) = page();
    let sheet = parse_stylesheet("body > * > * { outline: 2px solid #c0f425 !important; }");
    let outlines = resolve_outlines(&tree, &sheet);

    assert!(!outlines.contains_key(&main));
    assert!(!outlines.contains_key(&panel));
    assert_eq!(
        outlines.get(&article).and_then(OutlineValue::color),
        Some(ColorValue::rgb(0xc0, 0xf4, 0x25))
    );
}

#[test]
fn test_id_suppression_beats_layer_rules() {
    let (tree, [main, _, panel, button]) = page();
    let sheet = parse_stylesheet(
        "body > * { outline: 2px solid #f42525 !important; }\n\
         body > * > * { outline: 2px solid #c0f425 !important; }\n\
         #panel, #panel * { outline: none !important; }",
    );
    let outlines = resolve_outlines(&tree, &sheet);

    assert_eq!(outlines.get(&panel), Some(&OutlineValue::None));
    assert_eq!(outlines.get(&button), Some(&OutlineValue::None));
    assert_eq!(
        outlines.get(&main).and_then(OutlineValue::color),
        Some(ColorValue::rgb(0xf4, 0x25, 0x25))
    );
}

#[test]
fn test_later_rule_wins_at_equal_specificity() {
    let (tree, [main, ..]) = page();
    let sheet = parse_stylesheet(
        "body > * { outline: 2px solid #f42525 !important; }\n\
         body > * { outline: 2px solid #2559f4 !important; }",
    );
    let outlines = resolve_outlines(&tree, &sheet);
    assert_eq!(
        outlines.get(&main).and_then(OutlineValue::color),
        Some(ColorValue::rgb(0x25, 0x59, 0xf4))
    );
}

#[test]
fn test_important_beats_specificity() {
    let (tree, [main, ..]) = page();
    let sheet = parse_stylesheet(
        "body > * { outline: 2px solid #f42525 !important; }\n\
         body > main { outline: 2px solid #2559f4; }",
    );
    let outlines = resolve_outlines(&tree, &sheet);
    assert_eq!(
        outlines.get(&main).and_then(OutlineValue::color),
        Some(ColorValue::rgb(0xf4, 0x25, 0x25))
    );
}

#[test]
fn test_invalid_color_falls_back_to_earlier_rule() {
    let (tree, [main, ..]) = page();
    let sheet = parse_stylesheet(
        "body > * { outline: 2px solid #f42525 !important; }\n\
         body > * { outline: 2px solid bogus !important; }",
    );
    let outlines = resolve_outlines(&tree, &sheet);
    assert_eq!(
        outlines.get(&main).and_then(OutlineValue::color),
        Some(ColorValue::rgb(0xf4, 0x25, 0x25))
    );
}
