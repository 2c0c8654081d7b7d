//! Outline cascade
//!
//! Resolves the `outline` shorthand for every element per
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/).
//! This is how a page would actually render the overlay's stylesheet: which
//! layer wins on an element hit by several selectors, and whether the panel
//! suppression rule keeps the panel itself clean.

use std::collections::HashMap;

use strata_common::warning::warn_once;
use strata_dom::{DomTree, NodeId};

use crate::color::ColorValue;
use crate::selector::Specificity;
use crate::stylesheet::Stylesheet;

/// [CSS UI Level 4 § 3.1 outline](https://www.w3.org/TR/css-ui-4/#outline)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineValue {
    /// `outline-style: none`, no outline is drawn.
    None,
    /// A visible outline.
    Line {
        /// `outline-width` as written (`medium` when omitted).
        width: String,
        /// `outline-style` keyword.
        style: String,
        /// `outline-color` (`currentcolor` resolves to black here).
        color: ColorValue,
    },
}

impl OutlineValue {
    /// Color of a visible outline.
    #[must_use]
    pub const fn color(&self) -> Option<ColorValue> {
        match self {
            Self::None => None,
            Self::Line { color, .. } => Some(*color),
        }
    }

    /// [§ 3.1](https://www.w3.org/TR/css-ui-4/#outline)
    ///
    /// "outline = [ <'outline-color'> || <'outline-style'> || <'outline-width'> ]"
    ///
    /// Returns None when the value is invalid, so the declaration is ignored.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        const STYLES: &[&str] = &[
            "none", "auto", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset",
            "outset",
        ];
        let mut width = None;
        let mut style = None;
        let mut color = None;

        for token in value.split_ascii_whitespace() {
            let lower = token.to_ascii_lowercase();
            if STYLES.contains(&lower.as_str()) && style.is_none() {
                style = Some(lower);
            } else if is_line_width(&lower) && width.is_none() {
                width = Some(lower);
            } else if color.is_none() {
                color = Some(if lower == "currentcolor" {
                    ColorValue::BLACK
                } else {
                    ColorValue::parse(token)?
                });
            } else {
                return None;
            }
        }

        // "initial: none" for outline-style
        match style {
            None => Some(Self::None),
            Some(s) if s == "none" => Some(Self::None),
            Some(style) => Some(Self::Line {
                width: width.unwrap_or_else(|| "medium".to_string()),
                style,
                color: color.unwrap_or(ColorValue::BLACK),
            }),
        }
    }
}

/// `<line-width> = <length [0,∞]> | thin | medium | thick`
fn is_line_width(token: &str) -> bool {
    if matches!(token, "thin" | "medium" | "thick" | "0") {
        return true;
    }
    ["px", "em", "rem"].iter().any(|unit| {
        token
            .strip_suffix(unit)
            .is_some_and(|n| n.parse::<f64>().is_ok_and(|v| v >= 0.0))
    })
}

/// One declared `outline` value competing for an element.
#[derive(Debug)]
struct Candidate<'a> {
    important: bool,
    specificity: Specificity,
    order: (usize, usize),
    value: &'a OutlineValue,
}

/// [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
///
/// Compute the cascaded `outline` for every connected element that has at
/// least one valid `outline` declaration. Precedence: importance, then
/// specificity, then order of appearance.
#[must_use]
pub fn resolve_outlines(tree: &DomTree, stylesheet: &Stylesheet) -> HashMap<NodeId, OutlineValue> {
    // Parse every outline value once; invalid declarations are ignored.
    let parsed: Vec<Vec<(usize, bool, OutlineValue)>> = stylesheet
        .rules
        .iter()
        .map(|rule| {
            rule.declarations
                .iter()
                .enumerate()
                .filter(|(_, decl)| decl.name == "outline")
                .filter_map(|(index, decl)| {
                    let value = OutlineValue::parse(&decl.value);
                    if value.is_none() {
                        warn_once(
                            "CSS",
                            &format!(
                                "ignoring invalid outline '{}' on '{}'",
                                decl.value, rule.selector_text
                            ),
                        );
                    }
                    value.map(|v| (index, decl.important, v))
                })
                .collect()
        })
        .collect();

    let mut outlines = HashMap::new();
    for node in tree.descendants(tree.root()) {
        if tree.as_element(node).is_none() {
            continue;
        }
        let winner = stylesheet
            .rules
            .iter()
            .zip(&parsed)
            .enumerate()
            .filter_map(|(rule_index, (rule, values))| {
                // "the specificity of the most specific selector that matches"
                let specificity = rule
                    .selectors
                    .iter()
                    .filter(|s| s.matches_in_tree(tree, node))
                    .map(|s| s.specificity)
                    .max()?;
                Some(values.iter().map(move |(decl_index, important, value)| Candidate {
                    important: *important,
                    specificity,
                    order: (rule_index, *decl_index),
                    value,
                }))
            })
            .flatten()
            .max_by_key(|c| (c.important, c.specificity, c.order));

        if let Some(candidate) = winner {
            let _ = outlines.insert(node, candidate.value.clone());
        }
    }
    outlines
}
