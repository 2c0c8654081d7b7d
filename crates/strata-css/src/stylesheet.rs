//! Flat stylesheet parsing.
//!
//! The overlay only ever reads back stylesheets made of plain style rules,
//! so this is a small block splitter rather than a full
//! [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing) implementation.

use strata_common::warning::warn_once;

use crate::selector::{ParsedSelector, parse_selector_list};

/// [§ 9.2 Declarations](https://www.w3.org/TR/css-syntax-3/#declaration)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name, ASCII-lowercased.
    pub name: String,
    /// Value text with `!important` removed and whitespace trimmed.
    pub value: String,
    /// "If the last two non-whitespace tokens are a `!` followed by an ident
    /// that is an ASCII case-insensitive match for "important", remove them
    /// and set the declaration's important flag to true."
    pub important: bool,
}

/// A style rule: selector list plus declaration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// The prelude as written.
    pub selector_text: String,
    /// Parsed selector list (never empty).
    pub selectors: Vec<ParsedSelector>,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
}

/// A parsed stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Style rules in source order.
    pub rules: Vec<Rule>,
}

/// Parse stylesheet text into rules.
///
/// Rules whose selector list does not parse are dropped, as a browser would
/// drop them. An unterminated block runs to the end of input.
#[must_use]
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    let css = strip_comments(css);
    let mut rules = Vec::new();
    let mut rest = css.as_str();

    while let Some(open) = rest.find('{') {
        let prelude = rest[..open].trim();
        let after = &rest[open + 1..];
        let (block, remainder) = after
            .find('}')
            .map_or((after, ""), |close| (&after[..close], &after[close + 1..]));
        rest = remainder;

        let Some(selectors) = parse_selector_list(prelude) else {
            warn_once("CSS", &format!("dropping rule with unsupported selector '{prelude}'"));
            continue;
        };
        rules.push(Rule {
            selector_text: prelude.to_string(),
            selectors,
            declarations: parse_declarations(block),
        });
    }

    Stylesheet { rules }
}

/// Parse the inside of a `{ ... }` block.
fn parse_declarations(block: &str) -> Vec<Declaration> {
    block
        .split(';')
        .filter_map(|item| {
            let (name, value) = item.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let (value, important) = split_important(value.trim());
            Some(Declaration {
                name,
                value: value.to_string(),
                important,
            })
        })
        .collect()
}

fn split_important(value: &str) -> (&str, bool) {
    if let Some(bang) = value.rfind('!')
        && value[bang + 1..].trim().eq_ignore_ascii_case("important")
    {
        return (value[..bang].trim_end(), true);
    }
    (value, false)
}

/// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        rest = rest[start + 2..]
            .find("*/")
            .map_or("", |end| &rest[start + 2 + end + 2..]);
    }
    out.push_str(rest);
    out
}
