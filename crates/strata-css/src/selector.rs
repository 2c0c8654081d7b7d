//! CSS Selector parsing and matching
//!
//! This module implements the subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/) that layer
//! selectors and the panel suppression rule are written in.

use strata_dom::{DomTree, ElementData, NodeId};

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    ///
    /// Examples: `div`, `body`
    Type(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    ///
    /// Examples: `.lh-layer-item`
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    ///
    /// Examples: `#layout-highlighter-panel`
    Id(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    /// "The universal selector is a single asterisk (*) and represents the
    /// qualified name of any element type."
    Universal,
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The list of simple selectors that make up this compound selector.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A selector of the form 'A B' represents an element B that is an
    /// arbitrary descendant of some ancestor element A."
    Descendant,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A selector of the form 'A > B' represents an element B that is
    /// a direct child of element A."
    Child,
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// `body > * > *` is stored as:
/// ```text
/// subject: [*]
/// combinators: [(Child, [*]), (Child, [body])]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    /// The rightmost compound selector (the subject of the selector).
    pub subject: CompoundSelector,

    /// Chain of (combinator, compound) pairs going left from the subject.
    pub combinators: Vec<(Combinator, CompoundSelector)>,
}

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
///
/// (ID selectors, class selectors, type selectors), compared in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// A parsed CSS selector ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSelector {
    /// The complex selector (compound selectors with combinators).
    pub complex: ComplexSelector,
    /// The specificity of this selector.
    pub specificity: Specificity,
}

impl ParsedSelector {
    /// Number of child combinators in the chain.
    ///
    /// For layer selectors this is the nesting depth below `body`.
    #[must_use]
    pub fn child_depth(&self) -> usize {
        self.complex
            .combinators
            .iter()
            .filter(|(c, _)| *c == Combinator::Child)
            .count()
    }

    /// [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    ///
    /// Match against an element with full DOM tree context.
    #[must_use]
    pub fn matches_in_tree(&self, tree: &DomTree, node_id: NodeId) -> bool {
        compound_matches(&self.complex.subject, tree, node_id)
            && chain_matches(&self.complex.combinators, tree, node_id)
    }
}

/// Walk the combinator chain right-to-left from `current`.
///
/// Descendant combinators backtrack: `div > p span` must try every `p`
/// ancestor, not just the nearest one.
fn chain_matches(chain: &[(Combinator, CompoundSelector)], tree: &DomTree, current: NodeId) -> bool {
    let Some(((combinator, compound), rest)) = chain.split_first() else {
        return true;
    };
    match combinator {
        Combinator::Child => tree.parent(current).is_some_and(|parent| {
            compound_matches(compound, tree, parent) && chain_matches(rest, tree, parent)
        }),
        Combinator::Descendant => tree.ancestors(current).any(|ancestor| {
            compound_matches(compound, tree, ancestor) && chain_matches(rest, tree, ancestor)
        }),
    }
}

fn compound_matches(compound: &CompoundSelector, tree: &DomTree, node_id: NodeId) -> bool {
    tree.as_element(node_id).is_some_and(|element| {
        compound
            .simple_selectors
            .iter()
            .all(|simple| simple.matches(element))
    })
}

impl SimpleSelector {
    /// Check if this simple selector matches the given element.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Type(name) => element.tag_name.eq_ignore_ascii_case(name),
            Self::Class(class_name) => element.has_class(class_name),
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Universal => true,
        }
    }
}

impl ComplexSelector {
    /// [§ 17](https://www.w3.org/TR/selectors-4/#specificity-rules)
    ///
    /// Sum of the specificity of every compound in the chain.
    #[must_use]
    pub fn calculate_specificity(&self) -> Specificity {
        std::iter::once(&self.subject)
            .chain(self.combinators.iter().map(|(_, compound)| compound))
            .flat_map(|compound| &compound.simple_selectors)
            .fold(Specificity::default(), |mut spec, simple| {
                match simple {
                    SimpleSelector::Id(_) => spec.0 += 1,
                    SimpleSelector::Class(_) => spec.1 += 1,
                    SimpleSelector::Type(_) => spec.2 += 1,
                    // "ignore the universal selector"
                    SimpleSelector::Universal => {}
                }
                spec
            })
    }
}

/// [§ 4.3.9 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

/// One lexical piece of a complex selector.
enum Piece {
    Compound(CompoundSelector),
    Combinator(Combinator),
}

/// Parse a raw selector string into a `ParsedSelector`.
///
/// [§ 4 Selector syntax](https://www.w3.org/TR/selectors-4/#syntax)
///
/// Supports type, class, ID and universal selectors, compounds such as
/// `div.item#first`, and the descendant and child combinators.
/// Returns None for anything else (selector lists, pseudo-classes,
/// sibling combinators, attribute selectors, dangling combinators).
#[must_use]
pub fn parse_selector(raw: &str) -> Option<ParsedSelector> {
    let mut pieces: Vec<Piece> = Vec::new();
    let mut chars = raw.trim().chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_ascii_whitespace() => {
                while chars.peek().is_some_and(char::is_ascii_whitespace) {
                    let _ = chars.next();
                }
                // Whitespace is a descendant combinator unless an explicit
                // combinator follows or precedes it.
                if !matches!(chars.peek(), Some('>'))
                    && matches!(pieces.last(), Some(Piece::Compound(_)))
                {
                    pieces.push(Piece::Combinator(Combinator::Descendant));
                }
            }
            '>' => {
                if !matches!(pieces.last(), Some(Piece::Compound(_))) {
                    return None;
                }
                pieces.push(Piece::Combinator(Combinator::Child));
            }
            _ => {
                let mut simple_selectors = Vec::new();
                let mut next = Some(c);
                while let Some(c) = next {
                    let simple = match c {
                        '*' => SimpleSelector::Universal,
                        '.' => SimpleSelector::Class(take_ident(&mut chars)?),
                        '#' => SimpleSelector::Id(take_ident(&mut chars)?),
                        c if is_ident_char(c) && !c.is_ascii_digit() => {
                            let mut name = c.to_string();
                            name.push_str(&take_ident(&mut chars).unwrap_or_default());
                            SimpleSelector::Type(name.to_ascii_lowercase())
                        }
                        _ => return None,
                    };
                    simple_selectors.push(simple);
                    next = chars.next_if(|&n| n == '*' || n == '.' || n == '#' || is_ident_char(n));
                }
                if matches!(pieces.last(), Some(Piece::Compound(_))) {
                    return None;
                }
                pieces.push(Piece::Compound(CompoundSelector { simple_selectors }));
            }
        }
    }

    // Assemble right-to-left.
    let mut pieces = pieces.into_iter().rev();
    let Some(Piece::Compound(subject)) = pieces.next() else {
        return None;
    };
    let mut combinators = Vec::new();
    while let Some(piece) = pieces.next() {
        let (Piece::Combinator(combinator), Some(Piece::Compound(compound))) = (piece, pieces.next())
        else {
            return None;
        };
        combinators.push((combinator, compound));
    }

    let complex = ComplexSelector {
        subject,
        combinators,
    };
    let specificity = complex.calculate_specificity();
    Some(ParsedSelector {
        complex,
        specificity,
    })
}

/// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
///
/// "If any selector in a selector list is invalid, the entire selector
/// list is invalid."
#[must_use]
pub fn parse_selector_list(raw: &str) -> Option<Vec<ParsedSelector>> {
    raw.split(',').map(parse_selector).collect()
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    let mut ident = String::new();
    while let Some(c) = chars.next_if(|&c| is_ident_char(c)) {
        ident.push(c);
    }
    if ident.is_empty() { None } else { Some(ident) }
}
