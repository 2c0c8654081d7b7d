//! CSS support for the Strata overlay.
//!
//! # Scope
//!
//! This crate implements the slice of CSS the overlay produces and inspects:
//! - **Colors** ([CSS Color Level 4](https://www.w3.org/TR/css-color-4/))
//!   - Hex notation parsing and serialization
//!   - HSL-to-RGB conversion
//! - **Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, class, ID, and universal selectors
//!   - Descendant and child combinators, selector lists
//!   - Specificity calculation
//! - **Stylesheets** ([CSS Syntax Level 3](https://www.w3.org/TR/css-syntax-3/))
//!   - Flat style rules with declarations and `!important`
//! - **Cascade** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - Resolution of the `outline` property per element
//!
//! # Not Implemented
//!
//! - At-rules, nesting, comments inside selectors
//! - Sibling combinators, pseudo-classes, attribute selectors
//! - Inheritance (`outline` is not inherited)

/// Outline cascade per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod cascade;
/// Color values per [CSS Color Level 4](https://www.w3.org/TR/css-color-4/).
pub mod color;
/// Selector parsing and matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// Flat stylesheet parsing per [CSS Syntax Level 3](https://www.w3.org/TR/css-syntax-3/).
pub mod stylesheet;

pub use cascade::{OutlineValue, resolve_outlines};
pub use color::{ColorValue, hsl_to_rgb};
pub use selector::{ParsedSelector, Specificity, parse_selector, parse_selector_list};
pub use stylesheet::{Declaration, Rule, Stylesheet, parse_stylesheet};
