//! Built-in lint rules.
//!
//! Each rule is a pure function over a parsed [`Document`] producing
//! [`Warning`]s. Rules know nothing about disable directives or rule
//! filters; both are applied by the collector on top of the raw warnings.
//!
//! ## Rules
//!
//! - `block-no-empty`: empty rule/at-rule blocks
//! - `color-no-invalid-hex`: malformed hex colors in values
//! - `comment-no-empty`: comments with no text
//! - `declaration-block-no-duplicate-properties`: repeated properties
//! - `length-zero-no-unit`: units on zero lengths

pub mod block_no_empty;
pub mod color_no_invalid_hex;
pub mod comment_no_empty;
pub mod declaration_block_no_duplicate_properties;
pub mod length_zero_no_unit;

use crate::css::{Document, NodeId};

/// A single rule violation, tied to the offending node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub rule: &'static str,
    pub node: NodeId,
    pub line: usize,
    pub message: String,
}

pub type RuleFn = fn(&Document) -> Vec<Warning>;

/// Registry of every built-in rule, keyed by its stylelint name.
pub const ALL_RULES: &[(&str, RuleFn)] = &[
    (block_no_empty::RULE, block_no_empty::check),
    (color_no_invalid_hex::RULE, color_no_invalid_hex::check),
    (comment_no_empty::RULE, comment_no_empty::check),
    (
        declaration_block_no_duplicate_properties::RULE,
        declaration_block_no_duplicate_properties::check,
    ),
    (length_zero_no_unit::RULE, length_zero_no_unit::check),
];

/// Run every rule over the document.
///
/// Warnings are ordered by source position so diagnostics are stable
/// regardless of registry order.
pub fn check_all(doc: &Document) -> Vec<Warning> {
    let mut warnings: Vec<Warning> = ALL_RULES.iter().flat_map(|(_, check)| check(doc)).collect();
    warnings.sort_by(|a, b| {
        a.line
            .cmp(&b.line)
            .then_with(|| a.node.cmp(&b.node))
            .then_with(|| a.rule.cmp(b.rule))
    });
    warnings
}
