//! Malformed hex colors in declaration values.

use std::sync::LazyLock;

use regex::Regex;

use super::Warning;
use crate::css::{Document, NodeKind};

pub const RULE: &str = "color-no-invalid-hex";

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([0-9a-zA-Z]+)").expect("valid regex"));

pub fn check(doc: &Document) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for id in doc.descendants() {
        let node = doc.node(id);
        let NodeKind::Declaration { value, .. } = &node.kind else {
            continue;
        };
        for caps in HEX_COLOR.captures_iter(value) {
            let digits = &caps[1];
            if !is_valid_hex(digits) {
                warnings.push(Warning {
                    rule: RULE,
                    node: id,
                    line: node.start.line,
                    message: format!("Unexpected invalid hex color \"#{}\"", digits),
                });
            }
        }
    }
    warnings
}

/// Valid hex colors have 3, 4, 6 or 8 hex digits.
fn is_valid_hex(digits: &str) -> bool {
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
