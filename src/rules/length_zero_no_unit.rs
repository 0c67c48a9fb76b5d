//! Units on zero lengths.

use std::sync::LazyLock;

use regex::Regex;

use super::Warning;
use crate::css::{Document, NodeKind};

pub const RULE: &str = "length-zero-no-unit";

static ZERO_LENGTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[\s,(])0(?:\.0+)?(px|em|rem|ex|ch|vw|vh|vmin|vmax|cm|mm|q|in|pt|pc)\b")
        .expect("valid regex")
});

pub fn check(doc: &Document) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for id in doc.descendants() {
        let node = doc.node(id);
        let NodeKind::Declaration { value, .. } = &node.kind else {
            continue;
        };
        for caps in ZERO_LENGTH.captures_iter(value) {
            warnings.push(Warning {
                rule: RULE,
                node: id,
                line: node.start.line,
                message: format!("Unexpected unit \"{}\"", &caps[1]),
            });
        }
    }
    warnings
}
