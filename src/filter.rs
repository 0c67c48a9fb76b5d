//! Rule-name filtering.
//!
//! Patterns use glob syntax (`color-*`, `*`); a violation is retained iff
//! its rule name matches at least one pattern. An empty pattern set
//! matches everything.

use anyhow::{Context, Result};
use glob::Pattern;

#[derive(Debug, Clone)]
pub struct RuleFilter {
    patterns: Vec<Pattern>,
}

impl RuleFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).with_context(|| format!("Invalid rule pattern: \"{}\"", p))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Match everything.
    pub fn all() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    pub fn matches(&self, rule: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(rule))
    }
}
