//! Stylelint disable-directive parsing.
//!
//! Recognized comment forms:
//! - `stylelint-disable-line` - suppress rules on the comment's own line
//! - `stylelint-disable-next-line` - suppress rules on the following line
//! - `stylelint-disable` / `stylelint-enable` - range-based suppression
//!
//! Each form takes an optional comma-separated rule list; no list means
//! all rules. The lint pass consults these so that files annotated by a
//! previous run produce no further warnings for the silenced rules.

use std::collections::{HashMap, HashSet};

use crate::css::{Document, NodeKind};

pub const DISABLE: &str = "stylelint-disable";
pub const ENABLE: &str = "stylelint-enable";
pub const DISABLE_LINE: &str = "stylelint-disable-line";
pub const DISABLE_NEXT_LINE: &str = "stylelint-disable-next-line";

/// Rule list of a directive. `None` means all rules.
type RuleList = Option<Vec<String>>;

/// Parsed stylelint directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Disable { rules: RuleList },
    Enable { rules: RuleList },
    DisableLine { rules: RuleList },
    DisableNextLine { rules: RuleList },
}

impl Directive {
    /// Parse a directive from comment text. Returns `None` for ordinary
    /// comments.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();

        // Order matters: check longer prefixes first
        if let Some(rest) = strip_token(text, DISABLE_NEXT_LINE) {
            return Some(Self::DisableNextLine {
                rules: parse_rules(rest),
            });
        }
        if let Some(rest) = strip_token(text, DISABLE_LINE) {
            return Some(Self::DisableLine {
                rules: parse_rules(rest),
            });
        }
        if let Some(rest) = strip_token(text, ENABLE) {
            return Some(Self::Enable {
                rules: parse_rules(rest),
            });
        }
        if let Some(rest) = strip_token(text, DISABLE) {
            return Some(Self::Disable {
                rules: parse_rules(rest),
            });
        }

        None
    }
}

/// Strip a directive token, requiring a word boundary after it so that
/// `stylelint-disable-linex` is not mistaken for a directive.
fn strip_token<'a>(text: &'a str, token: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(token)?;
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest),
        Some(_) => None,
    }
}

fn parse_rules(rest: &str) -> RuleList {
    let rules: Vec<String> = rest
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if rules.is_empty() { None } else { Some(rules) }
}

/// Inclusive disabled line range; `end == usize::MAX` for open-ended.
#[derive(Debug, Clone, Copy)]
struct DisabledRange {
    start: usize,
    end: usize,
}

/// Per-file view of which lines are suppressed for which rules.
#[derive(Debug, Default)]
pub struct DisableContext {
    all_lines: HashSet<usize>,
    lines_by_rule: HashMap<String, HashSet<usize>>,
    all_ranges: Vec<DisabledRange>,
    ranges_by_rule: HashMap<String, Vec<DisabledRange>>,
}

impl DisableContext {
    /// Whether a warning for `rule` on `line` should be suppressed.
    pub fn should_ignore(&self, line: usize, rule: &str) -> bool {
        if self.all_lines.contains(&line) {
            return true;
        }
        if let Some(lines) = self.lines_by_rule.get(rule)
            && lines.contains(&line)
        {
            return true;
        }
        if self
            .all_ranges
            .iter()
            .any(|r| line >= r.start && line <= r.end)
        {
            return true;
        }
        if let Some(ranges) = self.ranges_by_rule.get(rule)
            && ranges.iter().any(|r| line >= r.start && line <= r.end)
        {
            return true;
        }
        false
    }

    /// Build the context from a document's comments, in document order.
    pub fn from_document(doc: &Document) -> Self {
        let mut ctx = Self::default();
        // Open disable ranges: rule name -> start line, plus the all-rules range
        let mut open_by_rule: HashMap<String, usize> = HashMap::new();
        let mut open_all: Option<usize> = None;

        for id in doc.descendants() {
            let node = doc.node(id);
            let NodeKind::Comment { text, .. } = &node.kind else {
                continue;
            };
            let Some(directive) = Directive::parse(text) else {
                continue;
            };
            let line = node.start.line;

            match directive {
                Directive::DisableLine { rules } => match rules {
                    None => {
                        ctx.all_lines.insert(line);
                    }
                    Some(rules) => {
                        for rule in rules {
                            ctx.lines_by_rule.entry(rule).or_default().insert(line);
                        }
                    }
                },
                Directive::DisableNextLine { rules } => match rules {
                    None => {
                        ctx.all_lines.insert(line + 1);
                    }
                    Some(rules) => {
                        for rule in rules {
                            ctx.lines_by_rule.entry(rule).or_default().insert(line + 1);
                        }
                    }
                },
                Directive::Disable { rules } => match rules {
                    None => {
                        open_all.get_or_insert(line);
                    }
                    Some(rules) => {
                        for rule in rules {
                            open_by_rule.entry(rule).or_insert(line);
                        }
                    }
                },
                Directive::Enable { rules } => {
                    let end = line.saturating_sub(1);
                    match rules {
                        None => {
                            // Bare enable closes everything currently open
                            if let Some(start) = open_all.take() {
                                ctx.all_ranges.push(DisabledRange { start, end });
                            }
                            for (rule, start) in open_by_rule.drain() {
                                ctx.ranges_by_rule
                                    .entry(rule)
                                    .or_default()
                                    .push(DisabledRange { start, end });
                            }
                        }
                        Some(rules) => {
                            for rule in rules {
                                if let Some(start) = open_by_rule.remove(&rule) {
                                    ctx.ranges_by_rule
                                        .entry(rule)
                                        .or_default()
                                        .push(DisabledRange { start, end });
                                }
                            }
                        }
                    }
                }
            }
        }

        // Ranges left open extend to end of file
        if let Some(start) = open_all {
            ctx.all_ranges.push(DisabledRange {
                start,
                end: usize::MAX,
            });
        }
        for (rule, start) in open_by_rule {
            ctx.ranges_by_rule
                .entry(rule)
                .or_default()
                .push(DisabledRange {
                    start,
                    end: usize::MAX,
                });
        }

        ctx
    }
}
