//! Exact-substring reference rewriting.
//!
//! Replacement is substring-based rather than positional, so rules built
//! from one scan stay valid after earlier rules have shifted byte
//! offsets. Passes are applied kind-by-kind for the same reason.

/// A single original -> replacement substring pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Apply every rule to `text`, replacing all occurrences of each `from`.
pub fn apply(text: &str, rules: &[Replacement]) -> String {
    let mut out = text.to_string();
    for rule in rules {
        if out.contains(&rule.from) {
            out = out.replace(&rule.from, &rule.to);
        }
    }
    out
}
