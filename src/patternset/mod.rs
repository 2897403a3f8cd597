//! PatternSet for managing multiple compiled patterns
//!
//! A refactoring pass usually drives several selections at once; a
//! [`PatternSet`] compiles each pattern once and evaluates a candidate
//! against all of them in one call.

use tracing::debug;

use crate::ast::Pattern;
use crate::error::Result;
use crate::signature::CandidateSignature;

/// Collection of labeled compiled patterns for batch evaluation
#[derive(Debug, Default)]
pub struct PatternSet {
    entries: Vec<Entry>,
}

#[derive(Debug)]
struct Entry {
    label: String,
    pattern: Pattern,
}

/// One pattern of a set that accepted a candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetMatch<'a> {
    /// Label the pattern was registered under
    pub label: &'a str,
    /// The matching pattern
    pub pattern: &'a Pattern,
}

impl PatternSet {
    /// Create a new empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a pattern string and add it under the given label
    pub fn add(&mut self, label: impl Into<String>, source: &str) -> Result<()> {
        let pattern = crate::compile(source)?;
        self.add_pattern(label, pattern);
        Ok(())
    }

    /// Add an already compiled pattern under the given label
    pub fn add_pattern(&mut self, label: impl Into<String>, pattern: Pattern) {
        let label = label.into();
        debug!(label = %label, pattern = %pattern, "registered signature pattern");
        self.entries.push(Entry { label, pattern });
    }

    /// Number of patterns in the set
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no patterns
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels of all registered patterns, in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Evaluate a candidate against every pattern and collect the matches
    pub fn matching(&self, candidate: &CandidateSignature) -> Vec<SetMatch<'_>> {
        self.entries
            .iter()
            .filter(|e| e.pattern.matches(candidate))
            .map(|e| SetMatch {
                label: &e.label,
                pattern: &e.pattern,
            })
            .collect()
    }

    /// Whether any pattern in the set accepts the candidate
    pub fn any_match(&self, candidate: &CandidateSignature) -> bool {
        self.entries.iter().any(|e| e.pattern.matches(candidate))
    }
}
