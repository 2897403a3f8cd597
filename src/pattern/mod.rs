//! Wildcard pattern matching implementations
//!
//! Two wildcard dialects share the backtracking core in [`glob`]: method
//! names are matched character-wise with `*` free to cross any boundary,
//! while dotted type names are matched segment-wise so that `*` never
//! crosses a `.` and `..` absorbs whole segments.

mod glob;
pub mod traits;

pub use traits::StringMatcher;

use std::fmt;

use glob::backtrack_match;

/// One element of a compiled glob: a concrete character or a `*` gap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobUnit {
    /// A literal character, matched exactly (case-sensitive)
    Ch(char),
    /// A `*` wildcard, matching zero or more characters
    Any,
}

/// Compiled glob over a single undelimited name
///
/// Used directly for method-name patterns and per segment inside
/// [`DottedName`]. A `*` here may match a zero-length run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameGlob {
    units: Vec<GlobUnit>,
}

impl NameGlob {
    /// Create an empty glob; populated by the parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a literal identifier fragment
    pub fn push_literal(&mut self, fragment: &str) {
        self.units.extend(fragment.chars().map(GlobUnit::Ch));
    }

    /// Append a `*` wildcard
    pub fn push_star(&mut self) {
        // Adjacent stars are equivalent to one
        if self.units.last() != Some(&GlobUnit::Any) {
            self.units.push(GlobUnit::Any);
        }
    }

    /// Whether any fragment has been appended yet
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Whether this glob is the single wildcard `*`
    pub fn is_any(&self) -> bool {
        self.units == [GlobUnit::Any]
    }

    /// The literal string this glob spells, if it contains no wildcard
    pub fn as_literal(&self) -> Option<String> {
        self.units
            .iter()
            .map(|u| match u {
                GlobUnit::Ch(c) => Some(*c),
                GlobUnit::Any => None,
            })
            .collect()
    }

    /// Match the glob against a name, consuming it fully
    pub fn matches(&self, value: &str) -> bool {
        let chars: Vec<char> = value.chars().collect();
        backtrack_match(
            &self.units,
            &chars,
            |u| matches!(u, GlobUnit::Any),
            |u, c| matches!(u, GlobUnit::Ch(pc) if pc == c),
        )
    }
}

impl StringMatcher for NameGlob {
    fn string_match(&self, value: &str) -> bool {
        self.matches(value)
    }
}

impl fmt::Display for NameGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for unit in &self.units {
            match unit {
                GlobUnit::Ch(c) => write!(f, "{c}")?,
                GlobUnit::Any => write!(f, "*")?,
            }
        }
        Ok(())
    }
}

/// One element of a dotted type-name pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentPattern {
    /// A `..` marker, matching zero or more whole segments
    Gap,
    /// A glob matched against exactly one segment
    Glob(NameGlob),
}

/// Dotted type-name pattern with an array-dimension count
///
/// `com.foo..Bar` compiles to the segments `com`, `foo`, a gap, `Bar`; the
/// gap may match zero segments, so `com.foo.Bar` itself is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DottedName {
    segments: Vec<SegmentPattern>,
    dims: usize,
}

impl DottedName {
    /// Create a dotted-name pattern from its segments and array dimensions
    pub fn new(segments: Vec<SegmentPattern>, dims: usize) -> Self {
        Self { segments, dims }
    }

    /// Array-dimension count (`[]` repeated N times)
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Whether this pattern is the bare wildcard `*`
    pub fn is_bare_star(&self) -> bool {
        self.dims == 0
            && matches!(self.segments.as_slice(), [SegmentPattern::Glob(g)] if g.is_any())
    }

    /// The literal name this pattern spells, if it contains no wildcard
    pub fn as_literal(&self) -> Option<String> {
        if self.dims != 0 || self.segments.len() != 1 {
            return None;
        }
        match &self.segments[0] {
            SegmentPattern::Glob(g) => g.as_literal(),
            SegmentPattern::Gap => None,
        }
    }

    /// Match the pattern against a concrete dotted type name
    ///
    /// Literal segments are compared exactly, `*` fragments stay inside one
    /// segment, and gaps are widened shortest-first by the backtracking
    /// core. Array dimensions must agree exactly.
    pub fn matches_type(&self, value: &str) -> bool {
        let (base, dims) = split_array_dims(value);
        if dims != self.dims {
            return false;
        }
        let segs: Vec<&str> = base.split('.').collect();
        backtrack_match(
            &self.segments,
            &segs,
            |p| matches!(p, SegmentPattern::Gap),
            |p, s| matches!(p, SegmentPattern::Glob(g) if g.matches(s)),
        )
    }
}

impl StringMatcher for DottedName {
    fn string_match(&self, value: &str) -> bool {
        self.matches_type(value)
    }
}

impl fmt::Display for DottedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut after_glob = false;
        for segment in &self.segments {
            match segment {
                SegmentPattern::Gap => {
                    write!(f, "..")?;
                    after_glob = false;
                }
                SegmentPattern::Glob(g) => {
                    if after_glob {
                        write!(f, ".")?;
                    }
                    write!(f, "{g}")?;
                    after_glob = true;
                }
            }
        }
        for _ in 0..self.dims {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

/// Split a concrete type name into its base name and array-dimension count
pub(crate) fn split_array_dims(value: &str) -> (&str, usize) {
    let mut base = value;
    let mut dims = 0;
    while let Some(stripped) = base.strip_suffix("[]") {
        base = stripped;
        dims += 1;
    }
    (base, dims)
}
