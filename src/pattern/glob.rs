//! Generic backtracking wildcard matcher
//!
//! One algorithm serves both wildcard dialects of the pattern language: the
//! method-name dialect (where `*` ranges over the whole name) and the
//! type-name dialect (where `*` is confined to one `.`-delimited segment and
//! `..` skips whole segments). Both are instances of the same element-level
//! matching problem; the dialects differ only in what an element is.

/// Match a pattern slice against an item slice.
///
/// `is_gap` marks pattern elements that may consume zero or more items
/// (`*` at the character level, `..` at the segment level); `unit` decides
/// whether a non-gap pattern element accepts a single item.
///
/// The algorithm is the classic iterative two-pointer wildcard match: a gap
/// initially consumes nothing and is widened one item at a time when the
/// remainder fails. Worst case O(items.len() * pattern.len()), no recursion.
pub(crate) fn backtrack_match<P, T>(
    pattern: &[P],
    items: &[T],
    is_gap: impl Fn(&P) -> bool,
    unit: impl Fn(&P, &T) -> bool,
) -> bool {
    let mut p = 0;
    let mut i = 0;
    let mut gap: Option<usize> = None;
    let mut mark = 0;

    while i < items.len() {
        if p < pattern.len() && is_gap(&pattern[p]) {
            gap = Some(p);
            p += 1;
            mark = i;
        } else if p < pattern.len() && unit(&pattern[p], &items[i]) {
            p += 1;
            i += 1;
        } else if let Some(g) = gap {
            // Widen the most recent gap by one item and retry
            p = g + 1;
            mark += 1;
            i = mark;
        } else {
            return false;
        }
    }

    // Trailing gaps may consume zero items
    while p < pattern.len() && is_gap(&pattern[p]) {
        p += 1;
    }
    p == pattern.len()
}
