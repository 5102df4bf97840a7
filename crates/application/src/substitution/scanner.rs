//! Placeholder scanner for `%env(...)%` syntax
//!
//! Finds the innermost placeholders of a string with their byte positions.

use std::ops::Range;

/// Opening delimiter of a placeholder.
pub const PREFIX: &str = "%env(";

/// Closing delimiter of a placeholder.
pub const SUFFIX: &str = ")%";

/// An innermost placeholder found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte range of the whole placeholder, delimiters included.
    pub span: Range<usize>,

    /// The heap between the delimiters.
    pub heap: String,
}

/// Finds every placeholder whose heap contains no other placeholder opening.
///
/// Each opening is matched to the `)%` that balances it. Unbalanced openings
/// are ignored. When two matches overlap, the leftmost one wins.
///
/// # Examples
///
/// ```
/// use envres_application::find_innermost;
///
/// let found = find_innermost("a=%env(A)% b=%env(key:%env(B)%)%");
/// let heaps: Vec<&str> = found.iter().map(|p| p.heap.as_str()).collect();
/// assert_eq!(heaps, ["A", "B"]);
/// ```
#[must_use]
pub fn find_innermost(input: &str) -> Vec<Placeholder> {
    let bytes = input.as_bytes();
    let mut found: Vec<Placeholder> = Vec::new();

    for (start, _) in input.match_indices(PREFIX) {
        let content_start = start + PREFIX.len();
        let Some(end) = balanced_end(bytes, content_start) else {
            continue;
        };

        let heap = &input[content_start..end];
        if heap.contains(PREFIX) {
            continue;
        }
        if found.last().is_some_and(|last| last.span.end > start) {
            continue;
        }

        found.push(Placeholder {
            span: start..end + SUFFIX.len(),
            heap: heap.to_string(),
        });
    }

    found
}

/// Returns the position of the `)%` closing the placeholder opened just
/// before `from`.
fn balanced_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut depth = 1_usize;
    let mut i = from;

    while i < bytes.len() {
        if bytes[i..].starts_with(PREFIX.as_bytes()) {
            depth += 1;
            i += PREFIX.len();
        } else if bytes[i..].starts_with(SUFFIX.as_bytes()) {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
            i += SUFFIX.len();
        } else {
            i += 1;
        }
    }

    None
}
