//! Spans, content hashes and text edits.
//!
//! Fixes are computed as whole trees, but batching several fixes against one
//! document (the "fix all" contract) happens at the text level:
//! - each fix is lowered to a list of [`TextEdit`]s against the original text
//! - an [`EditSet`] accepts edits in order, dropping exact duplicates and
//!   rejecting any edit that conflicts with one already accepted
//! - [`EditSet::apply`] splices the accepted edits in one pass

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::SharpfixError;

/// Hash type for content verification (SHA-256, stored as hex string for JSON compatibility).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub String);

impl ContentHash {
    /// Compute SHA-256 hash of the given bytes, returning hex-encoded string.
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        ContentHash(hex::encode(hasher.finalize()))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Span
// ============================================================================

/// Byte offsets into document text.
///
/// Spans are half-open intervals: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(
            start <= end,
            "Span start ({}) must be <= end ({})",
            start,
            end
        );
        Span { start, end }
    }

    /// An empty span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span overlaps with another.
    ///
    /// Two spans overlap if they share any byte positions.
    /// Adjacent spans (one ends where another starts) do NOT overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check if this span contains another span entirely.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check if `offset` lies within `[start, end)`.
    pub fn contains_offset(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Shift both ends by `delta` bytes.
    pub fn shifted(&self, delta: usize) -> Span {
        Span {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

// ============================================================================
// Text Edits
// ============================================================================

/// A single replacement of `span` in the original text by `new_text`.
///
/// Insertions have an empty span; deletions have empty `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub span: Span,
    pub new_text: String,
}

impl TextEdit {
    pub fn replace(span: Span, new_text: impl Into<String>) -> Self {
        TextEdit {
            span,
            new_text: new_text.into(),
        }
    }

    pub fn insert(offset: usize, new_text: impl Into<String>) -> Self {
        TextEdit {
            span: Span::empty(offset),
            new_text: new_text.into(),
        }
    }

    pub fn delete(span: Span) -> Self {
        TextEdit {
            span,
            new_text: String::new(),
        }
    }

    /// Whether two edits cannot both be applied to the same text.
    ///
    /// Two insertions conflict when they target the same offset (their order
    /// would be ambiguous). An insertion conflicts with a replacement when it
    /// falls strictly inside the replaced range.
    pub fn conflicts_with(&self, other: &TextEdit) -> bool {
        match (self.span.is_empty(), other.span.is_empty()) {
            (true, true) => self.span.start == other.span.start,
            (true, false) => {
                other.span.start < self.span.start && self.span.start < other.span.end
            }
            (false, true) => {
                self.span.start < other.span.start && other.span.start < self.span.end
            }
            (false, false) => self.span.overlaps(&other.span),
        }
    }
}

/// Outcome of offering an edit to an [`EditSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edit was accepted.
    Accepted,
    /// An identical edit was already accepted.
    Duplicate,
    /// The edit conflicts with an accepted edit and was dropped.
    Conflict,
}

/// An ordered, conflict-free collection of edits against one text.
#[derive(Debug, Clone, Default)]
pub struct EditSet {
    edits: Vec<TextEdit>,
}

impl EditSet {
    pub fn new() -> Self {
        EditSet::default()
    }

    /// Offer an edit. First accepted wins on conflict.
    pub fn offer(&mut self, edit: TextEdit) -> EditOutcome {
        if self.edits.contains(&edit) {
            return EditOutcome::Duplicate;
        }
        if self.edits.iter().any(|accepted| accepted.conflicts_with(&edit)) {
            return EditOutcome::Conflict;
        }
        self.edits.push(edit);
        EditOutcome::Accepted
    }

    /// Offer a group of edits that must be accepted together.
    ///
    /// Edits of the group that duplicate accepted edits are skipped; if any
    /// remaining edit conflicts, nothing from the group is accepted.
    pub fn offer_group(&mut self, group: Vec<TextEdit>) -> EditOutcome {
        let fresh: Vec<TextEdit> = group
            .into_iter()
            .filter(|edit| !self.edits.contains(edit))
            .collect();
        if fresh.is_empty() {
            return EditOutcome::Duplicate;
        }
        let conflicts = fresh.iter().enumerate().any(|(i, edit)| {
            self.edits.iter().any(|accepted| accepted.conflicts_with(edit))
                || fresh[..i].iter().any(|prior| prior.conflicts_with(edit))
        });
        if conflicts {
            return EditOutcome::Conflict;
        }
        self.edits.extend(fresh);
        EditOutcome::Accepted
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// The accepted edits sorted by position.
    pub fn sorted(&self) -> Vec<&TextEdit> {
        let mut edits: Vec<&TextEdit> = self.edits.iter().collect();
        edits.sort_by_key(|edit| (edit.span.start, edit.span.end));
        edits
    }

    /// Apply all accepted edits to `source`.
    pub fn apply(&self, source: &str) -> Result<String, SharpfixError> {
        let mut result = String::with_capacity(source.len());
        let mut cursor = 0;
        for edit in self.sorted() {
            let span = edit.span;
            if span.end > source.len() {
                return Err(SharpfixError::apply(format!(
                    "edit {} is past end of text ({} bytes)",
                    span,
                    source.len()
                )));
            }
            if !source.is_char_boundary(span.start) || !source.is_char_boundary(span.end) {
                return Err(SharpfixError::apply(format!(
                    "edit {} does not fall on a character boundary",
                    span
                )));
            }
            result.push_str(&source[cursor..span.start]);
            result.push_str(&edit.new_text);
            cursor = span.end;
        }
        result.push_str(&source[cursor..]);
        Ok(result)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_overlap_and_adjacency() {
        let a = Span::new(0, 5);
        let b = Span::new(5, 10);
        let c = Span::new(4, 6);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(b.overlaps(&c));
        assert!(Span::new(0, 10).contains(&c));
        assert!(a.contains_offset(4));
        assert!(!a.contains_offset(5));
    }

    #[test]
    #[should_panic(expected = "must be <=")]
    fn span_rejects_inverted_range() {
        let _ = Span::new(5, 2);
    }

    #[test]
    fn content_hash_is_stable() {
        let a = ContentHash::compute(b"class A {}");
        let b = ContentHash::compute(b"class A {}");
        assert_eq!(a, b);
        assert_eq!(a.0.len(), 64);
        assert_ne!(a, ContentHash::compute(b"class B {}"));
    }

    #[test]
    fn apply_replacements_and_insertions() {
        let source = "Helper.Run(); Helper.Stop();";
        let mut set = EditSet::new();
        assert_eq!(set.offer(TextEdit::delete(Span::new(0, 7))), EditOutcome::Accepted);
        assert_eq!(set.offer(TextEdit::delete(Span::new(14, 21))), EditOutcome::Accepted);
        assert_eq!(
            set.offer(TextEdit::insert(0, "using static Helper;\n")),
            EditOutcome::Accepted
        );
        let result = set.apply(source).unwrap();
        assert_eq!(result, "using static Helper;\nRun(); Stop();");
    }

    #[test]
    fn duplicate_edits_are_collapsed() {
        let mut set = EditSet::new();
        let edit = TextEdit::replace(Span::new(2, 4), "xy");
        assert_eq!(set.offer(edit.clone()), EditOutcome::Accepted);
        assert_eq!(set.offer(edit), EditOutcome::Duplicate);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn first_accepted_edit_wins_on_overlap() {
        let mut set = EditSet::new();
        assert_eq!(
            set.offer(TextEdit::replace(Span::new(10, 20), "a")),
            EditOutcome::Accepted
        );
        assert_eq!(
            set.offer(TextEdit::replace(Span::new(15, 25), "b")),
            EditOutcome::Conflict
        );
        assert_eq!(set.offer(TextEdit::insert(12, "c")), EditOutcome::Conflict);
        assert_eq!(set.offer(TextEdit::insert(20, "d")), EditOutcome::Accepted);
        assert_eq!(set.offer(TextEdit::insert(20, "e")), EditOutcome::Conflict);
    }

    #[test]
    fn group_is_all_or_nothing() {
        let mut set = EditSet::new();
        set.offer(TextEdit::replace(Span::new(0, 3), "x"));
        let outcome = set.offer_group(vec![
            TextEdit::replace(Span::new(5, 6), "y"),
            TextEdit::replace(Span::new(2, 4), "z"),
        ]);
        assert_eq!(outcome, EditOutcome::Conflict);
        assert_eq!(set.len(), 1);

        let outcome = set.offer_group(vec![
            TextEdit::replace(Span::new(0, 3), "x"),
            TextEdit::replace(Span::new(5, 6), "y"),
        ]);
        assert_eq!(outcome, EditOutcome::Accepted);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn apply_rejects_out_of_range_edit() {
        let mut set = EditSet::new();
        set.offer(TextEdit::replace(Span::new(3, 50), ""));
        assert!(set.apply("short").is_err());
    }
}
