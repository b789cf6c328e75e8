//! Word-level change rendering for page snapshots.
//!
//! Snapshots are tokenized, encoded to integer codes, aligned with Myers,
//! tidied, and walked into styled [`Segment`]s that show each change with a
//! few words of surrounding context.

mod cleanup;
mod encoder;
mod ops;
mod segments;
mod style;
mod tokenizer;

pub use encoder::{Encoded, decode, encode};
pub use ops::OpKind;
pub use segments::{Operation, Segment, build, diff_operations};
pub use style::{DiffStyle, StyleColor, StyleDescriptor};
pub use tokenizer::tokenize;

/// What the text-diff view should show for one change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffResult {
    /// Styled segments from the snapshot text diff.
    TextDiff(Vec<Segment>),
    /// Only metadata changed; a single descriptive line replaces the diff.
    MetadataNote(String),
    /// The snapshots could not be obtained.
    Unavailable(String),
}

impl DiffResult {
    /// Note for an HTTP status change between two checks.
    pub fn status_change(prev: i32, curr: i32) -> Self {
        DiffResult::MetadataNote(format!("HTTP status changed from {prev} to {curr}."))
    }

    /// Flatten into segments for the renderer.
    pub fn segments(&self) -> Vec<Segment> {
        match self {
            DiffResult::TextDiff(segments) => segments.clone(),
            DiffResult::MetadataNote(note) => vec![Segment::new(note.clone(), DiffStyle::Replaced)],
            DiffResult::Unavailable(message) => vec![Segment::plain(message.clone())],
        }
    }

    /// True when nothing but empty text would be rendered.
    pub fn is_empty(&self) -> bool {
        match self {
            DiffResult::TextDiff(segments) => segments.iter().all(|s| s.text.is_empty()),
            DiffResult::MetadataNote(text) | DiffResult::Unavailable(text) => text.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_note_uses_replaced_style() {
        let result = DiffResult::status_change(200, 404);
        assert_eq!(
            result.segments(),
            vec![Segment::new(
                "HTTP status changed from 200 to 404.",
                DiffStyle::Replaced
            )]
        );
    }

    #[test]
    fn failure_is_plain_text() {
        let result = DiffResult::Unavailable("Failed to load HTML diff.".into());
        assert_eq!(result.segments()[0].style, DiffStyle::Plain);
        assert!(!result.is_empty());
    }

    #[test]
    fn empty_text_diff() {
        assert!(DiffResult::TextDiff(Vec::new()).is_empty());
        assert!(DiffResult::TextDiff(vec![Segment::plain("")]).is_empty());
        assert!(!DiffResult::TextDiff(build(Some("a"), Some("b"))).is_empty());
    }
}
