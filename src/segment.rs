//! Splitting lesson text into renderable segments.
//!
//! The segmenter walks the original text and its extracted citations once,
//! producing an ordered sequence of plain-text and reference segments that
//! covers the whole input. The renderer shows text segments verbatim and
//! reference segments as inline citation cards.

use serde::{Deserialize, Serialize};

use crate::extract::{extract_references, Citation};
use crate::reference::ParsedReference;

/// Whether a segment is literal text or an annotated reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// A literal substring of the input.
    Text,
    /// An annotated scripture reference.
    Reference,
}

/// A contiguous piece of renderable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment kind.
    pub kind: SegmentKind,
    /// For text segments the literal substring; for reference segments the
    /// citation's inner label (delimiters stripped; the label is what gets
    /// displayed).
    pub content: String,
    /// The parsed reference, present exactly when `kind` is `Reference`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ParsedReference>,
}

impl Segment {
    /// Build a plain text segment.
    fn text(content: &str) -> Self {
        Self {
            kind: SegmentKind::Text,
            content: content.to_string(),
            reference: None,
        }
    }

    /// Build a reference segment from a citation.
    fn reference(citation: &Citation) -> Self {
        Self {
            kind: SegmentKind::Reference,
            content: citation.raw_text.clone(),
            reference: Some(citation.parsed.clone()),
        }
    }
}

/// Split text into segments around the given citations.
///
/// Citations must be ordered by start offset, as `extract_references`
/// returns them. Segments partition the input in ascending order with no
/// gaps or overlaps; an empty citation list yields the whole text as one
/// text segment, and empty text yields no segments.
pub fn segment(text: &str, citations: &[Citation]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(citations.len() * 2 + 1);
    let mut cursor = 0usize;

    for citation in citations {
        if citation.start > cursor {
            segments.push(Segment::text(&text[cursor..citation.start]));
        }
        segments.push(Segment::reference(citation));
        cursor = citation.end;
    }

    if cursor < text.len() {
        segments.push(Segment::text(&text[cursor..]));
    }

    segments
}

/// Extract citations and segment the text in one call.
///
/// This is the primary entry point for rendering.
pub fn parse_text_with_references(text: &str) -> Vec<Segment> {
    segment(text, &extract_references(text))
}
