//! `versemark` - scripture reference annotation for lesson text.
//!
//! Scans free-form lesson prose for embedded citations (`'John 3:16'` and
//! `'''Romans 3:23'''`), resolves each to a (book, chapter, verse) triple,
//! and produces renderable segments plus verse-text lookup against a
//! paragraph's candidate verses.

// Re-export public modules for use in integration tests and as a library
pub mod config;
pub mod error;
pub mod extract;
pub mod lesson;
pub mod reference;
pub mod segment;
pub mod verses;

pub use extract::{extract_references, Citation, CitationKind};
pub use reference::{parse_reference, ParsedReference};
pub use segment::{parse_text_with_references, Segment, SegmentKind};
pub use verses::{find_verse_text, suggest_closest, CandidateVerse, VerseLibrary};
