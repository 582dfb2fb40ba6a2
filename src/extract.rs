//! Citation extraction from lesson paragraph text.
//!
//! Lesson authors embed scripture citations inside apostrophe delimiters:
//! `'John 3:16'` for a plain inline reference, `'''Romans 3:23'''` for an
//! emphasized one. Both scans are non-greedy so adjacent citations never
//! merge, and triple-delimited spans suppress the single-quote matches that
//! their own markers produce.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::reference::{parse_reference, ParsedReference};

/// Regex matching a triple-delimited span, shortest match.
#[allow(clippy::expect_used)]
static RE_TRIPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'''(.*?)'''").expect("valid regex: RE_TRIPLE"));

/// Regex matching a single-delimited span, shortest match.
#[allow(clippy::expect_used)]
static RE_SINGLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'(.*?)'").expect("valid regex: RE_SINGLE"));

/// Which delimiter produced a citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationKind {
    /// Single apostrophes: `'...'`.
    Single,
    /// Triple apostrophes: `'''...'''`. Wins over overlapping single matches.
    Triple,
}

/// A located, successfully parsed citation found inside raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Which delimiter the citation was written with.
    pub kind: CitationKind,
    /// The literal text between the delimiters, used as the display label.
    pub raw_text: String,
    /// The structured decomposition of `raw_text`.
    pub parsed: ParsedReference,
    /// Byte offset of the opening delimiter in the original text.
    pub start: usize,
    /// Byte offset one past the closing delimiter (half-open span).
    pub end: usize,
}

/// Scan text for citations and return them ordered by start offset.
///
/// Triple-delimited spans are collected first; a span whose content fails to
/// parse is ordinary quoted text and is dropped. Single-delimited candidates
/// are then collected from the same original text, discarding any whose
/// start offset lies inside an accepted triple span, since the single-quote
/// pattern also matches the apostrophes that triple markers are built from.
pub fn extract_references(text: &str) -> Vec<Citation> {
    let mut citations: Vec<Citation> = Vec::new();

    for caps in RE_TRIPLE.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        match parse_reference(inner.as_str()) {
            Some(parsed) => {
                tracing::debug!(reference = %parsed.display(), start = whole.start(), "triple citation");
                citations.push(Citation {
                    kind: CitationKind::Triple,
                    raw_text: inner.as_str().to_string(),
                    parsed,
                    start: whole.start(),
                    end: whole.end(),
                });
            }
            None => {
                tracing::trace!(content = inner.as_str(), "triple span is not a reference");
            }
        }
    }

    let triple_spans: Vec<(usize, usize)> = citations.iter().map(|c| (c.start, c.end)).collect();

    for caps in RE_SINGLE.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        // Start-offset containment: suppress matches born from triple markers
        if triple_spans.iter().any(|&(s, e)| whole.start() >= s && whole.start() < e) {
            continue;
        }
        if let Some(parsed) = parse_reference(inner.as_str()) {
            tracing::debug!(reference = %parsed.display(), start = whole.start(), "single citation");
            citations.push(Citation {
                kind: CitationKind::Single,
                raw_text: inner.as_str().to_string(),
                parsed,
                start: whole.start(),
                end: whole.end(),
            });
        }
    }

    citations.sort_by_key(|c| c.start);
    citations
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_single_citation() {
        let text = "God loves us 'John 3:16' and saved us.";
        let found = extract_references(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, CitationKind::Single);
        assert_eq!(found[0].raw_text, "John 3:16");
        assert_eq!(found[0].parsed.book, "John");
        assert_eq!(found[0].parsed.chapter, "3");
        assert_eq!(found[0].parsed.verse, "16");
        assert_eq!(&text[found[0].start..found[0].end], "'John 3:16'");
    }

    #[test]
    fn test_triple_citation() {
        let text = "'''Romans 3:23''' tells us all have sinned.";
        let found = extract_references(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, CitationKind::Triple);
        assert_eq!(found[0].raw_text, "Romans 3:23");
        assert_eq!(found[0].start, 0);
        assert_eq!(&text[found[0].start..found[0].end], "'''Romans 3:23'''");
    }

    #[test]
    fn test_mixed_citations_ordered() {
        let text = "Mixed 'Romans 3:23' and '''John 3:16''' references";
        let found = extract_references(text);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, CitationKind::Single);
        assert_eq!(found[0].raw_text, "Romans 3:23");
        assert_eq!(found[1].kind, CitationKind::Triple);
        assert_eq!(found[1].raw_text, "John 3:16");
        assert!(found[0].start < found[1].start);
    }

    #[test]
    fn test_triple_suppresses_inner_singles() {
        let text = "See '''John 3:16''' today";
        let found = extract_references(text);
        // Only the triple survives; the single-quote pairs inside the
        // markers must not surface as separate citations
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, CitationKind::Triple);
    }

    #[test]
    fn test_invalid_content_ignored() {
        let found = extract_references("Invalid 'Not A Reference' should be ignored");
        assert!(found.is_empty());
    }

    #[test]
    fn test_invalid_triple_does_not_block_singles() {
        // A non-reference triple span is plain quoted text; a later single
        // citation in the same text must still be found
        let text = "'''just emphasis''' but 'John 3:16' is real";
        let found = extract_references(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, CitationKind::Single);
        assert_eq!(found[0].raw_text, "John 3:16");
    }

    #[test]
    fn test_no_delimiters() {
        assert!(extract_references("Plain prose without any quoting.").is_empty());
        assert!(extract_references("").is_empty());
    }

    #[test]
    fn test_adjacent_citations_do_not_merge() {
        let text = "'John 3:16' 'Romans 3:23'";
        let found = extract_references(text);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].raw_text, "John 3:16");
        assert_eq!(found[1].raw_text, "Romans 3:23");
    }

    #[test]
    fn test_no_zero_length_citations() {
        let found = extract_references("Empty quotes '' here and '''''' there");
        assert!(found.is_empty());
    }

    #[test]
    fn test_multiple_triples() {
        let text = "'''John 3:16''' and '''Romans 3:23'''";
        let found = extract_references(text);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|c| c.kind == CitationKind::Triple));
    }
}
