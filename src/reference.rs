//! Scripture reference parsing.
//!
//! Decomposes a raw citation string like `"Romans 3:23"` or `"1 John 3:1-3"`
//! into its book, chapter, and verse parts. Parsing never fails loudly:
//! non-reference input yields `None`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Regex matching a well-formed reference: an optional 1-2 digit book
/// numeral, one or more space-separated alphabetic words with an optional
/// trailing period, then `<chapter>:<verse-spec>`. The verse spec is a
/// number, a hyphen/en-dash range, or a comma-separated list of both.
#[allow(clippy::expect_used)]
static RE_STRICT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^((?:\d{1,2} )?\p{L}+(?: \p{L}+)*\.?)\s+(\d+):(\d+(?:[-–]\d+)?(?:\s*,\s*\d+(?:[-–]\d+)?)*)$",
    )
    .expect("valid regex: RE_STRICT")
});

/// Permissive fallback: split at the first `<whitespace><digits>:` run.
/// Book names in the wild carry stray punctuation and spacing the strict
/// pattern rejects; this trades verse-spec validation for recall.
#[allow(clippy::expect_used)]
static RE_LOOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^:]+?)\s+(\d+):(.*)$").expect("valid regex: RE_LOOSE")
});

/// A parsed scripture reference.
///
/// Chapter and verse are kept as written (digits as strings) since the
/// consumer compares them textually; the verse field may hold a single
/// number, a range like `"1-3"`, or a list like `"1, 4-6"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReference {
    /// Book name as written in the source, trimmed, trailing period stripped.
    pub book: String,
    /// Chapter number as written (always digits).
    pub chapter: String,
    /// Verse specifier: a number, a range, or a comma-separated list.
    pub verse: String,
}

impl ParsedReference {
    /// Format as a display string (e.g. `"Romans 3:23"`).
    pub fn display(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// Strip a single trailing period and surrounding whitespace from a book name.
fn clean_book(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_suffix('.').unwrap_or(trimmed).trim().to_string()
}

/// Parse a raw reference string into its parts.
///
/// Tries the strict pattern first, then the permissive fallback. Returns
/// `None` when the input does not look like a reference at all.
pub fn parse_reference(raw: &str) -> Option<ParsedReference> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(caps) = RE_STRICT.captures(raw) {
        let (Some(book), Some(chapter), Some(verse)) = (caps.get(1), caps.get(2), caps.get(3))
        else {
            return None;
        };
        return Some(ParsedReference {
            book: clean_book(book.as_str()),
            chapter: chapter.as_str().to_string(),
            verse: verse.as_str().trim().to_string(),
        });
    }

    let caps = RE_LOOSE.captures(raw)?;
    let (Some(book), Some(chapter), Some(verse)) = (caps.get(1), caps.get(2), caps.get(3)) else {
        return None;
    };
    Some(ParsedReference {
        book: clean_book(book.as_str()),
        chapter: chapter.as_str().to_string(),
        verse: verse.as_str().trim().to_string(),
    })
}
