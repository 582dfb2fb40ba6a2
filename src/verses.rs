//! Verse matching against per-lesson candidate verses.
//!
//! The surrounding application supplies each paragraph with a small list of
//! candidate verses it already fetched; this module finds the candidate a
//! parsed reference resolves to, loads candidate sets from disk for the CLI,
//! and offers a fuzzy "did you mean" fallback for diagnostics.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::reference::ParsedReference;

/// A candidate verse supplied by the surrounding application.
///
/// Upstream JSON writes `chapter` and `verse` as either numbers or strings;
/// both are accepted and held as strings for textual comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateVerse {
    /// Book identifier (e.g. `"Romans"`).
    pub book_code: String,
    /// Chapter number.
    #[serde(deserialize_with = "number_or_string")]
    pub chapter: String,
    /// Verse number.
    #[serde(deserialize_with = "number_or_string")]
    pub verse: String,
    /// The verse text to display.
    pub text: String,
}

/// Accept a JSON number or string, normalized to a string.
fn number_or_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    Ok(match NumberOrString::deserialize(d)? {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::String(s) => s,
    })
}

/// Normalize a book name for comparison: lowercase, all whitespace removed.
fn normalize_book(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect()
}

/// Whether a candidate's verse number satisfies a reference's verse spec.
///
/// Exact equality, or the candidate as a string prefix of the spec, which
/// lets a candidate verse `"1"` match a reference range `"1-3"`. The prefix
/// rule is a known approximation kept for compatibility: candidate `"1"`
/// also prefix-matches `"10-12"`.
fn verse_matches(candidate: &str, wanted: &str) -> bool {
    let candidate = candidate.trim();
    candidate == wanted || wanted.starts_with(candidate)
}

/// Find the text of the first candidate matching a parsed reference.
///
/// A candidate matches when its normalized book equals the reference's
/// normalized book, its chapter equals the reference's chapter exactly, and
/// its verse number satisfies [`verse_matches`]. Returns `None` when no
/// candidate matches; absence is a normal outcome.
pub fn find_verse_text<'a>(
    reference: &ParsedReference,
    candidates: &'a [CandidateVerse],
) -> Option<&'a str> {
    let book = normalize_book(&reference.book);
    let chapter = reference.chapter.trim();

    let found = candidates.iter().find(|c| {
        normalize_book(&c.book_code) == book
            && c.chapter.trim() == chapter
            && verse_matches(&c.verse, &reference.verse)
    });

    match found {
        Some(c) => {
            tracing::debug!(reference = %reference.display(), book = %c.book_code, "verse matched");
            Some(c.text.as_str())
        }
        None => {
            tracing::debug!(reference = %reference.display(), "no matching candidate verse");
            None
        }
    }
}

/// Minimum fuzzy score for a "did you mean" suggestion.
const MIN_SUGGEST_SCORE: i64 = 40;

/// Suggest the closest candidate when exact matching failed.
///
/// Fuzzy-matches the reference's book name against candidate book codes.
/// Strictly diagnostic; never a substitute for [`find_verse_text`].
pub fn suggest_closest<'a>(
    reference: &ParsedReference,
    candidates: &'a [CandidateVerse],
) -> Option<&'a CandidateVerse> {
    let matcher = SkimMatcherV2::default();

    candidates
        .iter()
        .filter_map(|c| {
            let score = matcher.fuzzy_match(&c.book_code, &reference.book)?;
            (score >= MIN_SUGGEST_SCORE).then_some((score, c))
        })
        .max_by_key(|(score, _)| *score)
        .map(|(_, c)| c)
}

/// Candidate verses for all lessons, loaded from a JSON file keyed by
/// lesson identifier.
#[derive(Debug, Clone, Default)]
pub struct VerseLibrary {
    lessons: HashMap<String, Vec<CandidateVerse>>,
    path: PathBuf,
}

impl VerseLibrary {
    /// Load a verse library from a JSON file of shape
    /// `{ "<lesson-id>": [ { "bookCode": ..., ... }, ... ] }`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .map_err(|e| Error::io(e, path.to_path_buf()))?;

        let lessons: HashMap<String, Vec<CandidateVerse>> = serde_json::from_str(&content)
            .map_err(|e| Error::parse(format!("invalid verse library JSON: {e}"), path.to_path_buf()))?;

        let verse_count: usize = lessons.values().map(Vec::len).sum();
        tracing::info!(
            lessons = lessons.len(),
            verses = verse_count,
            path = %path.display(),
            "loaded verse library"
        );

        Ok(Self {
            lessons,
            path: path.to_path_buf(),
        })
    }

    /// The file this library was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Candidate verses for a lesson, empty when the lesson is unknown.
    pub fn candidates(&self, lesson_id: &str) -> &[CandidateVerse] {
        self.lessons.get(lesson_id).map_or(&[], Vec::as_slice)
    }

    /// All candidate verses across lessons, in arbitrary lesson order.
    pub fn all_candidates(&self) -> Vec<&CandidateVerse> {
        self.lessons.values().flatten().collect()
    }
}
