//! Batch annotation of lesson files.
//!
//! Scans a directory for `.txt` lesson files, annotates each one, and
//! returns per-file reports for the CLI. Individual unreadable files are
//! skipped with a warning rather than failing the whole batch.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::segment::{parse_text_with_references, Segment, SegmentKind};

/// Annotation result for one lesson file.
#[derive(Debug, Clone, Serialize)]
pub struct LessonReport {
    /// Path of the annotated file.
    pub path: PathBuf,
    /// Number of reference segments found.
    pub citation_count: usize,
    /// The full segment sequence for rendering.
    pub segments: Vec<Segment>,
}

/// Annotate a single lesson file.
pub fn annotate_file(path: &Path) -> Result<LessonReport> {
    let text = fs_err::read_to_string(path)
        .map_err(|e| Error::io(e, path.to_path_buf()))?;
    Ok(annotate_text(path, &text))
}

/// Annotate already-loaded lesson text.
fn annotate_text(path: &Path, text: &str) -> LessonReport {
    let segments = parse_text_with_references(text);
    let citation_count = segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Reference)
        .count();

    LessonReport {
        path: path.to_path_buf(),
        citation_count,
        segments,
    }
}

/// Annotate every `.txt` lesson file under a directory.
///
/// Files are processed in parallel; reports come back sorted by path.
pub fn annotate_directory(dir: &Path) -> Result<Vec<LessonReport>> {
    if !dir.is_dir() {
        return Err(Error::Msg(format!(
            "Lessons path does not exist or is not a directory: {}",
            dir.display()
        )));
    }

    let start = Instant::now();
    let paths: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
        .map(|e| e.path().to_path_buf())
        .collect();

    let mut reports: Vec<LessonReport> = paths
        .par_iter()
        .filter_map(|path| match annotate_file(path) {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!("Skipping unreadable lesson {}: {e}", path.display());
                None
            }
        })
        .collect();

    reports.sort_by(|a, b| a.path.cmp(&b.path));

    let count = reports.len();
    let elapsed = start.elapsed();
    tracing::info!("Annotated {count} lessons in {elapsed:?}");

    Ok(reports)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_annotate_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lesson1.txt");
        std::fs::write(&path, "Read 'John 3:16' aloud.").unwrap();

        let report = annotate_file(&path).unwrap();
        assert_eq!(report.citation_count, 1);
        assert_eq!(report.segments.len(), 3);
    }

    #[test]
    fn test_annotate_missing_file() {
        assert!(annotate_file(Path::new("/nonexistent/lesson.txt")).is_err());
    }

    #[test]
    fn test_annotate_directory_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "'John 3:16'").unwrap();
        std::fs::write(dir.path().join("a.txt"), "no citations here").unwrap();
        std::fs::write(dir.path().join("notes.md"), "'Romans 3:23'").unwrap();

        let nested = dir.path().join("week2");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("c.txt"), "'''Romans 3:23''' again").unwrap();

        let reports = annotate_directory(dir.path()).unwrap();
        assert_eq!(reports.len(), 3);
        assert!(reports.windows(2).all(|w| w[0].path <= w[1].path));
        assert_eq!(reports.iter().map(|r| r.citation_count).sum::<usize>(), 2);
    }

    #[test]
    fn test_annotate_directory_missing() {
        assert!(annotate_directory(Path::new("/nonexistent/lessons")).is_err());
    }
}
