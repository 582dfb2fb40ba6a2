//! `versemark` CLI - annotate lesson text with scripture citations.
//!
//! Usage:
//!   `versemark <lesson.txt> [--json] [--verses <verses.json>] [--lesson <id>]`
//!   `versemark --lessons <dir> [--json]`
//!
//! Reads a lesson text file (`-` for stdin), extracts its citations, and
//! prints the renderable segments. With a verse library, each reference is
//! also resolved to its verse text.

use std::env;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use versemark::config::Config;
use versemark::error::{Error, Result};
use versemark::lesson::annotate_directory;
use versemark::segment::{parse_text_with_references, Segment, SegmentKind};
use versemark::verses::{find_verse_text, suggest_closest, CandidateVerse, VerseLibrary};

/// Parsed command-line arguments.
struct Args {
    /// Lesson file to annotate (`-` for stdin).
    file: Option<PathBuf>,
    /// Emit JSON instead of the pretty listing.
    json: bool,
    /// Verse library path override.
    verses: Option<PathBuf>,
    /// Lesson id for candidate lookup (defaults to the file stem).
    lesson_id: Option<String>,
    /// Batch mode: annotate every .txt file under this directory.
    lessons_dir: Option<PathBuf>,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <lesson.txt> [--json] [--verses <verses.json>] [--lesson <id>]\n       {program} --lessons <dir> [--json]"
    )
}

fn parse_args(raw: &[String]) -> Result<Args> {
    let program = raw.first().map_or("versemark", String::as_str);
    let mut args = Args {
        file: None,
        json: false,
        verses: None,
        lesson_id: None,
        lessons_dir: None,
    };

    let mut it = raw.iter().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--verses" => {
                let value = it.next().ok_or_else(|| Error::Msg(usage(program)))?;
                args.verses = Some(PathBuf::from(value));
            }
            "--lesson" => {
                let value = it.next().ok_or_else(|| Error::Msg(usage(program)))?;
                args.lesson_id = Some(value.clone());
            }
            "--lessons" => {
                let value = it.next().ok_or_else(|| Error::Msg(usage(program)))?;
                args.lessons_dir = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(Error::Msg(usage(program))),
            _ if args.file.is_none() => args.file = Some(PathBuf::from(arg)),
            _ => return Err(Error::Msg(usage(program))),
        }
    }

    Ok(args)
}

/// Read the lesson text from a file, or stdin when the path is `-`.
fn read_lesson(path: &std::path::Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(Error::from)?;
        Ok(text)
    } else {
        fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))
    }
}

/// Print the pretty (non-JSON) listing for one lesson's segments.
fn print_segments(segments: &[Segment], candidates: &[CandidateVerse]) {
    for segment in segments {
        match segment.kind {
            SegmentKind::Text => println!("text      | {}", segment.content),
            SegmentKind::Reference => {
                let Some(reference) = segment.reference.as_ref() else {
                    continue;
                };
                match find_verse_text(reference, candidates) {
                    Some(text) => println!("reference | {} -> {text}", segment.content),
                    None => {
                        print!("reference | {}", segment.content);
                        if let Some(near) = suggest_closest(reference, candidates) {
                            print!("  (no verse; closest: {} {}:{})", near.book_code, near.chapter, near.verse);
                        }
                        println!();
                    }
                }
            }
        }
    }
}

fn run() -> Result<()> {
    let raw: Vec<String> = env::args().collect();
    let args = parse_args(&raw)?;
    let config = Config::load()?;

    // Batch mode: annotate a directory of lessons. Without a file argument,
    // a configured lessons directory also selects batch mode.
    let batch_dir = args
        .lessons_dir
        .clone()
        .or_else(|| args.file.is_none().then(|| config.lessons_path.clone()).flatten());
    if let Some(dir) = batch_dir {
        let reports = annotate_directory(&dir)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&reports).map_err(|e| Error::Msg(e.to_string()))?);
        } else {
            for report in &reports {
                println!("{}: {} citation(s)", report.path.display(), report.citation_count);
            }
        }
        return Ok(());
    }

    let Some(file) = args.file else {
        return Err(Error::Msg(usage("versemark")));
    };

    let text = read_lesson(&file)?;
    let segments = parse_text_with_references(&text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&segments).map_err(|e| Error::Msg(e.to_string()))?);
        return Ok(());
    }

    // Resolve verse text when a library is available
    let library = args
        .verses
        .or_else(|| config.verses_path.clone())
        .map(|path| VerseLibrary::load(&path))
        .transpose()?;

    let lesson_id = args.lesson_id.or_else(|| {
        file.file_stem()
            .and_then(|s| s.to_str())
            .map(String::from)
    });

    let candidates: &[CandidateVerse] = match (&library, &lesson_id) {
        (Some(lib), Some(id)) => lib.candidates(id),
        _ => &[],
    };

    print_segments(&segments, candidates);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
