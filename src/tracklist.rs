//! Parsing of `Title - Artist[, Artist...]` tracklists.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

// A dash only separates with whitespace on both sides, so hyphenated names survive
const DASHES: [char; 3] = ['-', '\u{2013}', '\u{2014}'];

// Lines copied from file listings often keep the extension
const AUDIO_EXTENSIONS: [&str; 4] = [".mp3", ".wav", ".flac", ".m4a"];

/// One parsed line: a title and the artists credited on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputEntry {
    pub title: String,
    pub artists: Vec<String>,
    /// Artist segment exactly as written, comma spacing included
    artist_text: String,
}

impl InputEntry {
    pub fn new(title: impl Into<String>, artists: &[&str]) -> Self {
        InputEntry {
            title: title.into(),
            artists: artists.iter().map(|a| (*a).to_string()).collect(),
            artist_text: artists.join(", "),
        }
    }

    /// Artists as they were written on the line.
    pub fn artist(&self) -> &str {
        &self.artist_text
    }
}

impl fmt::Display for InputEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.artist())
    }
}

/// Why a line could not be turned into an [`InputEntry`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseFailure {
    #[error("empty line")]
    Empty,
    #[error("no ' - ' separator between title and artist")]
    MissingSeparator,
    #[error("more than one ' - ' separator, cannot tell title from artist")]
    AmbiguousSeparator,
    #[error("title is empty")]
    MissingTitle,
    #[error("artist is empty")]
    MissingArtist,
}

/// A skipped line, kept for the run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineFailure {
    /// 1-based line number in the input
    pub line: usize,
    pub content: String,
    pub reason: ParseFailure,
}

/// Result of parsing a whole input file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tracklist {
    /// Parsed entries with their 1-based line numbers, in file order
    pub entries: Vec<(usize, InputEntry)>,
    pub failures: Vec<LineFailure>,
}

/// Parse a single line.
pub fn parse(line: &str) -> Result<InputEntry, ParseFailure> {
    let normalized = normalize(line);
    if normalized.is_empty() {
        return Err(ParseFailure::Empty);
    }

    let (idx, len) = match separators(&normalized).as_slice() {
        [] => return Err(ParseFailure::MissingSeparator),
        [hit] => *hit,
        _ => return Err(ParseFailure::AmbiguousSeparator),
    };

    let title = normalized[..idx].trim();
    if title.is_empty() {
        return Err(ParseFailure::MissingTitle);
    }
    let artist_text = normalized[idx + len..].trim();
    let artists: Vec<String> = artist_text
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(ToString::to_string)
        .collect();
    if artists.is_empty() {
        return Err(ParseFailure::MissingArtist);
    }

    Ok(InputEntry {
        title: title.to_string(),
        artists,
        artist_text: artist_text.to_string(),
    })
}

// Byte offset and length of every standalone dash. Neighbouring dashes
// share their whitespace, so `a - - b` yields two hits.
fn separators(line: &str) -> Vec<(usize, usize)> {
    line.char_indices()
        .filter(|&(i, c)| {
            DASHES.contains(&c)
                && line[..i].chars().next_back().is_none_or(char::is_whitespace)
                && line[i + c.len_utf8()..]
                    .chars()
                    .next()
                    .is_none_or(char::is_whitespace)
        })
        .map(|(i, c)| (i, c.len_utf8()))
        .collect()
}

/// Parse every line of `text`. Failures are collected, never fatal.
pub fn parse_tracklist(text: &str) -> Tracklist {
    let mut tracklist = Tracklist::default();
    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        match parse(raw) {
            Ok(entry) => tracklist.entries.push((line, entry)),
            Err(reason) => tracklist.failures.push(LineFailure {
                line,
                content: raw.to_string(),
                reason,
            }),
        }
    }
    tracklist
}

fn normalize(line: &str) -> String {
    let mut line = line.trim();
    for ext in AUDIO_EXTENSIONS {
        if let Some(cut) = line.len().checked_sub(ext.len())
            && line.is_char_boundary(cut)
            && line[cut..].eq_ignore_ascii_case(ext)
        {
            line = &line[..cut];
            break;
        }
    }
    line.replace('_', " ").trim().to_string()
}
