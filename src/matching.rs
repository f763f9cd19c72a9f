//! Search query construction and candidate selection.

use serde::Serialize;

use crate::{clients::entities::CatalogTrack, tracklist::InputEntry};

/// How many candidates are requested per search query.
pub const SEARCH_LIMIT: u32 = 5;

const FEATURING_MARKERS: [&str; 4] = [" feat. ", " feat ", " ft. ", " featuring "];

/// How a candidate was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchConfidence {
    /// Highest ranked search result, no further check
    TopHit,
    /// Title and one of the artists both appear in the entry
    Exact,
}

/// A chosen candidate, by position in the search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub confidence: MatchConfidence,
}

/// Strategy picking one candidate out of a ranked search result.
///
/// Returning `None` rejects every candidate, which the importer reports
/// as not found.
pub trait MatchPolicy: Send + Sync {
    fn select(&self, entry: &InputEntry, candidates: &[CatalogTrack]) -> Option<Selection>;
}

/// First result wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstHit;

impl MatchPolicy for FirstHit {
    fn select(&self, _entry: &InputEntry, candidates: &[CatalogTrack]) -> Option<Selection> {
        (!candidates.is_empty()).then_some(Selection {
            index: 0,
            confidence: MatchConfidence::TopHit,
        })
    }
}

/// Prefer a candidate whose title and artist both appear in the entry,
/// otherwise fall back to the first result.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreferExact;

impl MatchPolicy for PreferExact {
    fn select(&self, entry: &InputEntry, candidates: &[CatalogTrack]) -> Option<Selection> {
        let haystack = entry.to_string().to_lowercase();
        let exact = candidates.iter().position(|c| {
            haystack.contains(&c.name.to_lowercase())
                && c
                    .artists
                    .iter()
                    .any(|a| haystack.contains(&a.to_lowercase()))
        });

        match exact {
            Some(index) => Some(Selection {
                index,
                confidence: MatchConfidence::Exact,
            }),
            None => FirstHit.select(entry, candidates),
        }
    }
}

/// Built-in policies, selectable from the command line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    #[default]
    FirstHit,
    PreferExact,
}

impl MatchPolicy for MatchStrategy {
    fn select(&self, entry: &InputEntry, candidates: &[CatalogTrack]) -> Option<Selection> {
        match self {
            Self::FirstHit => FirstHit.select(entry, candidates),
            Self::PreferExact => PreferExact.select(entry, candidates),
        }
    }
}

/// Queries to try for an entry, most specific first.
///
/// Without fallbacks only the `title artist` query is returned. With them,
/// looser variants follow: featuring clauses dropped, punctuation dropped,
/// and finally the bare title.
pub fn search_queries(entry: &InputEntry, fallbacks: bool) -> Vec<String> {
    let primary = collapse_whitespace(&format!("{} {}", entry.title, entry.artist()));
    let mut queries = vec![primary.clone()];
    if !fallbacks {
        return queries;
    }

    let candidates = [
        strip_featuring(&primary),
        strip_punctuation(&primary),
        entry.title.clone(),
    ];
    for query in candidates {
        if !query.is_empty() && !queries.contains(&query) {
            queries.push(query);
        }
    }
    queries
}

fn strip_featuring(query: &str) -> String {
    let lower = query.to_lowercase();
    let mut out = query.to_string();
    // Lowercasing can shift byte offsets for non-ASCII text, so only cut
    // when both strings line up
    if lower.len() == query.len() {
        for marker in FEATURING_MARKERS {
            if let Some(pos) = lower.find(marker) {
                out = format!("{} {}", &query[..pos], &query[pos + marker.len()..]);
                break;
            }
        }
    }
    collapse_whitespace(&out)
}

fn strip_punctuation(query: &str) -> String {
    let kept: String = query
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    collapse_whitespace(&kept)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
