use std::path::PathBuf;

use futures::stream::{StreamExt, TryStreamExt, iter};
use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    clients::{
        MusicCatalog,
        entities::{PlaylistDetails, PlaylistHandle},
        errors::{Error, Result},
    },
    config::Config,
    matching::{
        FirstHit, MatchConfidence, MatchPolicy, MatchStrategy, SEARCH_LIMIT, search_queries,
    },
    report::{ImportReport, Unresolved},
    tracklist::{InputEntry, parse_tracklist},
};

/// Spotify accepts at most this many items per add call.
pub const ADD_BATCH_SIZE: usize = 100;

/// An entry mapped to a concrete catalog track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTrack {
    /// Source line of the entry
    pub line: usize,
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    /// Query that produced the match
    pub query: String,
    pub confidence: MatchConfidence,
}

/// Outcome of resolving one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(ResolvedTrack),
    NotFound(Unresolved),
}

/// Everything needed to create and fill one playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRequest {
    pub details: PlaylistDetails,
    /// Track ids in playlist order
    pub track_ids: Vec<String>,
}

/// Inputs of one command line run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportJob {
    pub input: PathBuf,
    pub details: PlaylistDetails,
    pub strategy: MatchStrategy,
    pub fallback_queries: bool,
    pub concurrency: usize,
}

/// Run an import end to end.
///
/// Configuration is checked and the tracklist read before `connect` builds
/// the catalog, so neither failure costs a network call.
pub async fn run_import<L, F, C>(lookup: L, connect: F, job: &ImportJob) -> Result<ImportReport>
where
    L: Fn(&str) -> Option<String>,
    F: FnOnce(&Config) -> C,
    C: MusicCatalog,
{
    info!("Building config ...");
    let config = Config::from_lookup(lookup)?;
    let text = tokio::fs::read_to_string(&job.input).await?;

    info!("Authorizing client ...");
    let catalog = connect(&config);
    // CLI prompt may be shown on this call
    catalog.authorize().await?;

    ImporterBuilder::new(catalog, config)
        .policy(job.strategy)
        .fallback_queries(job.fallback_queries)
        .concurrency(job.concurrency)
        .build()
        .import(&job.details, &text)
        .await
}

/// Builds an [`Importer`]. Anything left unset gets its default.
pub struct ImporterBuilder<C: MusicCatalog> {
    catalog: C,
    config: Config,
    policy: Option<Box<dyn MatchPolicy>>,
    fallback_queries: bool,
    concurrency: Option<usize>,
    batch_size: Option<usize>,
}

impl<C: MusicCatalog> ImporterBuilder<C> {
    pub fn new(catalog: C, config: Config) -> Self {
        Self {
            catalog,
            config,
            policy: None,
            fallback_queries: true,
            concurrency: None, // Sequential resolution unless asked otherwise
            batch_size: None,
        }
    }

    #[must_use]
    pub fn policy(mut self, policy: impl MatchPolicy + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    #[must_use]
    pub fn fallback_queries(mut self, enabled: bool) -> Self {
        self.fallback_queries = enabled;
        self
    }

    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    #[must_use]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn build(self) -> Importer<C> {
        Importer {
            catalog: self.catalog,
            config: self.config,
            policy: self.policy.unwrap_or_else(|| Box::new(FirstHit)),
            fallback_queries: self.fallback_queries,
            concurrency: self.concurrency.unwrap_or(1).max(1),
            batch_size: self.batch_size.unwrap_or(ADD_BATCH_SIZE).clamp(1, ADD_BATCH_SIZE),
        }
    }
}

/// Resolves tracklist entries and assembles the playlist.
pub struct Importer<C: MusicCatalog> {
    catalog: C,
    config: Config,
    policy: Box<dyn MatchPolicy>,
    fallback_queries: bool,
    concurrency: usize,
    batch_size: usize,
}

impl<C: MusicCatalog> Importer<C> {
    /// Parse `text`, resolve every entry, then create and fill the playlist.
    ///
    /// The playlist is created even if nothing resolved.
    pub async fn import(&self, details: &PlaylistDetails, text: &str) -> Result<ImportReport> {
        info!("Parsing tracklist ...");
        let tracklist = parse_tracklist(text);
        for failure in &tracklist.failures {
            debug!("Skipping line {}: {}", failure.line, failure.reason);
        }
        info!(
            "Parsed {} entries, skipped {} lines",
            tracklist.entries.len(),
            tracklist.failures.len()
        );

        info!("Searching tracks ...");
        let (added, unresolved) = self.resolve_all(&tracklist.entries).await?;
        info!("Found {}/{} tracks", added.len(), tracklist.entries.len());

        let request = PlaylistRequest {
            details: details.clone(),
            track_ids: added.iter().map(|t| t.id.clone()).collect(),
        };
        let playlist = self.build_playlist(&request).await?;

        Ok(ImportReport {
            playlist,
            added,
            parse_failures: tracklist.failures,
            unresolved,
        })
    }

    /// Resolve entries, keeping input order whatever the concurrency.
    ///
    /// The first remote error aborts the whole run.
    pub async fn resolve_all(
        &self,
        entries: &[(usize, InputEntry)],
    ) -> Result<(Vec<ResolvedTrack>, Vec<Unresolved>)> {
        // `buffered` yields in input order, not completion order
        let resolutions: Vec<Resolution> = iter(entries)
            .map(|(line, entry)| self.resolve(*line, entry))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();
        for resolution in resolutions {
            match resolution {
                Resolution::Matched(track) => resolved.push(track),
                Resolution::NotFound(missing) => unresolved.push(missing),
            }
        }
        Ok((resolved, unresolved))
    }

    /// Try each query for `entry` until the match policy accepts a candidate.
    pub async fn resolve(&self, line: usize, entry: &InputEntry) -> Result<Resolution> {
        let queries = search_queries(entry, self.fallback_queries);

        for query in &queries {
            let candidates = self.catalog.search_tracks(query, SEARCH_LIMIT).await?;
            debug!("Query {query:?} returned {} candidates", candidates.len());

            let Some(selection) = self.policy.select(entry, &candidates) else {
                continue;
            };
            let Some(track) = candidates.into_iter().nth(selection.index) else {
                warn!("Match policy picked a missing candidate for {query:?}");
                continue;
            };

            debug!("Line {line}: '{entry}' -> {} ({:?})", track.id, selection.confidence);
            return Ok(Resolution::Matched(ResolvedTrack {
                line,
                id: track.id,
                name: track.name,
                artists: track.artists,
                query: query.clone(),
                confidence: selection.confidence,
            }));
        }

        debug!("Line {line}: '{entry}' not found");
        Ok(Resolution::NotFound(Unresolved {
            line,
            entry: entry.clone(),
            queries,
        }))
    }

    /// Create the playlist for the configured user, then attach the tracks in batches.
    pub async fn build_playlist(&self, request: &PlaylistRequest) -> Result<PlaylistHandle> {
        let playlist = self
            .catalog
            .create_playlist(&self.config.username, &request.details)
            .await?;
        info!("Created playlist '{}' ({})", playlist.name, playlist.id);

        let total = request.track_ids.len();
        let mut attached = 0;
        for batch in request.track_ids.chunks(self.batch_size) {
            if let Err(e) = self.catalog.add_tracks(&playlist.id, batch).await {
                warn!(
                    "Playlist {} left with {attached} of {total} tracks",
                    playlist.id
                );
                return Err(Error::AttachmentError {
                    playlist_id: playlist.id.clone(),
                    attached,
                    total,
                    source: Box::new(e),
                });
            }
            attached += batch.len();
            debug!("Attached {attached}/{total} tracks to {}", playlist.id);
        }

        Ok(playlist)
    }
}
