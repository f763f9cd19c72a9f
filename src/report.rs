use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::{
    clients::{entities::PlaylistHandle, errors::Result},
    importer::ResolvedTrack,
    tracklist::{InputEntry, LineFailure},
};

/// An entry no search result was accepted for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unresolved {
    pub line: usize,
    pub entry: InputEntry,
    /// Every query that was tried, in order
    pub queries: Vec<String>,
}

/// Outcome of one import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub playlist: PlaylistHandle,
    /// Tracks attached to the playlist, in playlist order
    pub added: Vec<ResolvedTrack>,
    pub parse_failures: Vec<LineFailure>,
    pub unresolved: Vec<Unresolved>,
}

impl ImportReport {
    /// Skipped lines plus unmatched entries.
    pub fn warning_count(&self) -> usize {
        self.parse_failures.len() + self.unresolved.len()
    }

    pub fn log_summary(&self) {
        info!(
            "Playlist '{}' ({}) created with {} tracks",
            self.playlist.name,
            self.playlist.url.as_deref().unwrap_or(&self.playlist.id),
            self.added.len()
        );

        for failure in &self.parse_failures {
            warn!(
                "Line {} skipped ({}): {:?}",
                failure.line, failure.reason, failure.content
            );
        }
        for missing in &self.unresolved {
            warn!("Line {} not found: {}", missing.line, missing.entry);
        }

        if self.warning_count() > 0 {
            warn!(
                "{} warnings: {} lines skipped, {} tracks not found. Add missing tracks manually.",
                self.warning_count(),
                self.parse_failures.len(),
                self.unresolved.len()
            );
        }
    }

    /// Write the report as pretty printed JSON.
    pub async fn write_json(&self, path: &Path) -> Result<()> {
        let body = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(path, body).await?;
        info!("Wrote import report to {path:?}");
        Ok(())
    }
}
