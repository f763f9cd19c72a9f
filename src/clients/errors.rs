use rspotify::ClientError;
use rspotify::model::IdError;
use thiserror::Error;

/// Errors that end an import run.
///
/// Unparseable lines and unmatched entries are not errors: they are
/// collected into the [`crate::report::ImportReport`] instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Spotify error: {0}")]
    SpotifyError(#[from] ClientError),

    #[error("Invalid Spotify id: {0}")]
    InvalidId(#[from] IdError),

    #[error("Spotify API unexpected response: {0}")]
    UnexpectedResponse(String),

    // The playlist is left on the account as it is, there is no rollback
    #[error(
        "Failed to attach tracks to playlist {playlist_id} after {attached} of {total} tracks: {source}"
    )]
    AttachmentError {
        playlist_id: String,
        attached: usize,
        total: usize,
        source: Box<Error>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write report: {0}")]
    ReportError(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
