use async_trait::async_trait;

use crate::clients::{
    entities::{CatalogTrack, PlaylistDetails, PlaylistHandle},
    errors::Result,
};

/// Remote capabilities the importer relies on.
///
/// [`crate::clients::SpotifyClient`] is the production implementation; tests
/// use the generated `MockMusicCatalog`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MusicCatalog: Send + Sync {
    /// Establish an authenticated session. May prompt on the terminal.
    async fn authorize(&self) -> Result<()>;

    /// Search tracks, best ranked first. An empty vector means no match.
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<CatalogTrack>>;

    /// Create an empty playlist owned by `user_id`.
    async fn create_playlist(
        &self,
        user_id: &str,
        details: &PlaylistDetails,
    ) -> Result<PlaylistHandle>;

    /// Append tracks to a playlist, in the given order.
    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()>;
}
