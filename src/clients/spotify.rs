use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;

use crate::{
    clients::{
        catalog::MusicCatalog,
        entities::{CatalogTrack, PlaylistDetails, PlaylistHandle},
        errors::{Error, Result},
    },
    config::Config,
};
use rspotify::{
    AuthCodeSpotify, Config as RSpotifyConfig, Credentials, OAuth,
    model::{FullTrack, PlayableId, PlaylistId, SearchResult, SearchType, TrackId, UserId},
    prelude::*,
    scopes,
};

// Local files in search results carry no id and cannot be added to a playlist
fn catalog_track(track: FullTrack) -> Option<CatalogTrack> {
    let id = track.id?;
    Some(CatalogTrack {
        id: id.id().to_string(),
        uri: id.uri(),
        name: track.name,
        artists: track.artists.into_iter().map(|a| a.name).collect(),
    })
}

/// `rspotify` backed [`MusicCatalog`] using the authorization code flow.
pub struct SpotifyClient {
    pub spotify: AuthCodeSpotify,
}

impl SpotifyClient {
    // Create a SpotifyClient from explicit configuration. No network call happens here.
    pub fn from_config(config: &Config) -> Self {
        let creds = Credentials::new(&config.client_id, &config.client_secret);
        let oauth = OAuth {
            redirect_uri: config.redirect_uri.clone(),
            scopes: scopes!("playlist-modify-public", "playlist-modify-private"),
            ..Default::default()
        };

        // Set up token caching in a default cache directory
        let cache_path = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp")) // Fallback to /tmp if cache directory can't be determined
            .join(".rimporter_token_cache");

        let spotify = AuthCodeSpotify::with_config(
            creds,
            oauth,
            RSpotifyConfig {
                token_cached: true,
                token_refreshing: true,
                cache_path,
                ..Default::default()
            },
        );

        Self { spotify }
    }
}

#[async_trait]
impl MusicCatalog for SpotifyClient {
    // Authorize the Spotify client via CLI prompt and OAuth flow
    // This function requires the `cli` feature enabled.
    async fn authorize(&self) -> Result<()> {
        debug!("Starting Spotify authorization ...");
        let url = self.spotify.get_authorize_url(false)?;
        // Uses the cached token when there is one, prompts otherwise
        self.spotify.prompt_for_token(&url).await?;
        let user = self.spotify.me().await?;
        debug!("Authenticated as user: {:?}", user.display_name);
        Ok(())
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<CatalogTrack>> {
        let result = self
            .spotify
            .search(query, SearchType::Track, None, None, Some(limit), None)
            .await?;

        match result {
            SearchResult::Tracks(page) => {
                Ok(page.items.into_iter().filter_map(catalog_track).collect())
            }
            other => Err(Error::UnexpectedResponse(format!(
                "Expected tracks for query {query:?}, got {other:?}"
            ))),
        }
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        details: &PlaylistDetails,
    ) -> Result<PlaylistHandle> {
        let user = UserId::from_id(user_id)?;
        let playlist = self
            .spotify
            .user_playlist_create(
                user,
                &details.name,
                Some(details.public),
                None,
                details.description.as_deref(),
            )
            .await?;

        Ok(PlaylistHandle {
            id: playlist.id.id().to_string(),
            name: playlist.name,
            url: playlist.external_urls.get("spotify").cloned(),
        })
    }

    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        let playlist = PlaylistId::from_id(playlist_id)?;
        let items = track_ids
            .iter()
            .map(|id| TrackId::from_id(id.as_str()).map(PlayableId::Track))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let snapshot = self
            .spotify
            .playlist_add_items(playlist, items, None)
            .await?;
        debug!(
            "Added {} items to playlist {playlist_id}, snapshot {}",
            track_ids.len(),
            snapshot.snapshot_id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::test_config;

    #[test]
    fn test_from_config_does_not_touch_network() {
        let client = SpotifyClient::from_config(&test_config());
        assert_eq!(client.spotify.creds.id, "client-id");
        assert_eq!(
            client.spotify.oauth.redirect_uri,
            "http://127.0.0.1:8888/callback"
        );
        assert!(client.spotify.oauth.scopes.contains("playlist-modify-private"));
        assert!(client.spotify.config.token_cached);
    }
}
