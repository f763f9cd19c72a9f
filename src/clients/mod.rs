/// Remote catalog abstraction used by the importer
pub mod catalog;
/// Data entities for catalog tracks and playlists
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Spotify API client
pub mod spotify;

pub use catalog::MusicCatalog;
pub use spotify::SpotifyClient;
