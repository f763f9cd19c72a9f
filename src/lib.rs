//! Rimporter - Create a Spotify playlist from a plain-text tracklist
//!
//! This library parses `Title - Artist` lines, resolves each entry through
//! Spotify search and assembles the matches into a new playlist.

/// Client modules for interacting with the remote catalog
pub mod clients;
/// Credentials and account settings
pub mod config;
/// Track resolution and playlist assembly
pub mod importer;
/// Search queries and match policies
pub mod matching;
/// Run summary and JSON export
pub mod report;
/// Tracklist parsing
pub mod tracklist;
