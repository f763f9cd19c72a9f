use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use rimporter::{
    clients::{SpotifyClient, entities::PlaylistDetails, errors::Result},
    importer::{ImportJob, run_import},
    matching::MatchStrategy,
};

const DEFAULT_PLAYLIST_NAME: &str = "Imported tracks";

#[derive(Parser)]
#[command(name = "rimporter")]
#[command(version, about = "Create a Spotify playlist from a plain-text tracklist", long_about = None)]
struct Cli {
    /// Text file with one `Title - Artist[, Artist...]` per line
    input: PathBuf,

    /// Playlist name, defaults to the input file name
    #[arg(short, long)]
    name: Option<String>,

    /// Playlist description
    #[arg(short, long)]
    description: Option<String>,

    /// Make the playlist public
    #[arg(long)]
    public: bool,

    /// How to pick a track among search results
    #[arg(long, value_enum, default_value_t = Policy::FirstHit)]
    match_policy: Policy,

    /// Only search for `title artist`, never looser queries
    #[arg(long)]
    no_fallback: bool,

    /// Number of searches in flight
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Write a JSON summary of the run to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Policy {
    FirstHit,
    PreferExact,
}

impl From<Policy> for MatchStrategy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::FirstHit => MatchStrategy::FirstHit,
            Policy::PreferExact => MatchStrategy::PreferExact,
        }
    }
}

impl Cli {
    fn job(&self) -> ImportJob {
        ImportJob {
            input: self.input.clone(),
            details: self.playlist_details(),
            strategy: self.match_policy.into(),
            fallback_queries: !self.no_fallback,
            concurrency: self.concurrency,
        }
    }

    fn playlist_details(&self) -> PlaylistDetails {
        PlaylistDetails {
            name: self
                .name
                .clone()
                .unwrap_or_else(|| default_playlist_name(&self.input)),
            description: self.description.clone(),
            public: self.public,
        }
    }
}

fn default_playlist_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_PLAYLIST_NAME.to_string())
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    // A missing .env file is fine, variables may come from the shell
    dotenvy::dotenv().ok();

    let report = run_import(
        |key| std::env::var(key).ok(),
        SpotifyClient::from_config,
        &cli.job(),
    )
    .await?;

    report.log_summary();
    if let Some(path) = &cli.report {
        report.write_json(path).await?;
    }
    Ok(())
}
