use clap::Parser;
use eyre::Context;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use yt_reverse::config::Credentials;
use yt_reverse::reversal::{Disposition, RetryPolicy};
use yt_reverse::youtube_api::YouTubeClient;

/// Reverse a YouTube playlist into a second, pre-existing playlist.
///
/// Reads every item of the source playlist, reverses the order in memory,
/// and appends the result to the destination playlist. The destination is
/// appended to, never cleared.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Playlist ID to read (the gobbledeegook in the playlist URL).
    source_playlist: String,
    /// Playlist ID to append the reversed order to. Must already exist
    /// and be writable by the configured bearer token.
    destination_playlist: String,
    /// JSON file holding `api_key` and `access_token`.
    #[arg(long, default_value = "credentials.json")]
    credentials: PathBuf,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stdout().is_terminal())
        .init();

    let cli = Cli::parse();

    let credentials = Credentials::load(&cli.credentials)
        .await
        .context("load credentials")?;
    let client = YouTubeClient::new(credentials);

    let report = yt_reverse::reverse_playlist(
        &client,
        &cli.source_playlist,
        &cli.destination_playlist,
        &RetryPolicy::default(),
    )
    .await
    .context("reverse playlist")?;

    println!(
        "{} items fetched, {} appended, {} skipped",
        report.fetched,
        report.insertions.inserted(),
        report.insertions.skipped()
    );
    for outcome in &report.insertions.outcomes {
        if let Disposition::Skipped { reason } = &outcome.disposition {
            println!("skipped {}: {}", outcome.resource.video_id, reason);
        }
    }

    Ok(())
}
