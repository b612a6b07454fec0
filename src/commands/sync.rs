//! Pull a gameweek from the hosted league database into the local one

use tracing::info;

use crate::{
    cli::types::Gameweek,
    config::{resolve_api_key, resolve_api_url},
    remote::RemoteClient,
    Result,
};

use super::CommandContext;

/// What a sync wrote locally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub stat_rows: usize,
    pub lineups: usize,
}

/// Fetch statistics (and, unless `stats_only`, lineups) for a gameweek
/// and store them. Remote rows replace local rows with the same key.
pub async fn sync_gameweek(
    ctx: &mut CommandContext,
    client: &RemoteClient,
    gameweek: Gameweek,
    stats_only: bool,
) -> Result<SyncSummary> {
    let mut summary = SyncSummary::default();

    let stats = client.fetch_gameweek_stats(gameweek).await?;
    if !stats.is_empty() {
        summary.stat_rows = ctx.db.import_gameweek(&stats)?;
    }

    if !stats_only {
        for record in client.fetch_lineups(gameweek).await? {
            ctx.db.upsert_lineup(&record)?;
            summary.lineups += 1;
        }
    }

    info!(%gameweek, stat_rows = summary.stat_rows, lineups = summary.lineups, "sync complete");
    Ok(summary)
}

/// Handle the sync command
pub async fn handle_sync(
    ctx: &mut CommandContext,
    gameweek: Gameweek,
    api_url: Option<String>,
    api_key: Option<String>,
    stats_only: bool,
) -> Result<()> {
    let api_url = resolve_api_url(api_url)?;
    let api_key = resolve_api_key(api_key);

    if ctx.verbose {
        println!("Fetching gameweek {} from {}...", gameweek, api_url);
    }

    let client = RemoteClient::new(&api_url, api_key.as_deref())?;
    // tarpaulin::skip - HTTP call, tested via wiremock in integration tests
    let summary = sync_gameweek(ctx, &client, gameweek, stats_only).await?;

    println!(
        "✓ Synced gameweek {}: {} stat rows, {} lineups",
        gameweek, summary.stat_rows, summary.lineups
    );
    Ok(())
}
