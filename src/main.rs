//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use hoops_fantasy::{
    cli::{Commands, HoopsFantasy},
    commands::{
        lineups::handle_submit_lineup,
        score::{handle_score, ScoreParams},
        standings::{handle_history, handle_standings},
        stats_data::{handle_import_stats, handle_stats},
        sync::handle_sync,
        traits::handle_traits,
        CommandContext,
    },
    Result,
};

/// Log to stderr so JSON output on stdout stays clean.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose {
        "hoops_fantasy=debug,warn"
    } else {
        "hoops_fantasy=info,warn"
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    let app = HoopsFantasy::parse();
    init_tracing(app.global.verbose)?;

    let mut ctx = CommandContext::new(&app.global)?;

    match app.command {
        Commands::Score {
            team,
            gameweek,
            lineup,
            stats,
            json,
        } => handle_score(
            &ctx,
            ScoreParams {
                team,
                gameweek,
                lineup,
                stats_path: stats,
                as_json: json,
            },
        )?,

        Commands::Standings { json } => handle_standings(&ctx, json)?,

        Commands::History { team, json } => handle_history(&ctx, &team, json)?,

        Commands::ImportStats { file, gameweek } => handle_import_stats(&mut ctx, &file, gameweek)?,

        Commands::SubmitLineup {
            team,
            gameweek,
            lineup,
        } => {
            handle_submit_lineup(&mut ctx, &team, gameweek, lineup)?;
        }

        Commands::Sync {
            gameweek,
            api_url,
            api_key,
            stats_only,
        } => handle_sync(&mut ctx, gameweek, api_url, api_key, stats_only).await?,

        Commands::Stats {
            gameweek,
            top,
            json,
        } => handle_stats(&ctx, gameweek, top, json)?,

        Commands::Traits => handle_traits(&ctx)?,
    }

    Ok(())
}
