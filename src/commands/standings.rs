//! League table and per-team history

use crate::{
    ranking::{standings, team_history, GameweekResult, TeamStanding},
    FantasyError, Result,
};

use super::{
    common::{format_history, format_standings},
    CommandContext,
};

/// Every stored lineup scored and summed per team
pub fn league_table(ctx: &CommandContext) -> Result<Vec<TeamStanding>> {
    let lineups = ctx.db.all_lineups()?;
    let stats = ctx.stats_for(&lineups)?;
    Ok(standings(&ctx.engine, &lineups, &stats))
}

/// Handle the standings command
pub fn handle_standings(ctx: &CommandContext, as_json: bool) -> Result<()> {
    let table = league_table(ctx)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else if table.is_empty() {
        println!("No lineups stored yet.");
    } else {
        print!("{}", format_standings(&table));
    }

    Ok(())
}

/// A team's gameweek-by-gameweek breakdowns
pub fn history_for(ctx: &CommandContext, team_name: &str) -> Result<Vec<GameweekResult>> {
    let lineups = ctx.db.lineups_for_team(team_name)?;
    if lineups.is_empty() {
        return Err(FantasyError::TeamNotFound {
            team: team_name.to_string(),
        });
    }
    let stats = ctx.stats_for(&lineups)?;
    Ok(team_history(&ctx.engine, team_name, &lineups, &stats))
}

/// Handle the history command
pub fn handle_history(ctx: &CommandContext, team_name: &str, as_json: bool) -> Result<()> {
    let history = history_for(ctx, team_name)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&history)?);
    } else {
        print!("{}", format_history(team_name, &history));
    }

    Ok(())
}
