//! Season-level power-play summary for one team.

use crate::{
    cli::types::{Season, TeamAbbrev},
    util::{format_mm_ss, format_percent},
    Result,
};

use super::common::{resolve_season, CommandContext};

/// Configuration parameters for the team-pp-summary command
#[derive(Debug)]
pub struct TeamSummaryParams {
    pub team: TeamAbbrev,
    pub season: Option<Season>,
    pub as_json: bool,
}

/// Summarize a team's stored power-play blocks for a season.
///
/// Reads only the local database; run `update-all-data` first to populate it.
pub async fn handle_team_summary(params: TeamSummaryParams) -> Result<()> {
    let verbose = !params.as_json;
    let season = resolve_season(params.season);
    let ctx = CommandContext::new(verbose)?;

    let Some(summary) = ctx.db.team_pp_summary(&params.team, season)? else {
        println!("No stored games for {} in {}.", params.team, season);
        println!("Run `nhl-fantasy get update-all-data` to populate the database.");
        return Ok(());
    };

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("\nPower play: {} in {}", summary.team, summary.season);
    println!("  Games:            {}", summary.games);
    println!("  Opportunities:    {}", summary.opportunities);
    println!("  Goals:            {}", summary.goals);
    println!(
        "  Conversion:       {}",
        format_percent(summary.conversion_pct)
    );
    println!(
        "  Total PP time:    {}",
        format_mm_ss(summary.total_pp_seconds)
    );
    println!(
        "  Avg block length: {:.0}s",
        summary.avg_block_seconds
    );

    Ok(())
}
