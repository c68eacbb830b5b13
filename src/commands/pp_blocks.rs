//! Power-play reconstruction for a single game.
//!
//! Fetches the game's play-by-play event log (through the response cache),
//! replays the penalty and goal events to recover every stretch of numerical
//! advantage, persists the blocks, and prints them.

use crate::{
    cli::types::GameId,
    nhl::{pp::reconstruct_power_plays, types::PlayByPlay},
    util::format_mm_ss,
    Result,
};

use super::common::{
    block_rows, fetch_play_by_play_with_message, persist_reconstruction, team_label,
    CommandContext,
};

/// Configuration parameters for the pp-blocks command
#[derive(Debug)]
pub struct PpBlocksParams {
    pub game_id: GameId,
    pub as_json: bool,
    pub refresh: bool,
    pub debug: bool,
}

/// Reconstruct, persist, and print the power-play blocks of one game.
///
/// # Errors
///
/// Returns an error if the NHL API is unavailable, the payload cannot be
/// deserialized, or the database write fails.
pub async fn handle_pp_blocks(params: PpBlocksParams) -> Result<()> {
    let verbose = !params.as_json;
    let mut ctx = CommandContext::new(verbose)?;

    if verbose {
        println!("Fetching play-by-play for game {}...", params.game_id);
    }
    let payload =
        fetch_play_by_play_with_message(&ctx.client, params.game_id, params.refresh, verbose)
            .await?;

    // Debug: print one raw play to inspect the upstream structure
    if params.debug {
        if let Some(first_play) = payload
            .get("plays")
            .and_then(|plays| plays.as_array())
            .and_then(|arr| arr.first())
        {
            eprintln!("DEBUG: Raw play structure:");
            eprintln!("{}", serde_json::to_string_pretty(first_play)?);
            eprintln!("--- End raw data ---");
        }
    }

    let pbp: PlayByPlay = serde_json::from_value(payload)?;
    let blocks = reconstruct_power_plays(&pbp)?;

    persist_reconstruction(&mut ctx.db, &pbp, &blocks)?;

    if params.as_json {
        let rows = block_rows(pbp.id, &blocks);
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "\nPower-play blocks for game {} ({} @ {}):",
        pbp.id,
        pbp.away_team.abbrev.as_deref().unwrap_or("?"),
        pbp.home_team.abbrev.as_deref().unwrap_or("?"),
    );

    if blocks.is_empty() {
        println!("  (no power-play time in this game)");
        return Ok(());
    }

    for block in &blocks {
        println!(
            "  {:<4} {} - {}  {}  {:>3}s  {} goal{}  ({})",
            team_label(&pbp, block.team),
            format_mm_ss(block.start),
            format_mm_ss(block.end),
            block.strength,
            block.duration(),
            block.goals_for,
            if block.goals_for == 1 { "" } else { "s" },
            block.ended_by,
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nhl::pp::{BlockEnd, PowerPlayBlock, Strength};
    use crate::TeamId;

    #[test]
    fn test_params_construction() {
        let params = PpBlocksParams {
            game_id: GameId::new(2025020204),
            as_json: false,
            refresh: true,
            debug: false,
        };
        assert_eq!(params.game_id.as_u32(), 2025020204);
        assert!(params.refresh);
    }

    #[test]
    fn test_block_line_formatting() {
        let block = PowerPlayBlock {
            team: TeamId::new(10),
            start: 300,
            end: 420,
            strength: Strength::FiveOnFour,
            goals_for: 1,
            ended_by: BlockEnd::Expired,
        };

        let line = format!(
            "{:<4} {} - {}  {}  {:>3}s  {} goal{}  ({})",
            "TOR",
            format_mm_ss(block.start),
            format_mm_ss(block.end),
            block.strength,
            block.duration(),
            block.goals_for,
            if block.goals_for == 1 { "" } else { "s" },
            block.ended_by,
        );
        assert_eq!(line, "TOR  05:00 - 07:00  5v4  120s  1 goal  (expired)");
    }
}
