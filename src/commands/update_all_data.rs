//! Bulk reconstruction over a date range.
//!
//! Walks every day in the range, finds the final games on each day's
//! schedule, fetches their play-by-play feeds, reconstructs power-play
//! blocks in parallel, and persists everything.

use rayon::prelude::*;

use crate::{
    error::NhlError,
    nhl::{
        pp::{reconstruct_power_plays, PowerPlayBlock},
        types::{PlayByPlay, Schedule},
    },
    GameDate, GameId, Result,
};

use super::common::{
    fetch_play_by_play_with_message, fetch_schedule_with_message, persist_reconstruction,
    CommandContext,
};

/// Configuration parameters for the update-all-data command
#[derive(Debug)]
pub struct UpdateAllDataParams {
    pub start_date: GameDate,
    pub end_date: GameDate,
    pub verbose: bool,
    pub refresh: bool,
}

/// Reconstruct and persist power-play blocks for every final game in a
/// date range (inclusive on both ends).
///
/// Games that already have stored blocks are skipped unless `refresh` is
/// set. Unfinished games are always skipped; their event logs are still
/// changing.
pub async fn handle_update_all_data(params: UpdateAllDataParams) -> Result<()> {
    // ISO dates compare correctly as strings
    if params.end_date.as_str() < params.start_date.as_str() {
        return Err(NhlError::InvalidDate {
            value: format!(
                "end date {} is before start date {}",
                params.end_date, params.start_date
            ),
        });
    }

    let mut ctx = CommandContext::new(params.verbose)?;

    if params.verbose {
        println!(
            "Updating power-play data from {} through {}",
            params.start_date, params.end_date
        );
    }

    let mut total_games = 0usize;
    let mut total_blocks = 0usize;
    let mut total_skipped = 0usize;

    let mut date = params.start_date.clone();
    loop {
        if params.verbose {
            println!("\n--- Processing {} ---", date);
        } else {
            println!("Processing {}...", date);
        }

        let payload =
            fetch_schedule_with_message(&ctx.client, &date, params.refresh, params.verbose).await?;
        let schedule: Schedule = serde_json::from_value(payload)?;

        let mut final_games: Vec<GameId> = Vec::new();
        for game in schedule.games_on(date.as_str()) {
            if game.is_final() {
                final_games.push(game.id);
            } else {
                total_skipped += 1;
                if params.verbose {
                    println!(
                        "⚠ Skipping game {} ({})",
                        game.id,
                        game.game_state.as_deref().unwrap_or("unknown state")
                    );
                }
            }
        }

        // Fetch sequentially, reconstruct in parallel below
        let mut fetched: Vec<PlayByPlay> = Vec::new();
        for game_id in final_games {
            if !params.refresh && ctx.db.has_blocks_for_game(game_id)? {
                if params.verbose {
                    println!("✓ Game {} already stored, skipping", game_id);
                }
                continue;
            }

            let payload =
                fetch_play_by_play_with_message(&ctx.client, game_id, params.refresh, params.verbose)
                    .await?;
            fetched.push(serde_json::from_value(payload)?);
        }

        let reconstructed: Vec<(PlayByPlay, Vec<PowerPlayBlock>)> = fetched
            .into_par_iter()
            .map(|pbp| reconstruct_power_plays(&pbp).map(|blocks| (pbp, blocks)))
            .collect::<Result<_>>()?;

        for (pbp, blocks) in &reconstructed {
            persist_reconstruction(&mut ctx.db, pbp, blocks)?;
            total_games += 1;
            total_blocks += blocks.len();

            if params.verbose {
                println!("✓ Game {} stored ({} blocks)", pbp.id, blocks.len());
            }
        }

        if date == params.end_date {
            break;
        }
        date = date.succ();
    }

    println!("\n✓ Data update complete!");
    println!("Total games processed: {}", total_games);
    println!("Total blocks stored: {}", total_blocks);
    if total_skipped > 0 {
        println!("Unfinished games skipped: {}", total_skipped);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_construction() {
        let params = UpdateAllDataParams {
            start_date: "2025-10-07".parse().unwrap(),
            end_date: "2025-10-09".parse().unwrap(),
            verbose: true,
            refresh: false,
        };
        assert_eq!(params.start_date.as_str(), "2025-10-07");
        assert_eq!(params.end_date.as_str(), "2025-10-09");
        assert!(params.verbose);
    }

    #[test]
    fn test_date_range_walk() {
        // Mirror the loop logic: walk from start to end inclusive
        let start: GameDate = "2025-10-30".parse().unwrap();
        let end: GameDate = "2025-11-02".parse().unwrap();

        let mut visited = Vec::new();
        let mut date = start;
        loop {
            visited.push(date.as_str().to_string());
            if date == end {
                break;
            }
            date = date.succ();
        }

        assert_eq!(
            visited,
            vec!["2025-10-30", "2025-10-31", "2025-11-01", "2025-11-02"]
        );
    }

    #[test]
    fn test_single_day_range() {
        let start: GameDate = "2025-11-09".parse().unwrap();
        let end = start.clone();

        let mut count = 0;
        let mut date = start;
        loop {
            count += 1;
            if date == end {
                break;
            }
            date = date.succ();
        }
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_rejects_inverted_range() {
        let params = UpdateAllDataParams {
            start_date: "2025-11-09".parse().unwrap(),
            end_date: "2025-11-08".parse().unwrap(),
            verbose: false,
            refresh: false,
        };

        let result = handle_update_all_data(params).await;
        assert!(matches!(result, Err(NhlError::InvalidDate { .. })));
    }
}
