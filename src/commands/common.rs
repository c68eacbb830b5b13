//! Common utilities and helper functions shared across commands.
//!
//! This module contains shared functionality that would otherwise be duplicated
//! across different command implementations.

use reqwest::Client;
use serde_json::Value;

use crate::{
    cli::types::{GameId, Season},
    nhl::{
        http::{get_play_by_play_cached, get_schedule_cached, CacheStatus},
        pp::PowerPlayBlock,
        types::PlayByPlay,
    },
    storage::{GameRow, PpBlockRow, StatsDatabase},
    GameDate, Result, TeamId,
};

/// Context containing common resources needed by most commands
pub struct CommandContext {
    pub client: Client,
    pub db: StatsDatabase,
}

impl CommandContext {
    /// Initialize common command context with database and HTTP client
    pub fn new(verbose: bool) -> Result<Self> {
        if verbose {
            println!("Connecting to database...");
        }
        let db = StatsDatabase::new()?;
        let client = Client::new();

        Ok(Self { client, db })
    }
}

/// Resolve an optional season argument to a concrete season
pub fn resolve_season(season: Option<Season>) -> Season {
    season.unwrap_or_default()
}

/// Fetch a game's play-by-play feed and display appropriate message
pub async fn fetch_play_by_play_with_message(
    client: &Client,
    game_id: GameId,
    refresh: bool,
    verbose: bool,
) -> Result<Value> {
    let (payload, cache_status) = get_play_by_play_cached(client, game_id, refresh).await?;

    if verbose {
        match cache_status {
            CacheStatus::Hit => {
                println!("✓ Game {} play-by-play loaded (from cache)", game_id);
            }
            CacheStatus::Miss => {
                println!("✓ Game {} play-by-play fetched (cache miss)", game_id);
            }
            CacheStatus::Refreshed => {
                println!("✓ Game {} play-by-play fetched (refreshed)", game_id);
            }
        }
    }

    Ok(payload)
}

/// Fetch a day's schedule feed and display appropriate message
pub async fn fetch_schedule_with_message(
    client: &Client,
    date: &GameDate,
    refresh: bool,
    verbose: bool,
) -> Result<Value> {
    let (payload, cache_status) = get_schedule_cached(client, date, refresh).await?;

    if verbose {
        match cache_status {
            CacheStatus::Hit => {
                println!("✓ Schedule for {} loaded (from cache)", date);
            }
            CacheStatus::Miss => {
                println!("✓ Schedule for {} fetched (cache miss)", date);
            }
            CacheStatus::Refreshed => {
                println!("✓ Schedule for {} fetched (refreshed)", date);
            }
        }
    }

    Ok(payload)
}

/// Build the games-table row from a play-by-play payload
pub fn game_row_from_pbp(pbp: &PlayByPlay) -> GameRow {
    GameRow {
        game_id: pbp.id,
        season: pbp.season,
        game_date: pbp.game_date.clone(),
        game_type: pbp.game_type,
        home_team_id: pbp.home_team.id,
        home_abbrev: pbp.home_team.abbrev.clone(),
        away_team_id: pbp.away_team.id,
        away_abbrev: pbp.away_team.abbrev.clone(),
    }
}

/// Convert reconstructed blocks to their persisted form
pub fn block_rows(game_id: GameId, blocks: &[PowerPlayBlock]) -> Vec<PpBlockRow> {
    blocks
        .iter()
        .map(|b| PpBlockRow {
            game_id,
            team_id: b.team,
            start_seconds: b.start,
            end_seconds: b.end,
            strength: b.strength,
            goals_for: b.goals_for,
            ended_by: b.ended_by,
        })
        .collect()
}

/// Persist a game's metadata and its reconstructed blocks
pub fn persist_reconstruction(
    db: &mut StatsDatabase,
    pbp: &PlayByPlay,
    blocks: &[PowerPlayBlock],
) -> Result<()> {
    db.upsert_game(&game_row_from_pbp(pbp))?;
    db.replace_pp_blocks(pbp.id, &block_rows(pbp.id, blocks))?;
    Ok(())
}

/// Resolve a team ID to its abbreviation, falling back to the numeric ID
pub fn team_label(pbp: &PlayByPlay, team_id: TeamId) -> String {
    let abbrev = if team_id == pbp.home_team.id {
        pbp.home_team.abbrev.as_deref()
    } else if team_id == pbp.away_team.id {
        pbp.away_team.abbrev.as_deref()
    } else {
        None
    };
    abbrev
        .map(str::to_string)
        .unwrap_or_else(|| team_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nhl::pp::{BlockEnd, Strength};
    use crate::nhl::types::TeamInfo;

    fn sample_pbp() -> PlayByPlay {
        PlayByPlay {
            id: GameId::new(2025020204),
            season: Season::new(20252026),
            game_type: 2,
            game_date: Some("2025-11-09".to_string()),
            home_team: TeamInfo {
                id: TeamId::new(10),
                abbrev: Some("TOR".to_string()),
            },
            away_team: TeamInfo {
                id: TeamId::new(1),
                abbrev: Some("NJD".to_string()),
            },
            plays: vec![],
        }
    }

    #[test]
    fn test_resolve_season_default() {
        assert_eq!(resolve_season(None), Season::default());
        assert_eq!(
            resolve_season(Some(Season::new(20242025))),
            Season::new(20242025)
        );
    }

    #[test]
    fn test_game_row_from_pbp() {
        let row = game_row_from_pbp(&sample_pbp());
        assert_eq!(row.game_id.as_u32(), 2025020204);
        assert_eq!(row.home_abbrev.as_deref(), Some("TOR"));
        assert_eq!(row.away_team_id.as_u32(), 1);
    }

    #[test]
    fn test_block_rows_conversion() {
        let blocks = vec![PowerPlayBlock {
            team: TeamId::new(10),
            start: 300,
            end: 420,
            strength: Strength::FiveOnFour,
            goals_for: 1,
            ended_by: BlockEnd::Expired,
        }];

        let rows = block_rows(GameId::new(2025020204), &blocks);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].start_seconds, 300);
        assert_eq!(rows[0].end_seconds, 420);
        assert_eq!(rows[0].strength, Strength::FiveOnFour);
    }

    #[test]
    fn test_team_label() {
        let pbp = sample_pbp();
        assert_eq!(team_label(&pbp, TeamId::new(10)), "TOR");
        assert_eq!(team_label(&pbp, TeamId::new(1)), "NJD");
        assert_eq!(team_label(&pbp, TeamId::new(99)), "99");
    }
}
