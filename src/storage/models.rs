//! Data models for the storage layer

use crate::cli::types::{GameId, Season, TeamId};
use crate::nhl::pp::{BlockEnd, Strength};
use serde::{Deserialize, Serialize};

/// Game metadata stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRow {
    pub game_id: GameId,
    pub season: Season,
    pub game_date: Option<String>,
    pub game_type: u8,
    pub home_team_id: TeamId,
    pub home_abbrev: Option<String>,
    pub away_team_id: TeamId,
    pub away_abbrev: Option<String>,
}

/// One reconstructed power-play block as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PpBlockRow {
    pub game_id: GameId,
    pub team_id: TeamId,
    pub start_seconds: u32,
    pub end_seconds: u32,
    pub strength: Strength,
    pub goals_for: u32,
    pub ended_by: BlockEnd,
}

impl PpBlockRow {
    /// Block length in game seconds
    pub fn duration(&self) -> u32 {
        self.end_seconds - self.start_seconds
    }
}

/// Season-level power-play summary for one team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamPpSummary {
    pub team: String,
    pub season: Season,
    pub games: u32,
    /// Distinct advantage runs (contiguous blocks count once)
    pub opportunities: u32,
    pub goals: u32,
    pub total_pp_seconds: u32,
    /// Goals per opportunity, as a percentage
    pub conversion_pct: f64,
    pub avg_block_seconds: f64,
}
