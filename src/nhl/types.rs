//! Serde models for the `api-web.nhle.com` gamecenter and schedule payloads.
//!
//! Only the fields the reconstruction and display layers need are modeled;
//! everything else in the payloads is ignored.

use crate::cli::types::{GameId, PlayerId, Season, TeamId};
use serde::{Deserialize, Serialize};


/// Game types as used in NHL game IDs and payloads.
pub const GAME_TYPE_PRESEASON: u8 = 1;
pub const GAME_TYPE_REGULAR: u8 = 2;
pub const GAME_TYPE_PLAYOFFS: u8 = 3;

/// Root of `/gamecenter/{id}/play-by-play`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayByPlay {
    pub id: GameId,
    pub season: Season,
    #[serde(rename = "gameType")]
    pub game_type: u8,
    #[serde(rename = "gameDate", default)]
    pub game_date: Option<String>,
    #[serde(rename = "homeTeam")]
    pub home_team: TeamInfo,
    #[serde(rename = "awayTeam")]
    pub away_team: TeamInfo,
    #[serde(default)]
    pub plays: Vec<Play>,
}

/// Team block embedded in game payloads.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamInfo {
    pub id: TeamId,
    #[serde(default)]
    pub abbrev: Option<String>,
}

/// One entry in the ordered play-by-play event log.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Play {
    #[serde(rename = "eventId", default)]
    pub event_id: Option<u32>,
    #[serde(rename = "sortOrder", default)]
    pub sort_order: Option<u32>,
    #[serde(rename = "periodDescriptor")]
    pub period_descriptor: PeriodDescriptor,
    /// Elapsed time in the period, `"MM:SS"`.
    #[serde(rename = "timeInPeriod")]
    pub time_in_period: String,
    /// Event discriminator: `"penalty"`, `"goal"`, `"period-end"`, ...
    #[serde(rename = "typeDescKey")]
    pub type_desc_key: String,
    #[serde(default)]
    pub details: Option<PlayDetails>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PeriodDescriptor {
    pub number: u32,
    /// `"REG"`, `"OT"`, or `"SO"`.
    #[serde(rename = "periodType", default)]
    pub period_type: Option<String>,
}

/// Event details; penalty and goal events populate different subsets.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayDetails {
    /// Team the event belongs to: penalized team for penalties,
    /// scoring team for goals.
    #[serde(rename = "eventOwnerTeamId", default)]
    pub event_owner_team_id: Option<TeamId>,
    /// Penalty class: `"MIN"`, `"BEN"`, `"MAJ"`, `"MIS"`, `"GMIS"`, `"MAT"`, `"PS"`.
    #[serde(rename = "typeCode", default)]
    pub type_code: Option<String>,
    /// Infraction key, e.g. `"tripping"`.
    #[serde(rename = "descKey", default)]
    pub desc_key: Option<String>,
    /// Penalty length in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(rename = "committedByPlayerId", default)]
    pub committed_by_player_id: Option<PlayerId>,
    #[serde(rename = "drawnByPlayerId", default)]
    pub drawn_by_player_id: Option<PlayerId>,
    #[serde(rename = "scoringPlayerId", default)]
    pub scoring_player_id: Option<PlayerId>,
}

/// Root of `/schedule/{date}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Schedule {
    #[serde(rename = "gameWeek", default)]
    pub game_week: Vec<ScheduleDay>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleDay {
    pub date: String,
    #[serde(default)]
    pub games: Vec<ScheduleGame>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleGame {
    pub id: GameId,
    #[serde(rename = "gameType")]
    pub game_type: u8,
    #[serde(rename = "gameState", default)]
    pub game_state: Option<String>,
    #[serde(rename = "homeTeam")]
    pub home_team: TeamInfo,
    #[serde(rename = "awayTeam")]
    pub away_team: TeamInfo,
    #[serde(rename = "startTimeUTC", default)]
    pub start_time_utc: Option<String>,
}

impl ScheduleGame {
    /// Final games are the only ones with a complete event log.
    pub fn is_final(&self) -> bool {
        matches!(self.game_state.as_deref(), Some("OFF") | Some("FINAL"))
    }
}

impl Schedule {
    /// Games scheduled on exactly `date` (the feed returns a whole week).
    pub fn games_on<'a>(&'a self, date: &'a str) -> impl Iterator<Item = &'a ScheduleGame> + 'a {
        self.game_week
            .iter()
            .filter(move |day| day.date == date)
            .flat_map(|day| day.games.iter())
    }
}
