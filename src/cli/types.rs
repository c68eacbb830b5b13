//! Type-safe wrappers for NHL API identifiers.

use crate::error::{NhlError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for NHL game IDs.
///
/// NHL game IDs encode season, game type, and game number
/// (e.g. `2025020204` is game 204 of the 2025-26 regular season).
///
/// # Examples
///
/// ```rust
/// use nhl_fantasy::GameId;
///
/// let game_id = GameId::new(2025020204);
/// assert_eq!(game_id.as_u32(), 2025020204);
/// assert_eq!(game_id.to_string(), "2025020204");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub u32);

impl GameId {
    /// Create a new GameId from a u32 value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the underlying u32 value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GameId {
    type Err = NhlError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Type-safe wrapper for NHL player IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = NhlError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Type-safe wrapper for NHL team IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u32);

impl TeamId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe wrapper for NHL season identifiers.
///
/// The NHL encodes a season as both calendar years concatenated,
/// e.g. `20252026` for the 2025-26 season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Season(pub u32);

impl Season {
    pub fn new(season: u32) -> Self {
        Self(season)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// First calendar year of the season (`2025` for `20252026`).
    pub fn start_year(&self) -> u32 {
        self.0 / 10000
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(20252026)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = NhlError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || NhlError::InvalidSeason {
            value: s.to_string(),
        };

        let raw: u32 = s.parse().map_err(|_| invalid())?;
        let start = raw / 10000;
        let end = raw % 10000;
        if s.len() != 8 || end != start + 1 {
            return Err(invalid());
        }

        Ok(Self(raw))
    }
}

/// Three-letter NHL team abbreviation (`TOR`, `NJD`, `VGK`).
///
/// Uppercased on construction; two to four ASCII letters accepted to cover
/// historical codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamAbbrev(String);

impl TeamAbbrev {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamAbbrev {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamAbbrev {
    type Err = NhlError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.to_uppercase();
        let ok = (2..=4).contains(&upper.len()) && upper.chars().all(|c| c.is_ascii_alphabetic());
        if !ok {
            return Err(NhlError::InvalidTeam {
                value: s.to_string(),
            });
        }

        Ok(Self(upper))
    }
}

/// A calendar date in the `YYYY-MM-DD` form the NHL schedule API expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameDate(String);

impl GameDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Next calendar day, for walking a date range.
    ///
    /// Grid arithmetic on the string form; month/year rollover uses fixed
    /// month lengths with the standard leap-year rule.
    pub fn succ(&self) -> GameDate {
        let year: u32 = self.0[0..4].parse().unwrap_or(2025);
        let month: u32 = self.0[5..7].parse().unwrap_or(1);
        let day: u32 = self.0[8..10].parse().unwrap_or(1);

        let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
        let days_in_month = match month {
            2 => {
                if leap {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        };

        let (year, month, day) = if day < days_in_month {
            (year, month, day + 1)
        } else if month < 12 {
            (year, month + 1, 1)
        } else {
            (year + 1, 1, 1)
        };

        GameDate(format!("{:04}-{:02}-{:02}", year, month, day))
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GameDate {
    type Err = NhlError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || NhlError::InvalidDate {
            value: s.to_string(),
        };

        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(invalid());
        }
        let year: u32 = s[0..4].parse().map_err(|_| invalid())?;
        let month: u32 = s[5..7].parse().map_err(|_| invalid())?;
        let day: u32 = s[8..10].parse().map_err(|_| invalid())?;
        if year < 1900 || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(invalid());
        }

        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_id_new() {
        let id = GameId::new(2025020204);
        assert_eq!(id.as_u32(), 2025020204);
    }

    #[test]
    fn test_game_id_display() {
        let id = GameId::new(2025020204);
        assert_eq!(format!("{}", id), "2025020204");
    }

    #[test]
    fn test_game_id_from_str_valid() {
        let id: GameId = "2025020204".parse().unwrap();
        assert_eq!(id.as_u32(), 2025020204);
    }

    #[test]
    fn test_game_id_from_str_invalid() {
        let result: Result<GameId> = "invalid".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_game_id_serde() {
        let id = GameId::new(2025020204);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: GameId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_player_id_roundtrip() {
        let id: PlayerId = "8478402".parse().unwrap();
        assert_eq!(id.as_u32(), 8478402);
        assert_eq!(id.to_string(), "8478402");
    }

    #[test]
    fn test_team_id_display() {
        assert_eq!(TeamId::new(10).to_string(), "10");
    }

    #[test]
    fn test_season_default() {
        assert_eq!(Season::default().as_u32(), 20252026);
    }

    #[test]
    fn test_season_start_year() {
        assert_eq!(Season::new(20252026).start_year(), 2025);
    }

    #[test]
    fn test_season_from_str_valid() {
        let season: Season = "20242025".parse().unwrap();
        assert_eq!(season.as_u32(), 20242025);
    }

    #[test]
    fn test_season_from_str_rejects_mismatched_years() {
        let result: Result<Season> = "20242026".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_season_from_str_rejects_short_form() {
        let result: Result<Season> = "2025".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_team_abbrev_uppercases() {
        let team: TeamAbbrev = "tor".parse().unwrap();
        assert_eq!(team.as_str(), "TOR");
    }

    #[test]
    fn test_team_abbrev_rejects_invalid() {
        assert!("T".parse::<TeamAbbrev>().is_err());
        assert!("TORON".parse::<TeamAbbrev>().is_err());
        assert!("T0R".parse::<TeamAbbrev>().is_err());
    }

    #[test]
    fn test_game_date_valid() {
        let date: GameDate = "2025-11-09".parse().unwrap();
        assert_eq!(date.as_str(), "2025-11-09");
    }

    #[test]
    fn test_game_date_rejects_invalid() {
        assert!("2025/11/09".parse::<GameDate>().is_err());
        assert!("2025-13-01".parse::<GameDate>().is_err());
        assert!("2025-00-01".parse::<GameDate>().is_err());
        assert!("25-11-09".parse::<GameDate>().is_err());
    }

    #[test]
    fn test_game_date_succ_mid_month() {
        let date: GameDate = "2025-11-09".parse().unwrap();
        assert_eq!(date.succ().as_str(), "2025-11-10");
    }

    #[test]
    fn test_game_date_succ_month_rollover() {
        let date: GameDate = "2025-11-30".parse().unwrap();
        assert_eq!(date.succ().as_str(), "2025-12-01");
    }

    #[test]
    fn test_game_date_succ_year_rollover() {
        let date: GameDate = "2025-12-31".parse().unwrap();
        assert_eq!(date.succ().as_str(), "2026-01-01");
    }

    #[test]
    fn test_game_date_succ_leap_february() {
        let date: GameDate = "2024-02-28".parse().unwrap();
        assert_eq!(date.succ().as_str(), "2024-02-29");

        let date: GameDate = "2025-02-28".parse().unwrap();
        assert_eq!(date.succ().as_str(), "2025-03-01");
    }
}
