//! Basic database query operations

use super::{models::*, schema::StatsDatabase};
use crate::cli::types::{GameId, Season, TeamId};
use anyhow::Result;
use rusqlite::{params, Row};
use std::time::{SystemTime, UNIX_EPOCH};

impl StatsDatabase {
    /// Insert or update a game's metadata
    pub fn upsert_game(&mut self, game: &GameRow) -> Result<()> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        self.conn.execute(
            "INSERT OR REPLACE INTO games
             (game_id, season, game_date, game_type,
              home_team_id, home_abbrev, away_team_id, away_abbrev, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                game.game_id.as_u32(),
                game.season.as_u32(),
                game.game_date,
                game.game_type,
                game.home_team_id.as_u32(),
                game.home_abbrev,
                game.away_team_id.as_u32(),
                game.away_abbrev,
                now
            ],
        )?;
        Ok(())
    }

    /// Get a game's metadata if it has been stored
    pub fn get_game(&self, game_id: GameId) -> Result<Option<GameRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT game_id, season, game_date, game_type,
                    home_team_id, home_abbrev, away_team_id, away_abbrev
             FROM games
             WHERE game_id = ?",
        )?;

        let result = stmt.query_row(params![game_id.as_u32()], |row| {
            Ok(GameRow {
                game_id: GameId::new(row.get(0)?),
                season: Season::new(row.get(1)?),
                game_date: row.get(2)?,
                game_type: row.get(3)?,
                home_team_id: TeamId::new(row.get(4)?),
                home_abbrev: row.get(5)?,
                away_team_id: TeamId::new(row.get(6)?),
                away_abbrev: row.get(7)?,
            })
        });

        match result {
            Ok(game) => Ok(Some(game)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace all stored blocks for a game with a freshly reconstructed set
    ///
    /// Runs inside a transaction so a failed insert never leaves the game
    /// half-written.
    pub fn replace_pp_blocks(&mut self, game_id: GameId, blocks: &[PpBlockRow]) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "DELETE FROM pp_blocks WHERE game_id = ?",
            params![game_id.as_u32()],
        )?;

        for block in blocks {
            tx.execute(
                "INSERT INTO pp_blocks
                 (game_id, team_id, start_seconds, end_seconds, strength, goals_for, ended_by)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                params![
                    block.game_id.as_u32(),
                    block.team_id.as_u32(),
                    block.start_seconds,
                    block.end_seconds,
                    block.strength.to_string(),
                    block.goals_for,
                    block.ended_by.to_string(),
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Get all blocks for a game, ordered by start time
    pub fn get_pp_blocks(&self, game_id: GameId) -> Result<Vec<PpBlockRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT game_id, team_id, start_seconds, end_seconds, strength, goals_for, ended_by
             FROM pp_blocks
             WHERE game_id = ?
             ORDER BY start_seconds",
        )?;

        let rows = stmt.query_map(params![game_id.as_u32()], |row| self.row_to_pp_block(row))?;

        let mut blocks = Vec::new();
        for row in rows {
            blocks.push(row?);
        }
        Ok(blocks)
    }

    /// Check whether a game already has reconstructed blocks stored
    pub fn has_blocks_for_game(&self, game_id: GameId) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pp_blocks WHERE game_id = ?",
            params![game_id.as_u32()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Clear all data from the database (useful for starting fresh)
    pub fn clear_all_data(&mut self) -> Result<()> {
        // Delete blocks first due to foreign key
        self.conn.execute("DELETE FROM pp_blocks", [])?;
        self.conn.execute("DELETE FROM games", [])?;
        Ok(())
    }

    /// Helper to convert a database row to a PpBlockRow
    pub(crate) fn row_to_pp_block(&self, row: &Row) -> rusqlite::Result<PpBlockRow> {
        let strength_str: String = row.get(4)?;
        let ended_by_str: String = row.get(6)?;

        let strength = strength_str.parse().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;
        let ended_by = ended_by_str.parse().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(PpBlockRow {
            game_id: GameId::new(row.get(0)?),
            team_id: TeamId::new(row.get(1)?),
            start_seconds: row.get(2)?,
            end_seconds: row.get(3)?,
            strength,
            goals_for: row.get(5)?,
            ended_by,
        })
    }
}
