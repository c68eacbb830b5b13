//! Database schema and connection management

use crate::error::NhlError;
use anyhow::Result;
use dirs::cache_dir;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Database connection manager for game and power-play data
pub struct StatsDatabase {
    pub(crate) conn: Connection,
}

impl StatsDatabase {
    /// Create a new database connection and ensure tables exist
    pub fn new() -> Result<Self> {
        let db_path = Self::database_path()?;

        // Ensure the cache directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::with_path(&db_path)
    }

    /// Open a database at an explicit path (used by integration tests)
    pub fn with_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Open an in-memory database
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Get the path to the database file
    fn database_path() -> Result<PathBuf> {
        let cache_dir = cache_dir().ok_or_else(|| NhlError::Cache {
            message: "Could not determine cache directory".to_string(),
        })?;
        Ok(cache_dir.join("nhl-fantasy").join("games.db"))
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        // Create games table
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS games (
                game_id INTEGER PRIMARY KEY,
                season INTEGER NOT NULL,
                game_date TEXT,
                game_type INTEGER NOT NULL,
                home_team_id INTEGER NOT NULL,
                home_abbrev TEXT,
                away_team_id INTEGER NOT NULL,
                away_abbrev TEXT,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        // Create pp_blocks table
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS pp_blocks (
                game_id INTEGER NOT NULL,
                team_id INTEGER NOT NULL,
                start_seconds INTEGER NOT NULL,
                end_seconds INTEGER NOT NULL,
                strength TEXT NOT NULL,
                goals_for INTEGER NOT NULL,
                ended_by TEXT NOT NULL,
                PRIMARY KEY (game_id, team_id, start_seconds),
                FOREIGN KEY (game_id) REFERENCES games(game_id)
            )",
            [],
        )?;

        // Create indexes for performance
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_pp_blocks_team
             ON pp_blocks(team_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_games_season
             ON games(season)",
            [],
        )?;

        Ok(())
    }
}
