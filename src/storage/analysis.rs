//! Season-level aggregation over stored power-play blocks

use super::{models::TeamPpSummary, schema::StatsDatabase};
use crate::cli::types::{Season, TeamAbbrev};
use anyhow::Result;
use rusqlite::params;

impl StatsDatabase {
    /// Summarize a team's power play across every stored game of a season
    ///
    /// Returns `None` when the team has no stored games for the season.
    /// Opportunities count distinct advantage runs: consecutive blocks that
    /// touch (a 5v4 flowing into a 5v3) belong to the same opportunity.
    pub fn team_pp_summary(
        &self,
        team: &TeamAbbrev,
        season: Season,
    ) -> Result<Option<TeamPpSummary>> {
        let games: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM games
             WHERE season = ? AND (home_abbrev = ? OR away_abbrev = ?)",
            params![season.as_u32(), team.as_str(), team.as_str()],
            |row| row.get(0),
        )?;

        if games == 0 {
            return Ok(None);
        }

        let mut stmt = self.conn.prepare(
            "SELECT b.game_id, b.start_seconds, b.end_seconds, b.goals_for
             FROM pp_blocks b
             JOIN games g ON b.game_id = g.game_id
             WHERE g.season = ?
               AND ((g.home_team_id = b.team_id AND g.home_abbrev = ?)
                 OR (g.away_team_id = b.team_id AND g.away_abbrev = ?))
             ORDER BY b.game_id, b.start_seconds",
        )?;

        let rows = stmt.query_map(
            params![season.as_u32(), team.as_str(), team.as_str()],
            |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, u32>(3)?,
                ))
            },
        )?;

        let mut blocks = 0u32;
        let mut opportunities = 0u32;
        let mut goals = 0u32;
        let mut total_seconds = 0u32;
        let mut prev: Option<(u32, u32)> = None; // (game_id, end_seconds)

        for row in rows {
            let (game_id, start, end, goals_for) = row?;

            // A block that starts where the previous one ended continues the
            // same opportunity (strength change, or a goal with time left)
            let continues = matches!(prev, Some((g, e)) if g == game_id && e == start);
            if !continues {
                opportunities += 1;
            }

            blocks += 1;
            goals += goals_for;
            total_seconds += end - start;
            prev = Some((game_id, end));
        }

        let conversion_pct = if opportunities > 0 {
            f64::from(goals) / f64::from(opportunities) * 100.0
        } else {
            0.0
        };
        let avg_block_seconds = if blocks > 0 {
            f64::from(total_seconds) / f64::from(blocks)
        } else {
            0.0
        };

        Ok(Some(TeamPpSummary {
            team: team.as_str().to_string(),
            season,
            games,
            opportunities,
            goals,
            total_pp_seconds: total_seconds,
            conversion_pct,
            avg_block_seconds,
        }))
    }
}
