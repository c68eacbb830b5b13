//! Unit tests for storage functionality

use super::*;
use crate::cli::types::{GameId, Season, TeamId};
use crate::nhl::pp::{BlockEnd, Strength};

fn create_test_db() -> StatsDatabase {
    let db = StatsDatabase::new_in_memory().unwrap();
    db.conn.execute("PRAGMA foreign_keys = ON", []).unwrap();
    db
}

fn test_game(game_id: u32) -> GameRow {
    GameRow {
        game_id: GameId::new(game_id),
        season: Season::new(20252026),
        game_date: Some("2025-11-09".to_string()),
        game_type: 2,
        home_team_id: TeamId::new(10),
        home_abbrev: Some("TOR".to_string()),
        away_team_id: TeamId::new(1),
        away_abbrev: Some("NJD".to_string()),
    }
}

fn test_block(game_id: u32, team_id: u32, start: u32, end: u32, goals: u32) -> PpBlockRow {
    PpBlockRow {
        game_id: GameId::new(game_id),
        team_id: TeamId::new(team_id),
        start_seconds: start,
        end_seconds: end,
        strength: Strength::FiveOnFour,
        goals_for: goals,
        ended_by: BlockEnd::Expired,
    }
}

#[test]
fn test_database_creation() {
    let _db = create_test_db();
    // Should not panic - database creation successful
}

#[test]
fn test_upsert_game() {
    let mut db = create_test_db();

    let result = db.upsert_game(&test_game(2025020204));
    assert!(result.is_ok());

    // Update same game with different metadata
    let mut updated = test_game(2025020204);
    updated.home_abbrev = Some("MTL".to_string());
    db.upsert_game(&updated).unwrap();

    let stored = db.get_game(GameId::new(2025020204)).unwrap().unwrap();
    assert_eq!(stored.home_abbrev.as_deref(), Some("MTL"));
}

#[test]
fn test_get_game_missing() {
    let db = create_test_db();
    assert!(db.get_game(GameId::new(999)).unwrap().is_none());
}

#[test]
fn test_replace_and_get_pp_blocks() {
    let mut db = create_test_db();
    db.upsert_game(&test_game(2025020204)).unwrap();

    let blocks = vec![
        test_block(2025020204, 10, 300, 420, 0),
        test_block(2025020204, 1, 900, 1020, 1),
    ];
    db.replace_pp_blocks(GameId::new(2025020204), &blocks)
        .unwrap();

    let stored = db.get_pp_blocks(GameId::new(2025020204)).unwrap();
    assert_eq!(stored, blocks);
    assert!(db.has_blocks_for_game(GameId::new(2025020204)).unwrap());
}

#[test]
fn test_replace_pp_blocks_overwrites() {
    let mut db = create_test_db();
    db.upsert_game(&test_game(2025020204)).unwrap();

    db.replace_pp_blocks(
        GameId::new(2025020204),
        &[
            test_block(2025020204, 10, 300, 420, 0),
            test_block(2025020204, 10, 900, 1020, 0),
        ],
    )
    .unwrap();

    // A second reconstruction fully replaces the first
    db.replace_pp_blocks(
        GameId::new(2025020204),
        &[test_block(2025020204, 10, 300, 360, 1)],
    )
    .unwrap();

    let stored = db.get_pp_blocks(GameId::new(2025020204)).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].end_seconds, 360);
    assert_eq!(stored[0].goals_for, 1);
}

#[test]
fn test_has_blocks_for_game_empty() {
    let mut db = create_test_db();
    db.upsert_game(&test_game(2025020204)).unwrap();

    assert!(!db.has_blocks_for_game(GameId::new(2025020204)).unwrap());

    // A game can legitimately have zero blocks (no penalties)
    db.replace_pp_blocks(GameId::new(2025020204), &[]).unwrap();
    assert!(!db.has_blocks_for_game(GameId::new(2025020204)).unwrap());
}

#[test]
fn test_strength_and_end_roundtrip_through_db() {
    let mut db = create_test_db();
    db.upsert_game(&test_game(2025020204)).unwrap();

    let blocks = vec![
        PpBlockRow {
            game_id: GameId::new(2025020204),
            team_id: TeamId::new(10),
            start_seconds: 300,
            end_seconds: 400,
            strength: Strength::FiveOnThree,
            goals_for: 1,
            ended_by: BlockEnd::Goal,
        },
        PpBlockRow {
            game_id: GameId::new(2025020204),
            team_id: TeamId::new(10),
            start_seconds: 3570,
            end_seconds: 3600,
            strength: Strength::FourOnThree,
            goals_for: 0,
            ended_by: BlockEnd::GameEnd,
        },
    ];
    db.replace_pp_blocks(GameId::new(2025020204), &blocks)
        .unwrap();

    let stored = db.get_pp_blocks(GameId::new(2025020204)).unwrap();
    assert_eq!(stored, blocks);
}

#[test]
fn test_clear_all_data() {
    let mut db = create_test_db();
    db.upsert_game(&test_game(2025020204)).unwrap();
    db.replace_pp_blocks(
        GameId::new(2025020204),
        &[test_block(2025020204, 10, 300, 420, 0)],
    )
    .unwrap();

    db.clear_all_data().unwrap();

    assert!(db.get_game(GameId::new(2025020204)).unwrap().is_none());
    assert!(!db.has_blocks_for_game(GameId::new(2025020204)).unwrap());
}

mod summary {
    use super::*;
    use crate::cli::types::TeamAbbrev;

    fn abbrev(s: &str) -> TeamAbbrev {
        s.parse().unwrap()
    }

    #[test]
    fn test_team_pp_summary_no_games() {
        let db = create_test_db();
        let summary = db
            .team_pp_summary(&abbrev("TOR"), Season::new(20252026))
            .unwrap();
        assert!(summary.is_none());
    }

    #[test]
    fn test_team_pp_summary_counts_runs_not_blocks() {
        let mut db = create_test_db();
        db.upsert_game(&test_game(2025020204)).unwrap();

        // One 5v3 sequence split into three touching blocks plus one
        // standalone minor: two opportunities total
        let blocks = vec![
            PpBlockRow {
                strength: Strength::FiveOnFour,
                ..test_block(2025020204, 10, 300, 400, 0)
            },
            PpBlockRow {
                strength: Strength::FiveOnThree,
                goals_for: 1,
                ..test_block(2025020204, 10, 400, 420, 0)
            },
            PpBlockRow {
                strength: Strength::FiveOnFour,
                ..test_block(2025020204, 10, 420, 520, 0)
            },
            test_block(2025020204, 10, 1500, 1620, 0),
        ];
        db.replace_pp_blocks(GameId::new(2025020204), &blocks)
            .unwrap();

        let summary = db
            .team_pp_summary(&abbrev("TOR"), Season::new(20252026))
            .unwrap()
            .unwrap();

        assert_eq!(summary.games, 1);
        assert_eq!(summary.opportunities, 2);
        assert_eq!(summary.goals, 1);
        assert_eq!(summary.total_pp_seconds, 100 + 20 + 100 + 120);
        assert_eq!(summary.conversion_pct, 50.0);
        assert_eq!(summary.avg_block_seconds, 340.0 / 4.0);
    }

    #[test]
    fn test_team_pp_summary_spans_games() {
        let mut db = create_test_db();
        db.upsert_game(&test_game(2025020204)).unwrap();
        db.upsert_game(&test_game(2025020205)).unwrap();

        db.replace_pp_blocks(
            GameId::new(2025020204),
            &[test_block(2025020204, 10, 300, 420, 1)],
        )
        .unwrap();
        db.replace_pp_blocks(
            GameId::new(2025020205),
            &[test_block(2025020205, 10, 100, 220, 0)],
        )
        .unwrap();

        let summary = db
            .team_pp_summary(&abbrev("TOR"), Season::new(20252026))
            .unwrap()
            .unwrap();
        assert_eq!(summary.games, 2);
        assert_eq!(summary.opportunities, 2);
        assert_eq!(summary.goals, 1);
    }

    #[test]
    fn test_team_pp_summary_ignores_opponent_blocks() {
        let mut db = create_test_db();
        db.upsert_game(&test_game(2025020204)).unwrap();

        db.replace_pp_blocks(
            GameId::new(2025020204),
            &[
                test_block(2025020204, 10, 300, 420, 1),
                test_block(2025020204, 1, 900, 1020, 1),
            ],
        )
        .unwrap();

        let summary = db
            .team_pp_summary(&abbrev("TOR"), Season::new(20252026))
            .unwrap()
            .unwrap();
        assert_eq!(summary.opportunities, 1);
        assert_eq!(summary.goals, 1);

        let away = db
            .team_pp_summary(&abbrev("NJD"), Season::new(20252026))
            .unwrap()
            .unwrap();
        assert_eq!(away.opportunities, 1);
    }

    #[test]
    fn test_team_pp_summary_games_without_blocks_counted() {
        let mut db = create_test_db();
        db.upsert_game(&test_game(2025020204)).unwrap();

        let summary = db
            .team_pp_summary(&abbrev("TOR"), Season::new(20252026))
            .unwrap()
            .unwrap();
        assert_eq!(summary.games, 1);
        assert_eq!(summary.opportunities, 0);
        assert_eq!(summary.conversion_pct, 0.0);
        assert_eq!(summary.avg_block_seconds, 0.0);
    }

    #[test]
    fn test_team_pp_summary_other_season_excluded() {
        let mut db = create_test_db();
        let mut old_game = test_game(2024020204);
        old_game.season = Season::new(20242025);
        db.upsert_game(&old_game).unwrap();

        let summary = db
            .team_pp_summary(&abbrev("TOR"), Season::new(20252026))
            .unwrap();
        assert!(summary.is_none());
    }
}
