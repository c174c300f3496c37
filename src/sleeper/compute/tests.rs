//! Unit tests for the projection blender and week indexing

use super::*;
use crate::sleeper::types::{GameMetadata, StatValue, StatsMap, PTS_HALF_PPR};
use crate::types::Season;
use std::collections::BTreeMap;

fn game(id: &str, metadata: Option<GameMetadata>) -> Game {
    Game {
        game_id: GameId::from(id),
        date: "2025-11-30".to_string(),
        season: Season::from("2025"),
        season_type: "regular".to_string(),
        sport: "nfl".to_string(),
        start_time: 1_764_530_100,
        status: "in_progress".to_string(),
        week: 13,
        metadata,
    }
}

fn in_progress(quarter_num: Option<u32>, clock: Option<&str>) -> GameMetadata {
    GameMetadata {
        has_started: true,
        is_in_progress: true,
        quarter_num,
        time_remaining: clock.map(str::to_string),
        ..GameMetadata::default()
    }
}

fn finished() -> GameMetadata {
    GameMetadata {
        has_started: true,
        is_over: true,
        ..GameMetadata::default()
    }
}

fn stat_row(player_id: &str, points: f64) -> PlayerStats {
    PlayerStats {
        game_id: GameId::from("5549013"),
        opponent: Some("DEN".to_string()),
        player_id: PlayerId::from(player_id),
        team: Some("KC".to_string()),
        week: 13,
        season: 2025,
        stats: StatsMap(BTreeMap::from([(
            PTS_HALF_PPR.to_string(),
            StatValue::Number(points),
        )])),
    }
}

#[cfg(test)]
mod blender_tests {
    use super::*;

    #[test]
    fn test_parse_time_remaining() {
        assert_eq!(parse_time_remaining("15:00"), 900);
        assert_eq!(parse_time_remaining("07:30"), 450);
        assert_eq!(parse_time_remaining("0:42"), 42);
        assert_eq!(parse_time_remaining("00:00"), 0);
    }

    #[test]
    fn test_parse_time_remaining_malformed() {
        assert_eq!(parse_time_remaining("bad:value"), 0);
        assert_eq!(parse_time_remaining(""), 0);
        assert_eq!(parse_time_remaining(":30"), 30);
        assert_eq!(parse_time_remaining("5:xx"), 300);
        // No seconds component at all
        assert_eq!(parse_time_remaining("12"), 720);
    }

    #[test]
    fn test_parse_time_remaining_saturates_on_huge_components() {
        // 71582789 * 60 is just past u32::MAX
        assert_eq!(parse_time_remaining("71582789:00"), u32::MAX);
        assert_eq!(parse_time_remaining("4294967295:59"), u32::MAX);
    }

    #[test]
    fn test_blend_no_game_uses_projection() {
        assert_eq!(blend_live_projection(None, 99.0, 12.5), 12.5);
    }

    #[test]
    fn test_blend_no_metadata_uses_projection() {
        let g = game("5549013", None);
        assert_eq!(blend_live_projection(Some(&g), 99.0, 12.5), 12.5);
    }

    #[test]
    fn test_blend_not_started_uses_projection() {
        // has_started = false regardless of any live value
        let g = game("5549013", Some(GameMetadata::default()));
        assert_eq!(blend_live_projection(Some(&g), 99.0, 12.5), 12.5);
    }

    #[test]
    fn test_blend_finished_uses_live() {
        let g = game("5549013", Some(finished()));
        assert_eq!(blend_live_projection(Some(&g), 17.4, 12.5), 17.4);
        assert_eq!(blend_live_projection(Some(&g), 0.0, 25.0), 0.0);
    }

    #[test]
    fn test_blend_mid_game_worked_example() {
        // Q2 with 10:00 left: elapsed = 900 + 300 = 1200s, completed = 1/3,
        // so blended = 10 + 20 * 2/3
        let g = game("5549013", Some(in_progress(Some(2), Some("10:00"))));
        let blended = blend_live_projection(Some(&g), 10.0, 20.0);
        assert!((blended - 23.333333333333332).abs() < 1e-9);
    }

    #[test]
    fn test_blend_at_kickoff_keeps_full_projection() {
        let g = game("5549013", Some(in_progress(Some(1), Some("15:00"))));
        assert_eq!(blend_live_projection(Some(&g), 0.0, 20.0), 20.0);
        // Any live points already on the board still count in full
        assert_eq!(blend_live_projection(Some(&g), 3.0, 20.0), 23.0);
    }

    #[test]
    fn test_blend_end_of_regulation_is_live_only() {
        // Q4 00:00: elapsed = 3600, remaining weight 0
        let g = game("5549013", Some(in_progress(Some(4), Some("00:00"))));
        assert_eq!(blend_live_projection(Some(&g), 21.5, 20.0), 21.5);
    }

    #[test]
    fn test_blend_clamps_past_regulation() {
        // Overtime reports quarter 5; the elapsed fraction caps at 1.0
        let g = game("5549013", Some(in_progress(Some(5), Some("07:30"))));
        assert_eq!(blend_live_projection(Some(&g), 14.2, 20.0), 14.2);
    }

    #[test]
    fn test_blend_clamps_clock_longer_than_quarter() {
        // A clock past 15:00 would make elapsed negative; clamps to 0
        let g = game("5549013", Some(in_progress(Some(1), Some("20:00"))));
        assert_eq!(blend_live_projection(Some(&g), 2.0, 20.0), 22.0);

        // Even a saturated clock value stays on the clamp path
        let g = game("5549013", Some(in_progress(Some(1), Some("71582789:00"))));
        assert_eq!(blend_live_projection(Some(&g), 2.0, 20.0), 22.0);
    }

    #[test]
    fn test_blend_quarter_defaults_to_first() {
        let expected = {
            let g = game("5549013", Some(in_progress(Some(1), Some("12:00"))));
            blend_live_projection(Some(&g), 5.0, 20.0)
        };

        let zero = game("5549013", Some(in_progress(Some(0), Some("12:00"))));
        assert_eq!(blend_live_projection(Some(&zero), 5.0, 20.0), expected);

        let absent = game("5549013", Some(in_progress(None, Some("12:00"))));
        assert_eq!(blend_live_projection(Some(&absent), 5.0, 20.0), expected);
    }

    #[test]
    fn test_blend_clock_defaults_to_full_quarter() {
        // Q3 with no clock reads as 15:00: elapsed = 1800, completed = 1/2
        let g = game("5549013", Some(in_progress(Some(3), None)));
        assert_eq!(blend_live_projection(Some(&g), 8.0, 20.0), 18.0);
    }

    #[test]
    fn test_blend_empty_clock_reads_as_full_quarter() {
        // An empty clock string must not count as 00:00. Q2 with the default
        // 15:00 remaining: elapsed = 900, completed = 1/4
        let g = game("5549013", Some(in_progress(Some(2), Some(""))));
        assert_eq!(blend_live_projection(Some(&g), 10.0, 20.0), 25.0);
    }

    #[test]
    fn test_blend_projection_weight_shrinks_with_elapsed_time() {
        // Checkpoints in increasing elapsed order
        let clocks = [
            (1, "15:00"),
            (1, "07:30"),
            (2, "10:00"),
            (3, "00:30"),
            (4, "05:00"),
            (4, "00:00"),
        ];

        let mut previous = f64::INFINITY;
        for (quarter, clock) in clocks {
            let g = game("5549013", Some(in_progress(Some(quarter), Some(clock))));
            let blended = blend_live_projection(Some(&g), 4.0, 12.0);
            assert!(
                blended <= previous,
                "blended {blended} rose after Q{quarter} {clock}"
            );
            previous = blended;
        }
    }
}

#[cfg(test)]
mod index_tests {
    use super::*;

    #[test]
    fn test_build_week_index_basic() {
        let games = vec![game("5549013", None), game("5549014", None)];
        let projections = vec![stat_row("4034", 18.7), stat_row("6794", 14.2)];
        let live = vec![stat_row("4034", 6.1)];

        let index = build_week_index(games, projections, live);

        assert_eq!(index.games_by_id.len(), 2);
        assert_eq!(index.projections_by_player.len(), 2);
        assert_eq!(index.live_by_player.len(), 1);
        assert_eq!(index.skipped, SkippedRows::default());

        let proj = index
            .projections_by_player
            .get(&PlayerId::from("6794"))
            .unwrap();
        assert_eq!(proj.stats.half_ppr(), 14.2);
        assert!(index
            .live_by_player
            .get(&PlayerId::from("6794"))
            .is_none());
    }

    #[test]
    fn test_build_week_index_last_write_wins() {
        let projections = vec![stat_row("4034", 5.0), stat_row("4034", 9.0)];
        let index = build_week_index(vec![], projections, vec![]);

        assert_eq!(index.projections_by_player.len(), 1);
        let row = index
            .projections_by_player
            .get(&PlayerId::from("4034"))
            .unwrap();
        assert_eq!(row.stats.half_ppr(), 9.0);
        // Duplicates overwrite, they do not count as skipped
        assert_eq!(index.skipped.total(), 0);
    }

    #[test]
    fn test_build_week_index_duplicate_game_id() {
        let mut second = game("5549013", None);
        second.week = 14;
        let index = build_week_index(vec![game("5549013", None), second], vec![], vec![]);

        assert_eq!(index.games_by_id.len(), 1);
        let kept = index.games_by_id.get(&GameId::from("5549013")).unwrap();
        assert_eq!(kept.week, 14);
    }

    #[test]
    fn test_build_week_index_skips_and_counts_missing_ids() {
        let games = vec![game("", None), game("5549013", None)];
        let projections = vec![stat_row("", 3.0), stat_row("", 4.0), stat_row("4034", 5.0)];
        let live = vec![stat_row("", 1.0)];

        let index = build_week_index(games, projections, live);

        assert_eq!(index.games_by_id.len(), 1);
        assert_eq!(index.projections_by_player.len(), 1);
        assert!(index.live_by_player.is_empty());
        assert_eq!(
            index.skipped,
            SkippedRows {
                games: 1,
                projections: 2,
                live: 1
            }
        );
        assert_eq!(index.skipped.total(), 4);
    }

    #[test]
    fn test_build_week_index_order_independent_for_distinct_ids() {
        let forward = build_week_index(
            vec![game("5549013", None), game("5549014", None)],
            vec![stat_row("4034", 18.7), stat_row("6794", 14.2)],
            vec![],
        );
        let reversed = build_week_index(
            vec![game("5549014", None), game("5549013", None)],
            vec![stat_row("6794", 14.2), stat_row("4034", 18.7)],
            vec![],
        );

        assert_eq!(forward.games_by_id.len(), reversed.games_by_id.len());
        for id in ["4034", "6794"] {
            let a = forward
                .projections_by_player
                .get(&PlayerId::from(id))
                .unwrap();
            let b = reversed
                .projections_by_player
                .get(&PlayerId::from(id))
                .unwrap();
            assert_eq!(a.stats.half_ppr(), b.stats.half_ppr());
        }
    }
}
