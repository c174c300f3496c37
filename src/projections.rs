//! Matchup scoring: joins a week's games and stat batches, blends live and
//! projected points per starter, and rolls them up per matchup.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::sleeper::compute::{blend_live_projection, build_week_index, WeekIndex};
use crate::sleeper::http::SleeperClient;
use crate::sleeper::types::{Matchup, NflState, PlayerStats};
use crate::types::{GameId, MatchupId, PlayerId, RosterId, Season, Week};


/// Season coordinate used when no NFL state is supplied.
const DEFAULT_SEASON: &str = "2024";

/// Per-starter scoring line inside a [`MatchupResult`].
///
/// `projected_points` carries the blended value, not the raw pre-game
/// projection; the naming follows the upstream convention.
#[derive(Debug, Clone, Serialize)]
pub struct StarterBreakdown {
    pub player_id: PlayerId,
    pub team: Option<String>,
    pub opponent: Option<String>,
    pub game_id: Option<GameId>,
    /// True when the starter appeared in neither stat batch.
    pub missing_stats: bool,
    pub live_points: f64,
    pub projected_points: f64,
}

/// One roster's scored side of a head-to-head matchup.
#[derive(Debug, Clone, Serialize)]
pub struct MatchupResult {
    pub matchup_id: MatchupId,
    pub roster_id: RosterId,
    pub starters: Vec<StarterBreakdown>,
    pub starters_live_total: f64,
    pub starters_projected_total: f64,
    /// Upstream-reported matchup total, passed through untouched.
    pub points: f64,
}

impl SleeperClient {
    /// Score every matchup of a week by fusing live stats, projections, and
    /// game clocks into per-starter blended points.
    ///
    /// Games and stat batches are fetched concurrently; either failure
    /// aborts the whole call. Results come back in `matchups` order. Bench
    /// players are not scored.
    pub async fn calculate_matchup_projections(
        &self,
        nfl_state: Option<&NflState>,
        week: Week,
        matchups: &[Matchup],
    ) -> Result<Vec<MatchupResult>> {
        let season = nfl_state
            .map(|state| state.season.clone())
            .unwrap_or_else(|| Season::from(DEFAULT_SEASON));
        debug!("scoring {} matchups for week {week}", matchups.len());

        let (games, stats) = tokio::try_join!(
            self.get_all_games(&season, week),
            self.get_all_projections(&season, week, matchups),
        )?;

        let index = build_week_index(games, stats.projections, stats.live);

        Ok(matchups
            .iter()
            .map(|matchup| score_matchup(matchup, &index))
            .collect())
    }
}

fn score_matchup(matchup: &Matchup, index: &WeekIndex) -> MatchupResult {
    let starters: Vec<StarterBreakdown> = matchup
        .starters
        .iter()
        .map(|player_id| score_starter(player_id, index))
        .collect();

    let starters_live_total = starters.iter().map(|s| s.live_points).sum();
    let starters_projected_total = starters.iter().map(|s| s.projected_points).sum();

    MatchupResult {
        matchup_id: matchup.matchup_id,
        roster_id: matchup.roster_id,
        starters,
        starters_live_total,
        starters_projected_total,
        points: matchup.points,
    }
}

fn score_starter(player_id: &PlayerId, index: &WeekIndex) -> StarterBreakdown {
    let live = index.live_by_player.get(player_id);
    let projection = index.projections_by_player.get(player_id);

    let live_points = live.map(|row| row.stats.half_ppr()).unwrap_or(0.0);
    let projected_points = projection.map(|row| row.stats.half_ppr()).unwrap_or(0.0);

    let game_id = pick_game_id(live, projection);
    let game = game_id.as_ref().and_then(|id| index.games_by_id.get(id));

    StarterBreakdown {
        player_id: player_id.clone(),
        team: pick_attribution(live, projection, |row| row.team.as_deref()),
        opponent: pick_attribution(live, projection, |row| row.opponent.as_deref()),
        game_id,
        missing_stats: live.is_none() && projection.is_none(),
        live_points,
        projected_points: blend_live_projection(game, live_points, projected_points),
    }
}

/// First non-empty value off the live record, then the projection record.
fn pick_attribution<'a>(
    live: Option<&'a PlayerStats>,
    projection: Option<&'a PlayerStats>,
    field: impl Fn(&'a PlayerStats) -> Option<&'a str>,
) -> Option<String> {
    live.and_then(&field)
        .filter(|value| !value.is_empty())
        .or_else(|| projection.and_then(&field).filter(|value| !value.is_empty()))
        .map(str::to_string)
}

fn pick_game_id(live: Option<&PlayerStats>, projection: Option<&PlayerStats>) -> Option<GameId> {
    live.map(|row| &row.game_id)
        .filter(|id| !id.is_empty())
        .or_else(|| projection.map(|row| &row.game_id).filter(|id| !id.is_empty()))
        .cloned()
}
