use std::collections::HashMap;

use tracing::warn;

use crate::sleeper::types::{Game, PlayerStats};
use crate::types::{GameId, PlayerId};

#[cfg(test)]
mod tests;

const QUARTER_SECONDS: i64 = 900;
const REGULATION_SECONDS: f64 = 3600.0;

/// Parse a `mm:ss` game clock into seconds left in the quarter.
/// Missing or non-numeric components count as zero; absurdly large ones
/// saturate instead of overflowing.
pub fn parse_time_remaining(clock: &str) -> u32 {
    let mut parts = clock.split(':');
    let minutes: u32 = parts.next().and_then(|m| m.parse().ok()).unwrap_or(0);
    let seconds: u32 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    minutes.saturating_mul(60).saturating_add(seconds)
}

/// Blend live and projected points by how much of the game has elapsed.
///
/// A game that has not started scores as pure projection; a finished game as
/// pure live. In between, the live total is credited in full and the
/// projection is discounted by the fraction of regulation already played.
/// Overtime is not modeled: the elapsed fraction caps at 1.0.
pub fn blend_live_projection(game: Option<&Game>, live_pts: f64, projected_pts: f64) -> f64 {
    let Some(meta) = game.and_then(|g| g.metadata.as_ref()) else {
        return projected_pts;
    };
    if !meta.has_started {
        return projected_pts;
    }
    if meta.is_over {
        return live_pts;
    }

    // Sleeper reports quarter 0 around kickoff; treat it as the first.
    let quarter = i64::from(meta.quarter_num.unwrap_or(1).max(1));
    // An empty clock string reads like a missing one: full quarter remaining.
    let clock = meta
        .time_remaining
        .as_deref()
        .filter(|clock| !clock.is_empty())
        .unwrap_or("15:00");
    let seconds_remaining = i64::from(parse_time_remaining(clock));

    let elapsed = (quarter - 1) * QUARTER_SECONDS + (QUARTER_SECONDS - seconds_remaining);
    let completed = (elapsed as f64 / REGULATION_SECONDS).clamp(0.0, 1.0);

    live_pts + projected_pts * (1.0 - completed)
}

/// Per-week lookup tables joining games and the two stat batches.
#[derive(Debug, Default)]
pub struct WeekIndex {
    pub games_by_id: HashMap<GameId, Game>,
    pub projections_by_player: HashMap<PlayerId, PlayerStats>,
    pub live_by_player: HashMap<PlayerId, PlayerStats>,
    pub skipped: SkippedRows,
}

/// Rows dropped during indexing because their id field was missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkippedRows {
    pub games: usize,
    pub projections: usize,
    pub live: usize,
}

impl SkippedRows {
    pub fn total(&self) -> usize {
        self.games + self.projections + self.live
    }
}

/// Index a week's games by game id and its stat batches by player id.
/// Duplicate ids resolve last-write-wins; rows without an id are dropped
/// and counted.
pub fn build_week_index(
    games: Vec<Game>,
    projections: Vec<PlayerStats>,
    live: Vec<PlayerStats>,
) -> WeekIndex {
    let mut index = WeekIndex::default();

    for game in games {
        if game.game_id.is_empty() {
            index.skipped.games += 1;
            continue;
        }
        index.games_by_id.insert(game.game_id.clone(), game);
    }
    index.projections_by_player = index_by_player(projections, &mut index.skipped.projections);
    index.live_by_player = index_by_player(live, &mut index.skipped.live);

    if index.skipped.total() > 0 {
        warn!(
            games = index.skipped.games,
            projections = index.skipped.projections,
            live = index.skipped.live,
            "dropped rows with missing ids while indexing week data"
        );
    }

    index
}

fn index_by_player(
    rows: Vec<PlayerStats>,
    skipped: &mut usize,
) -> HashMap<PlayerId, PlayerStats> {
    let mut map = HashMap::new();
    for row in rows {
        if row.player_id.is_empty() {
            *skipped += 1;
            continue;
        }
        map.insert(row.player_id.clone(), row);
    }
    map
}
