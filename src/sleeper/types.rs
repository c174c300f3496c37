use crate::types::{GameId, LeagueId, MatchupId, PlayerId, RosterId, Season, UserId, Week};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;


/// Stat key consumed for matchup scoring (half-PPR fantasy points).
pub const PTS_HALF_PPR: &str = "pts_half_ppr";

/// Sleeper sends `null` for ids and stat maps it has not populated; read
/// those as the empty default so the indexing pass can drop and count the
/// row.
fn de_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// League snapshot from `GET /league/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct League {
    pub league_id: LeagueId,
    pub name: String,
    pub season: Season,
    pub season_type: String,
    pub status: String,
    pub total_rosters: u32,
    /// Stat name → point value (e.g. `pass_td` → 4.0).
    pub scoring_settings: Option<BTreeMap<String, f64>>,
    pub metadata: Option<BTreeMap<String, String>>,
}

/// League member roster from `GET /league/{id}/rosters`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Roster {
    pub roster_id: RosterId,
    pub owner_id: UserId,
    /// All player ids on the roster.
    #[serde(default)]
    pub players: Vec<PlayerId>,
    /// Player ids in the starting lineup, order = lineup slot.
    #[serde(default)]
    pub starters: Vec<PlayerId>,
    pub settings: Option<RosterSettings>,
    pub metadata: Option<BTreeMap<String, String>>,
}

/// Season record and points bookkeeping attached to a roster.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RosterSettings {
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub ties: Option<u32>,
    /// Total points scored.
    pub fpts: Option<f64>,
    pub fpts_against: Option<f64>,
    /// Whatever else Sleeper tucks into roster settings (decimal remainders,
    /// waiver budget, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, f64>,
}

/// League member from `GET /league/{id}/users`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub display_name: String,
    /// Avatar hash or URL.
    pub avatar: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
}

impl User {
    /// The team name this user has set, if any. Users without one are not
    /// considered active league members by [`get_users`].
    ///
    /// [`get_users`]: crate::SleeperClient::get_users
    pub fn team_name(&self) -> Option<&str> {
        self.metadata
            .as_ref()?
            .get("team_name")
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }
}

/// One roster's side of a weekly matchup, from `GET /league/{id}/matchups/{week}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Matchup {
    /// Groups the rosters competing against each other this week.
    pub matchup_id: MatchupId,
    pub roster_id: RosterId,
    /// Upstream-computed points total for the roster.
    pub points: f64,
    /// Starting lineup, order = lineup slot.
    #[serde(default)]
    pub starters: Vec<PlayerId>,
    /// All player ids on the roster.
    #[serde(default)]
    pub players: Vec<PlayerId>,
    pub custom_points: Option<f64>,
}

/// NFL season coordinates from `GET /state/nfl`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NflState {
    pub week: Week,
    /// `pre`, `regular`, or `post`.
    pub season_type: String,
    pub season_start_date: String,
    pub season: Season,
    pub previous_season: Season,
    /// Week of the regular season.
    pub leg: u16,
    /// The active season for leagues.
    pub league_season: Season,
    /// Flips to the next year in December.
    pub league_create_season: Season,
    /// Week to display in a UI; may differ from `week`.
    pub display_week: Week,
}

/// Scheduled or live NFL game from the GraphQL `scores` query.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Game {
    #[serde(default, deserialize_with = "de_null_default")]
    pub game_id: GameId,
    pub date: String,
    pub season: Season,
    pub season_type: String,
    pub sport: String,
    /// Scheduled kickoff, epoch timestamp.
    pub start_time: i64,
    pub status: String,
    pub week: u16,
    /// Live game state. Absent until Sleeper populates it; treated as
    /// "not started" by the blender.
    #[serde(default)]
    pub metadata: Option<GameMetadata>,
}

/// Live game state. The sole source of truth for how far through a game we
/// are; everything is optional because Sleeper omits most of it pre-game.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GameMetadata {
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub home_record: Option<String>,
    pub away_record: Option<String>,
    pub status: Option<String>,
    pub date_time: Option<String>,
    pub has_started: bool,
    pub is_in_progress: bool,
    pub is_over: bool,
    pub is_overtime: bool,
    /// Display label, e.g. `"Q3"`.
    pub quarter: Option<String>,
    pub quarter_num: Option<u32>,
    /// Clock remaining in the current quarter, `"mm:ss"`.
    pub time_remaining: Option<String>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub home_score_quarter1: Option<u32>,
    pub home_score_quarter2: Option<u32>,
    pub home_score_quarter3: Option<u32>,
    pub home_score_quarter4: Option<u32>,
    pub away_score_quarter1: Option<u32>,
    pub away_score_quarter2: Option<u32>,
    pub away_score_quarter3: Option<u32>,
    pub away_score_quarter4: Option<u32>,
    pub home_score_overtime: Option<u32>,
    pub away_score_overtime: Option<u32>,
    pub home_used_timeouts: Option<u32>,
    pub away_used_timeouts: Option<u32>,
    pub possession: Option<String>,
    pub down_and_distance: Option<String>,
    /// Point spread by team abbreviation, plus an `updated_at` timestamp key.
    pub spread: Option<BTreeMap<String, f64>>,
    /// Moneyline by team abbreviation, plus an `updated_at` timestamp key.
    pub moneyline: Option<BTreeMap<String, f64>>,
    pub stadium_details: Option<StadiumDetails>,
    pub forecast_temp_high: Option<f64>,
    pub forecast_temp_low: Option<f64>,
    pub forecast_wind_speed: Option<f64>,
    pub forecast_description: Option<String>,
}

/// Venue details nested inside [`GameMetadata`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StadiumDetails {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
    pub capacity: Option<u32>,
    pub playing_surface: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// One player's stat line (live or projected) from the GraphQL
/// `stats_for_players_in_week` query.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerStats {
    #[serde(default, deserialize_with = "de_null_default")]
    pub game_id: GameId,
    pub opponent: Option<String>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub player_id: PlayerId,
    pub team: Option<String>,
    #[serde(default)]
    pub week: u16,
    #[serde(default)]
    pub season: u16,
    #[serde(default, deserialize_with = "de_null_default")]
    pub stats: StatsMap,
}

/// A stat value as Sleeper sends it: numeric almost always, a string for the
/// occasional display field.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

/// The raw stats mapping for one player line. Known keys get accessors; the
/// map itself is the pass-through bag for everything else.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StatsMap(pub BTreeMap<String, StatValue>);

impl StatsMap {
    /// Numeric value for `key`, or `None` when missing or non-numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key) {
            Some(StatValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Half-PPR point total; 0.0 when missing.
    pub fn half_ppr(&self) -> f64 {
        self.number(PTS_HALF_PPR).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The two stat batches fetched for a week: pre-game projections and live
/// actuals.
#[derive(Debug, Clone, Serialize)]
pub struct WeekStats {
    pub projections: Vec<PlayerStats>,
    pub live: Vec<PlayerStats>,
}
