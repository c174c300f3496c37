use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, SleeperError};
use crate::sleeper::http::SleeperClient;
use crate::sleeper::types::{Game, Matchup, PlayerStats, WeekStats};
use crate::types::{PlayerId, Season, Week};


const SPORT: &str = "nfl";
const SEASON_TYPE: &str = "regular";
const GAMES_ALIAS: &str = "nfl__game";
const CATEGORY_PROJECTED: &str = "proj";
const CATEGORY_LIVE: &str = "stat";

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl SleeperClient {
    /// One GraphQL round trip: POST the query, unwrap the envelope.
    ///
    /// Field-level `errors` surface as [`SleeperError::GraphQl`] with the
    /// messages joined; an envelope without `data` is
    /// [`SleeperError::EmptyResponse`]. Transport failures and undecodable
    /// bodies normalize to [`SleeperError::NoData`] and are not further
    /// distinguishable. HTTP status is ignored as long as the envelope
    /// decodes.
    async fn post_graphql(&self, query: &str) -> Result<Value> {
        debug!("POST {}", self.graphql_url);
        let body = serde_json::json!({ "query": query, "variables": {} });

        let response = match self.http.post(&self.graphql_url).json(&body).send().await {
            Ok(response) => response,
            Err(_) => return Err(SleeperError::NoData),
        };
        let envelope: GraphQlResponse = match response.json().await {
            Ok(envelope) => envelope,
            Err(_) => return Err(SleeperError::NoData),
        };

        if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
            let message = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(SleeperError::GraphQl { message });
        }

        envelope.data.ok_or(SleeperError::EmptyResponse)
    }

    /// Projected and live stat lines for every starter across `matchups`,
    /// fetched in a single batched query.
    pub async fn get_all_projections(
        &self,
        season: &Season,
        week: Week,
        matchups: &[Matchup],
    ) -> Result<WeekStats> {
        let player_ids: Vec<PlayerId> = matchups
            .iter()
            .flat_map(|m| m.starters.iter().cloned())
            .collect();

        let proj_alias = stats_alias(season, week, CATEGORY_PROJECTED);
        let live_alias = stats_alias(season, week, CATEGORY_LIVE);
        let query = projections_query(season, week, &player_ids, &proj_alias, &live_alias);

        let mut data = self.post_graphql(&query).await?;
        let projections = take_stat_rows(&mut data, &proj_alias)?;
        let live = take_stat_rows(&mut data, &live_alias)?;
        Ok(WeekStats { projections, live })
    }

    /// Every NFL game scheduled for the given week. A response without the
    /// games alias reads as "no games", not an error.
    pub async fn get_all_games(&self, season: &Season, week: Week) -> Result<Vec<Game>> {
        let mut data = self.post_graphql(&games_query(season, week)).await?;
        match data.get_mut(GAMES_ALIAS) {
            Some(rows) if !rows.is_null() => Ok(serde_json::from_value(rows.take())?),
            _ => Ok(Vec::new()),
        }
    }
}

/// Alias for one stats sub-query, derived from the request coordinates so
/// the query and the extraction key always agree.
fn stats_alias(season: &Season, week: Week, category: &str) -> String {
    format!("{SPORT}__{SEASON_TYPE}__{season}__{week}__{category}")
}

fn take_stat_rows(data: &mut Value, alias: &str) -> Result<Vec<PlayerStats>> {
    match data.get_mut(alias) {
        Some(rows) if !rows.is_null() => Ok(serde_json::from_value(rows.take())?),
        _ => Err(SleeperError::EmptyResponse),
    }
}

fn projections_query(
    season: &Season,
    week: Week,
    player_ids: &[PlayerId],
    proj_alias: &str,
    live_alias: &str,
) -> String {
    let ids = player_ids
        .iter()
        .map(|id| format!("\"{id}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"query get_player_score_and_projections_batch {{
  {proj_alias}: stats_for_players_in_week(
    sport: "{SPORT}",
    season: "{season}",
    category: "{CATEGORY_PROJECTED}",
    season_type: "{SEASON_TYPE}",
    week: {week},
    player_ids: [{ids}]
  ) {{
    game_id
    opponent
    player_id
    stats
    team
    week
    season
  }}

  {live_alias}: stats_for_players_in_week(
    sport: "{SPORT}",
    season: "{season}",
    category: "{CATEGORY_LIVE}",
    season_type: "{SEASON_TYPE}",
    week: {week},
    player_ids: [{ids}]
  ) {{
    game_id
    opponent
    player_id
    stats
    team
    week
    season
  }}
}}"#
    )
}

fn games_query(season: &Season, week: Week) -> String {
    format!(
        r#"query batch_scores {{
  {GAMES_ALIAS}: scores(
    sport: "{SPORT}",
    season_type: "{SEASON_TYPE}",
    season: "{season}",
    week: {week}
  ) {{
    date
    game_id
    metadata
    season
    season_type
    sport
    status
    week
    start_time
  }}
}}"#
    )
}
