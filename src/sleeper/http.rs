use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, SleeperError};
use crate::sleeper::types::{League, Matchup, NflState, Roster, User};
use crate::types::{LeagueId, Week};


/// Base path for the Sleeper REST API.
pub const SLEEPER_BASE_URL: &str = "https://api.sleeper.app/v1";

/// Endpoint for the Sleeper GraphQL API.
pub const SLEEPER_GRAPHQL_URL: &str = "https://sleeper.com/graphql";

/// Client for both Sleeper upstreams, REST and GraphQL.
///
/// Holds no per-call state and is cheap to clone; the inner reqwest client
/// is reference-counted. Build one and share it.
#[derive(Debug, Clone)]
pub struct SleeperClient {
    pub(crate) http: Client,
    pub(crate) rest_base: String,
    pub(crate) graphql_url: String,
}

impl SleeperClient {
    /// Client against the production Sleeper endpoints.
    pub fn new() -> Self {
        Self::with_base_urls(SLEEPER_BASE_URL, SLEEPER_GRAPHQL_URL)
    }

    /// Client against custom endpoints, for pointing tests at a mock server.
    pub fn with_base_urls(rest_base: impl Into<String>, graphql_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            rest_base: rest_base.into(),
            graphql_url: graphql_url.into(),
        }
    }

    /// One REST round trip: GET `{base}{path}` and decode the JSON body.
    ///
    /// Sleeper answers unknown ids with HTTP 200 and an empty or `null`
    /// body; both decode as [`SleeperError::EmptyResponse`].
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.rest_base, path);
        debug!("GET {url}");

        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if body.is_empty() || body == "null" {
            return Err(SleeperError::EmptyResponse);
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// League settings and metadata.
    pub async fn get_league_info(&self, league_id: &LeagueId) -> Result<League> {
        self.get_json(&format!("/league/{league_id}")).await
    }

    /// Head-to-head matchups for one week of a league.
    pub async fn get_matchups(&self, league_id: &LeagueId, week: Week) -> Result<Vec<Matchup>> {
        self.get_json(&format!("/league/{league_id}/matchups/{week}"))
            .await
    }

    /// All rosters in a league.
    pub async fn get_rosters(&self, league_id: &LeagueId) -> Result<Vec<Roster>> {
        self.get_json(&format!("/league/{league_id}/rosters")).await
    }

    /// League members, filtered to those with a team name set.
    ///
    /// Sleeper keeps departed and never-activated members attached to a
    /// league; a non-empty `team_name` in the user metadata marks the
    /// active ones.
    pub async fn get_users(&self, league_id: &LeagueId) -> Result<Vec<User>> {
        let users: Vec<User> = self.get_json(&format!("/league/{league_id}/users")).await?;
        Ok(users
            .into_iter()
            .filter(|u| u.team_name().is_some())
            .collect())
    }

    /// Current NFL season and week pointers.
    pub async fn get_nfl_state(&self) -> Result<NflState> {
        self.get_json("/state/nfl").await
    }
}

impl Default for SleeperClient {
    fn default() -> Self {
        Self::new()
    }
}
