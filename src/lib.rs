//! Sleeper Fantasy Football Library
//!
//! A Rust client library for the Sleeper fantasy-football platform. It wraps
//! Sleeper's REST and GraphQL APIs and fuses live scoring with pre-game
//! projections into a single per-matchup view.
//!
//! ## Features
//!
//! - **League Data**: Leagues, rosters, matchups, and users from the REST API
//! - **Batched Stats**: Live and projected player stat lines for a whole week
//!   in one GraphQL round trip
//! - **Game Clocks**: NFL game schedules with live quarter/clock metadata
//! - **Live Blending**: Projection weight decays as game time elapses, so an
//!   in-progress matchup shows live points plus the projection still "owed"
//! - **Typed Errors**: Empty bodies, GraphQL field errors, and transport
//!   failures are distinguishable variants
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sleeper_ffl::{LeagueId, SleeperClient, Week};
//!
//! # async fn example() -> sleeper_ffl::Result<()> {
//! let client = SleeperClient::new();
//! let league_id = LeagueId::from("992121342166945792");
//!
//! let state = client.get_nfl_state().await?;
//! let matchups = client.get_matchups(&league_id, state.week).await?;
//!
//! let scored = client
//!     .calculate_matchup_projections(Some(&state), state.week, &matchups)
//!     .await?;
//! for result in scored {
//!     println!(
//!         "roster {}: {:.2} live / {:.2} projected",
//!         result.roster_id, result.starters_live_total, result.starters_projected_total
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The library never installs a tracing subscriber; embedders that want the
//! request/indexing events hook up their own.

pub mod error;
pub mod projections;
pub mod sleeper;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SleeperError};
pub use projections::{MatchupResult, StarterBreakdown};
pub use sleeper::http::{SleeperClient, SLEEPER_BASE_URL, SLEEPER_GRAPHQL_URL};
pub use sleeper::types::{
    Game, GameMetadata, League, Matchup, NflState, PlayerStats, Roster, StatValue, StatsMap, User,
    WeekStats,
};
pub use types::{GameId, LeagueId, MatchupId, PlayerId, RosterId, Season, UserId, Week};
