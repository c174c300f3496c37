//! Sleeper platform integration.
//!
//! [`http`] and [`graphql`] cover the two upstream services, [`types`] the
//! payload shapes they exchange, and [`compute`] the pure indexing and
//! blending logic the matchup aggregator builds on.

pub mod compute;
pub mod graphql;
pub mod http;
pub mod types;

pub use http::{SleeperClient, SLEEPER_BASE_URL, SLEEPER_GRAPHQL_URL};
