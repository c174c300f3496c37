//! Error types for the Sleeper data-access layer.

use thiserror::Error;


pub type Result<T> = std::result::Result<T, SleeperError>;

#[derive(Error, Debug)]
pub enum SleeperError {
    /// REST transport failure or non-2xx status; the upstream message is
    /// carried by the reqwest error.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream answered but carried no payload (empty or `null` body on the
    /// REST side, missing `data` on the GraphQL side).
    #[error("upstream returned no payload")]
    EmptyResponse,

    /// Field-level GraphQL errors, all upstream messages joined with `", "`.
    #[error("GraphQL query failed: {message}")]
    GraphQl { message: String },

    /// GraphQL transport failures collapse to this single fixed message; the
    /// underlying cause is not preserved.
    #[error("no data returned")]
    NoData,
}
