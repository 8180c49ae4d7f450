//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed or incomplete input. Surfaced to the caller immediately,
    /// never retried and never masked by a fallback tier.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Referenced task or event does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A live external call failed. Absorbed into a fallback-provenance
    /// response on query paths; surfaced only for live calendar mutations.
    #[error("integration error: {0}")]
    Integration(String),

    /// A domain service did not answer within its budget. The aggregator
    /// converts this into a degraded agenda field, never a hard error.
    #[error("domain unavailable: {0}")]
    Unavailable(String),

    /// Task store could not be read or written. There is no fallback tier
    /// for persistence, so this reaches the Todo caller.
    #[error("store error: {0}")]
    Store(String),
}
