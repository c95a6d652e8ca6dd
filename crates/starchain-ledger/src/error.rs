//! Registry error types.

use starchain_core::CoreError;
use thiserror::Error;

/// Errors surfaced by registry operations.
///
/// The challenge checks are ordered: a missing or mismatched challenge is
/// reported before expiry, and expiry before signature verification, so a
/// caller always learns the earliest reason their submission cannot
/// proceed.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("not found")]
    NotFound,

    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error("no matching challenge for this address and message")]
    ChallengeMismatch,

    #[error("challenge expired, request a new one")]
    ChallengeExpired,

    #[error("signature verification failed")]
    InvalidSignature,

    #[error(transparent)]
    Body(#[from] CoreError),
}
