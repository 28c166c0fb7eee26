use thiserror::Error;

/// Error type for token issuing and verification.
///
/// Verification failures are split by cause; callers guarding routes treat
/// `Expired`, `InvalidSignature` and `Malformed` alike.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
