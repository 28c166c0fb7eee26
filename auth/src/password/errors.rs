use thiserror::Error;

/// Failures of the credential hasher.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Work factor {0} is outside the bcrypt range 4..=31")]
    InvalidCost(u32),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
