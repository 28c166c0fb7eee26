use super::errors::PasswordError;

/// Credential hasher backed by bcrypt.
///
/// Hashes carry their own salt and work factor, so a hash produced with one
/// cost still verifies after the configured cost changes.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Work factor applied to new hashes.
    pub const DEFAULT_COST: u32 = 10;

    const MIN_COST: u32 = 4;
    const MAX_COST: u32 = 31;

    /// Create a hasher using [`Self::DEFAULT_COST`].
    pub fn new() -> Self {
        Self {
            cost: Self::DEFAULT_COST,
        }
    }

    /// Create a hasher with an explicit work factor.
    ///
    /// # Errors
    /// * `InvalidCost` - Cost outside the range bcrypt accepts
    pub fn with_cost(cost: u32) -> Result<Self, PasswordError> {
        if !(Self::MIN_COST..=Self::MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// CPU-bound; async callers should run it on a blocking thread.
    ///
    /// # Returns
    /// Modular crypt string (`$2b$<cost>$<salt+hash>`)
    ///
    /// # Errors
    /// * `HashingFailed` - bcrypt could not produce a hash
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Returns
    /// `true` if the password matches, `false` otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid bcrypt string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(password, hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
