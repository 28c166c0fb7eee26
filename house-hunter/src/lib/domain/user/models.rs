use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PhoneError;
use crate::user::errors::RoleError;
use crate::user::errors::UserError;

/// Registered user.
///
/// `password_hash` is the bcrypt string, never the plaintext.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub role: Role,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name of a user. Trimmed, non-empty, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 100;

    /// Create a validated name.
    ///
    /// # Errors
    /// * `Empty` - Blank after trimming
    /// * `TooLong` - Longer than 100 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim();
        let length = name.chars().count();
        if length == 0 {
            Err(NameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Email address type
///
/// Validated against RFC 5322 and kept exactly as submitted; lookups and the
/// uniqueness constraint are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Contact phone number. Free-form, but limited to dialling characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MAX_LENGTH: usize = 32;

    /// Create a validated phone number.
    ///
    /// # Errors
    /// * `Empty` - Blank after trimming
    /// * `TooLong` - Longer than 32 characters
    /// * `InvalidCharacters` - Anything other than digits, spaces and `+-()`
    pub fn new(phone: String) -> Result<Self, PhoneError> {
        let phone = phone.trim();
        let length = phone.chars().count();
        if length == 0 {
            return Err(PhoneError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(PhoneError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
        {
            return Err(PhoneError::InvalidCharacters);
        }
        Ok(Self(phone.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Account category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Buyer,
    Seller,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            _ => Err(RoleError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated input of the registration use case
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub role: Role,
    pub password: String,
}

impl RegisterUserCommand {
    /// Construct a registration command.
    ///
    /// # Arguments
    /// * `password` - Plain text password (hashed by the service)
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    pub fn new(
        name: PersonName,
        email: EmailAddress,
        phone: PhoneNumber,
        role: Role,
        password: String,
    ) -> Result<Self, UserError> {
        if password.is_empty() {
            return Err(UserError::EmptyPassword);
        }
        Ok(Self {
            name,
            email,
            phone,
            role,
            password,
        })
    }
}
