//! Credential hashing and access tokens for the House Hunter backend.
//!
//! - [`PasswordHasher`]: bcrypt with a fixed work factor of 10
//! - [`JwtHandler`]: HS256 tokens valid for 24 hours from issue
//! - [`Authenticator`]: both of the above behind one shared handle
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(4).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue(Claims::new().with_extra("email", "ann@x.com")).unwrap();
//! let decoded = handler.verify(&token).unwrap();
//! assert_eq!(decoded.get("email").and_then(|v| v.as_str()), Some("ann@x.com"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
