mod bcrypt;
mod errors;

pub use self::bcrypt::PasswordHasher;
pub use self::errors::PasswordError;
