mod claims;
mod errors;
mod handler;

pub use self::claims::Claims;
pub use self::errors::JwtError;
pub use self::handler::JwtHandler;
