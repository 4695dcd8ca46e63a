//! Authentication: salted password digests and signed bearer credentials

pub mod password;
pub mod token;

pub use password::{PasswordError, hash_password, verify_password};
pub use token::{Claims, DEFAULT_TOKEN_TTL_SECS, TokenError, TokenIssuer};
