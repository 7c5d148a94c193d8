//! # taskhub-auth
//!
//! Authentication primitives for TaskHub: JWT encoding/decoding and
//! Argon2id password hashing. Session state beyond the signed token is
//! out of scope — the API trusts a valid bearer token.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
