//! Registration, login, and logout.

pub mod service;

pub use service::{AuthService, AuthSession, RegisterUser};
