//! User self-service and directory lookups.

pub mod service;

pub use service::UserService;
