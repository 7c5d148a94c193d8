//! # taskhub-database
//!
//! PostgreSQL connection management, store trait seams, and the concrete
//! repository implementations for all TaskHub entities.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod stores;

pub use connection::DatabasePool;
pub use stores::{ActivityStore, MessageStore, ProjectStore, TaskStore, UserStore};
