//! # taskhub-entity
//!
//! Domain entity models for TaskHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod activity;
pub mod message;
pub mod project;
pub mod task;
pub mod user;
