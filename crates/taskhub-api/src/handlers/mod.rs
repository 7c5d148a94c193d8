//! HTTP request handlers, organized by domain.

pub mod activity;
pub mod auth;
pub mod health;
pub mod message;
pub mod project;
pub mod task;
pub mod user;
