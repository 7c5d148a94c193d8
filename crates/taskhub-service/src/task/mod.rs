//! Task management.

pub mod service;

pub use service::TaskService;
