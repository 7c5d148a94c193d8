//! Direct messaging.

pub mod service;

pub use service::MessageService;
