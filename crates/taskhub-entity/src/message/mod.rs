//! Direct message entity.

pub mod model;

pub use model::{Message, NewMessage};
