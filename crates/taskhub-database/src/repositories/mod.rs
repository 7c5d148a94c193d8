//! Concrete PostgreSQL repository implementations of the store traits.

pub mod activity;
pub mod message;
pub mod project;
pub mod task;
pub mod user;

pub use activity::ActivityRepository;
pub use message::MessageRepository;
pub use project::ProjectRepository;
pub use task::TaskRepository;
pub use user::UserRepository;
