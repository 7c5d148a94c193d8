//! Task entity.

pub mod model;
pub mod priority;
pub mod status;

pub use model::{NewTask, Task, TaskPatch};
pub use priority::TaskPriority;
pub use status::TaskStatus;
