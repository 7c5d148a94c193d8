//! Project entity.

pub mod model;
pub mod status;

pub use model::{NewProject, Project, ProjectPatch};
pub use status::ProjectStatus;
