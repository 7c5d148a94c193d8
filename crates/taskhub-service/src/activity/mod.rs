//! Activity trail services: the append-only writer and the
//! tenant-scoped read side.

pub mod query;
pub mod recorder;

pub use query::{ActivityQueryService, RecentFilter};
pub use recorder::ActivityRecorder;
