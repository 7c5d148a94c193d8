//! Activity trail entities.
//!
//! An [`ActivityRecord`] is one immutable entry in the append-only audit
//! log: who did what, to which entity, with an optional before/after
//! snapshot of the entity's state.

pub mod action;
pub mod model;
pub mod snapshot;

pub use action::{ActivityAction, EntityKind};
pub use model::{
    ActionCount, ActivityCount, ActivityFilter, ActivityRecord, ActivityWithActor, ActorSummary,
    DateRange, EntityActivitySummary, NewActivity,
};
pub use snapshot::{ChangeSet, SNAPSHOT_SCHEMA_VERSION, Snapshot};
