pub mod retention;
pub mod version;

pub use retention::{RetentionPlan, VersionGroups, VersionOrdering};
pub use version::{
    DeletionRecord, ObjectVersion, PageMarker, VersionPage, VersionRecord, SIZE_UNKNOWN,
};
