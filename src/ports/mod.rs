pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use services::{
    DeletionListener, PruneReport, PruneRequest, RetentionService, VersionListingService,
};
pub use storage::VersionStore;
