mod retention_service;
mod version_listing_service;

pub use retention_service::{DeletionListener, PruneReport, PruneRequest, RetentionService};
pub use version_listing_service::VersionListingService;
