pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - version models and value objects
pub use domain::{
    BucketName,
    DeletionRecord,
    DomainValidationError,
    ObjectKey,
    // Models
    ObjectVersion,
    PageMarker,
    RetainCount,
    RetentionPlan,
    VersionGroups,
    // Value objects
    VersionId,
    VersionOrdering,
    VersionPage,
    VersionRecord,
    // Errors
    VersionError,
    VersionResult,
};

// Port types - interfaces for external systems
pub use ports::{
    DeletionListener,
    PruneReport,
    PruneRequest,
    // Service ports
    RetentionService,
    VersionListingService,
    // Storage ports
    VersionStore,
};

// Service implementations - business logic
pub use services::{RetentionServiceImpl, VersionListingServiceImpl, version_pages};

// Application factory and configuration
pub use app::{
    AppBuilder, AppConfig, AppError, AppServices, StorageBackend, create_in_memory_app,
    create_s3_app,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::storage::{InMemoryVersionStore, S3Config, S3VersionStore};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        AppBuilder, AppServices, BucketName, InMemoryVersionStore, ObjectKey, PruneRequest,
        RetainCount, RetentionService, S3Config, S3VersionStore, VersionId,
        VersionListingService, VersionOrdering, VersionStore, create_in_memory_app,
        create_s3_app,
    };
}
