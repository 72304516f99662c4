// Infrastructure error types
pub mod error;

// Storage implementations
pub mod in_memory_version_store;
pub mod s3;

// Re-export key types
pub use error::StoreError;
pub use in_memory_version_store::InMemoryVersionStore;
pub use s3::{S3Config, S3VersionStore, create_s3_client};
