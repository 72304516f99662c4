use crate::domain::{
    errors::VersionResult,
    models::VersionRecord,
    value_objects::{BucketName, ObjectKey},
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Service port for inspecting the versions of a single key
#[async_trait]
pub trait VersionListingService: Send + Sync + 'static {
    /// List every version of exactly `key`, in backend order
    ///
    /// Fails with `VersionError::NotFound` when the key has no versions.
    async fn list_versions(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        cancel: &CancellationToken,
    ) -> VersionResult<Vec<VersionRecord>>;
}
