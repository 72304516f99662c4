use crate::domain::{
    errors::VersionResult,
    models::{PageMarker, VersionPage},
    value_objects::{BucketName, ObjectKey, VersionId},
};
use async_trait::async_trait;

/// Port for a version-enabled object storage backend
/// This abstracts the actual gateway (S3, in-memory, ...)
#[async_trait]
pub trait VersionStore: Send + Sync + 'static {
    /// List one page of object versions under `prefix`
    ///
    /// Delete markers are not included. `marker` is the `next_marker` of the
    /// previous page, or `None` for the first page.
    async fn list_versions_page(
        &self,
        bucket: &BucketName,
        prefix: &str,
        marker: Option<&PageMarker>,
    ) -> VersionResult<VersionPage>;

    /// Permanently delete a single version
    async fn delete_version(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        version_id: &VersionId,
    ) -> VersionResult<()>;
}
