use crate::{
    adapters::outbound::storage::error::StoreError,
    domain::{
        errors::VersionResult,
        models::{ObjectVersion, PageMarker, VersionPage},
        value_objects::{BucketName, ObjectKey, VersionId},
    },
    ports::storage::VersionStore,
};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::types::ObjectVersion as S3ObjectVersion;
use chrono::DateTime;
use tracing::debug;

use super::{S3Config, create_s3_client};

const LIST_OPERATION: &str = "ListObjectVersions";
const DELETE_OPERATION: &str = "DeleteObject";

/// Version store backed by the S3 `ListObjectVersions` and `DeleteObject` APIs
#[derive(Clone)]
pub struct S3VersionStore {
    client: Client,
}

impl S3VersionStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn from_config(config: &S3Config) -> Self {
        Self::new(create_s3_client(config).await)
    }
}

#[async_trait]
impl VersionStore for S3VersionStore {
    async fn list_versions_page(
        &self,
        bucket: &BucketName,
        prefix: &str,
        marker: Option<&PageMarker>,
    ) -> VersionResult<VersionPage> {
        let mut request = self
            .client
            .list_object_versions()
            .bucket(bucket.as_str())
            .prefix(prefix);

        if let Some(marker) = marker {
            request = request
                .key_marker(&marker.key_marker)
                .set_version_id_marker(marker.version_id_marker.clone());
        }

        let output = request
            .send()
            .await
            .map_err(|e| StoreError::sdk(LIST_OPERATION, e))?;

        let versions = output
            .versions()
            .iter()
            .map(to_object_version)
            .collect::<Result<Vec<_>, _>>()?;

        let next_marker = if output.is_truncated().unwrap_or(false) {
            output.next_key_marker().map(|key_marker| PageMarker {
                key_marker: key_marker.to_string(),
                version_id_marker: output.next_version_id_marker().map(str::to_string),
            })
        } else {
            None
        };

        debug!(
            bucket = %bucket,
            versions = versions.len(),
            delete_markers = output.delete_markers().len(),
            "ListObjectVersions page"
        );

        Ok(VersionPage {
            versions,
            next_marker,
        })
    }

    async fn delete_version(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        version_id: &VersionId,
    ) -> VersionResult<()> {
        self.client
            .delete_object()
            .bucket(bucket.as_str())
            .key(key.as_str())
            .version_id(version_id.as_str())
            .send()
            .await
            .map_err(|e| StoreError::sdk(DELETE_OPERATION, e))?;

        Ok(())
    }
}

fn to_object_version(version: &S3ObjectVersion) -> Result<ObjectVersion, StoreError> {
    let key = version.key().ok_or_else(|| StoreError::MalformedResponse {
        operation: LIST_OPERATION,
        message: "version entry without a key".to_string(),
    })?;

    // Objects written before versioning was enabled report the id "null".
    let version_id = version.version_id().unwrap_or("null");

    let invalid = |source| StoreError::InvalidValue {
        operation: LIST_OPERATION,
        source,
    };

    Ok(ObjectVersion {
        key: ObjectKey::new(key.to_string()).map_err(invalid)?,
        version_id: VersionId::new(version_id.to_string()).map_err(invalid)?,
        is_latest: version.is_latest().unwrap_or(false),
        size: version.size().and_then(|size| u64::try_from(size).ok()),
        etag: version.e_tag().map(str::to_string),
        last_modified: version
            .last_modified()
            .and_then(|ts| DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::primitives::DateTime as SmithyDateTime;

    #[test]
    fn test_maps_sdk_version() {
        let sdk_version = S3ObjectVersion::builder()
            .key("docs/readme.txt")
            .version_id("3HL4kqtJlcpXroDTDmJ+rmSpXd3dIbrHY")
            .is_latest(true)
            .size(1024)
            .e_tag("\"d41d8cd98f00b204e9800998ecf8427e\"")
            .last_modified(SmithyDateTime::from_secs(1_700_000_000))
            .build();

        let version = to_object_version(&sdk_version).unwrap();

        assert_eq!(version.key.as_str(), "docs/readme.txt");
        assert_eq!(version.version_id.as_str(), "3HL4kqtJlcpXroDTDmJ+rmSpXd3dIbrHY");
        assert!(version.is_latest);
        assert_eq!(version.size, Some(1024));
        assert_eq!(
            version.last_modified.map(|ts| ts.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let sdk_version = S3ObjectVersion::builder().key("a.txt").build();

        let version = to_object_version(&sdk_version).unwrap();

        assert_eq!(version.version_id.as_str(), "null");
        assert!(!version.is_latest);
        assert_eq!(version.size, None);
        assert_eq!(version.etag, None);
        assert_eq!(version.last_modified, None);
    }

    #[test]
    fn test_missing_key_is_malformed() {
        let sdk_version = S3ObjectVersion::builder().version_id("v1").build();

        assert!(matches!(
            to_object_version(&sdk_version),
            Err(StoreError::MalformedResponse { .. })
        ));
    }
}
