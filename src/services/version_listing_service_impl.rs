use crate::{
    domain::{
        errors::{VersionError, VersionResult},
        models::VersionRecord,
        value_objects::{BucketName, ObjectKey},
    },
    ports::{services::VersionListingService, storage::VersionStore},
    services::pagination::version_pages,
};
use async_trait::async_trait;
use futures::{StreamExt, pin_mut};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Implementation of the version enumerator
#[derive(Clone)]
pub struct VersionListingServiceImpl {
    store: Arc<dyn VersionStore>,
}

impl VersionListingServiceImpl {
    pub fn new(store: Arc<dyn VersionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl VersionListingService for VersionListingServiceImpl {
    async fn list_versions(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        cancel: &CancellationToken,
    ) -> VersionResult<Vec<VersionRecord>> {
        // The backend only filters by prefix, so "a.txt" also returns "a.txt.bak".
        let pages = version_pages(self.store.as_ref(), bucket, key.as_str(), cancel);
        pin_mut!(pages);

        let mut records = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page?;

            records.extend(
                page.versions
                    .iter()
                    .filter(|version| &version.key == key)
                    .map(VersionRecord::from),
            );

            // Keys come back in ascending order; nothing after this page can match.
            if page.versions.last().is_some_and(|last| last.key > *key) {
                debug!(key = %key, "Listing moved past key, stopping");
                break;
            }
        }

        if records.is_empty() {
            return Err(VersionError::NotFound {
                key: key.clone(),
                bucket: bucket.clone(),
            });
        }

        info!(
            bucket = %bucket,
            key = %key,
            versions = records.len(),
            "Listed object versions"
        );
        Ok(records)
    }
}
