use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{VersionError, VersionResult},
        models::{DeletionRecord, ObjectVersion, PageMarker, VersionOrdering, VersionPage},
        value_objects::{BucketName, ObjectKey, VersionId},
    },
    ports::storage::VersionStore,
};

const DEFAULT_PAGE_SIZE: usize = 1000;
const CLOCK_START_SECS: i64 = 1_704_067_200;

/// In-memory implementation of VersionStore for testing and development
///
/// Versions are kept the way S3 lists them: keys ascending, newest version
/// first within a key. Versions with equal timestamps stay in insertion order.
/// Writes flip the latest flag and deleting the latest version promotes the
/// next newest one.
#[derive(Clone)]
pub struct InMemoryVersionStore {
    data: Arc<RwLock<StoreData>>,
    page_size: usize,
    list_calls: Arc<AtomicUsize>,
}

#[derive(Default)]
struct StoreData {
    // bucket name -> versions in listing order
    buckets: HashMap<String, Vec<ObjectVersion>>,
    deletion_log: Vec<DeletionRecord>,
    sequence: u64,
    fail_listing: bool,
    fail_deletes: HashSet<VersionId>,
}

impl InMemoryVersionStore {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Store that returns at most `page_size` versions per listing call
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            data: Arc::new(RwLock::new(StoreData::default())),
            page_size: page_size.max(1),
            list_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn create_bucket(&self, bucket: &BucketName) {
        let mut data = self.data.write().await;
        data.buckets.entry(bucket.to_string()).or_default();
    }

    /// Write a new version of `key`, which becomes the latest one
    pub async fn put_version(
        &self,
        bucket: &BucketName,
        key: &str,
        size: Option<u64>,
    ) -> VersionResult<VersionId> {
        let key = ObjectKey::new(key.to_string())?;
        let mut data = self.data.write().await;

        data.sequence += 1;
        let sequence = data.sequence;
        // Zero padded so that id order follows write order.
        let version_id = VersionId::new(format!("{:020}", sequence))?;

        let versions = data.buckets.entry(bucket.to_string()).or_default();
        for existing in versions.iter_mut().filter(|v| v.key == key) {
            existing.is_latest = false;
        }

        versions.push(ObjectVersion {
            key,
            version_id: version_id.clone(),
            is_latest: true,
            size,
            etag: Some(format!("\"{:032x}\"", sequence)),
            last_modified: Some(Self::clock(sequence)),
        });
        Self::sort(versions);

        Ok(version_id)
    }

    /// Insert a version exactly as given, latest flag included
    pub async fn insert_version(&self, bucket: &BucketName, version: ObjectVersion) {
        let mut data = self.data.write().await;
        let versions = data.buckets.entry(bucket.to_string()).or_default();
        versions.push(version);
        Self::sort(versions);
    }

    /// Current versions of the bucket in listing order
    pub async fn versions(&self, bucket: &BucketName) -> Vec<ObjectVersion> {
        let data = self.data.read().await;
        data.buckets
            .get(bucket.as_str())
            .cloned()
            .unwrap_or_default()
    }

    /// Every successful delete, in the order it happened
    pub async fn deletion_log(&self) -> Vec<DeletionRecord> {
        self.data.read().await.deletion_log.clone()
    }

    /// Make every subsequent listing call fail
    pub async fn fail_listing(&self) {
        self.data.write().await.fail_listing = true;
    }

    /// Make deleting this particular version fail
    pub async fn fail_delete_of(&self, version_id: &VersionId) {
        self.data
            .write()
            .await
            .fail_deletes
            .insert(version_id.clone());
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    // One second per write, starting 2024-01-01T00:00:00Z.
    fn clock(sequence: u64) -> DateTime<Utc> {
        DateTime::from_timestamp(CLOCK_START_SECS + sequence as i64, 0).unwrap_or_default()
    }

    fn sort(versions: &mut [ObjectVersion]) {
        versions.sort_by(|a, b| {
            a.key
                .cmp(&b.key)
                .then_with(|| VersionOrdering::LastModified.compare(a, b))
        });
    }

    fn start_after(versions: &[&ObjectVersion], marker: &PageMarker) -> usize {
        let exact = marker.version_id_marker.as_deref().and_then(|id| {
            versions.iter().position(|v| {
                v.key.as_str() == marker.key_marker && v.version_id.as_str() == id
            })
        });

        match exact {
            Some(position) => position + 1,
            None => versions
                .iter()
                .position(|v| v.key.as_str() > marker.key_marker.as_str())
                .unwrap_or(versions.len()),
        }
    }

    fn no_such_bucket(operation: &str, bucket: &BucketName) -> VersionError {
        VersionError::backend(
            operation,
            format!("NoSuchBucket: the bucket '{}' does not exist", bucket),
        )
    }
}

impl Default for InMemoryVersionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VersionStore for InMemoryVersionStore {
    async fn list_versions_page(
        &self,
        bucket: &BucketName,
        prefix: &str,
        marker: Option<&PageMarker>,
    ) -> VersionResult<VersionPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let data = self.data.read().await;

        if data.fail_listing {
            return Err(VersionError::backend(
                "ListObjectVersions",
                "InternalError: listing failed",
            ));
        }

        let versions = data
            .buckets
            .get(bucket.as_str())
            .ok_or_else(|| Self::no_such_bucket("ListObjectVersions", bucket))?;

        let matching: Vec<&ObjectVersion> =
            versions.iter().filter(|v| v.key.has_prefix(prefix)).collect();

        let start = marker.map_or(0, |m| Self::start_after(&matching, m));
        let end = (start + self.page_size).min(matching.len());
        let page: Vec<ObjectVersion> = matching[start..end].iter().map(|v| (*v).clone()).collect();

        let next_marker = if end < matching.len() {
            page.last().map(|last| PageMarker {
                key_marker: last.key.to_string(),
                version_id_marker: Some(last.version_id.to_string()),
            })
        } else {
            None
        };

        Ok(VersionPage {
            versions: page,
            next_marker,
        })
    }

    async fn delete_version(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        version_id: &VersionId,
    ) -> VersionResult<()> {
        let mut data = self.data.write().await;

        if data.fail_deletes.contains(version_id) {
            return Err(VersionError::backend(
                "DeleteObject",
                format!("AccessDenied: cannot delete version {}", version_id),
            ));
        }

        let versions = data
            .buckets
            .get_mut(bucket.as_str())
            .ok_or_else(|| Self::no_such_bucket("DeleteObject", bucket))?;

        let position = versions
            .iter()
            .position(|v| &v.key == key && &v.version_id == version_id)
            .ok_or_else(|| {
                VersionError::backend(
                    "DeleteObject",
                    format!("NoSuchVersion: {} of {}", version_id, key),
                )
            })?;

        let removed = versions.remove(position);
        if removed.is_latest {
            // Versions are newest first within a key.
            if let Some(next) = versions.iter_mut().find(|v| &v.key == key) {
                next.is_latest = true;
            }
        }

        data.deletion_log.push(DeletionRecord {
            key: key.clone(),
            version_id: version_id.clone(),
        });

        Ok(())
    }
}
