use crate::domain::value_objects::{ObjectKey, VersionId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Shown in place of a size the backend did not report
pub const SIZE_UNKNOWN: &str = "unknown";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One stored revision of an object, as reported by the backend
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectVersion {
    pub key: ObjectKey,
    pub version_id: VersionId,
    pub is_latest: bool,
    pub size: Option<u64>,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Position to resume a version listing from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMarker {
    pub key_marker: String,
    pub version_id_marker: Option<String>,
}

/// A single page of a version listing
#[derive(Debug, Clone, Default)]
pub struct VersionPage {
    pub versions: Vec<ObjectVersion>,
    /// Present when the listing is truncated and more pages follow
    pub next_marker: Option<PageMarker>,
}

/// Display-ready view of one version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRecord {
    pub key: String,
    pub version_id: String,
    pub etag: String,
    pub size: String,
    pub latest: String,
    pub last_modified: String,
}

impl From<&ObjectVersion> for VersionRecord {
    fn from(version: &ObjectVersion) -> Self {
        Self {
            key: version.key.to_string(),
            version_id: version.version_id.to_string(),
            etag: version
                .etag
                .as_deref()
                .map(|etag| etag.trim_matches('"').to_string())
                .unwrap_or_default(),
            size: version
                .size
                .map(|size| size.to_string())
                .unwrap_or_else(|| SIZE_UNKNOWN.to_string()),
            latest: if version.is_latest { "yes" } else { "" }.to_string(),
            last_modified: version
                .last_modified
                .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }
}

/// A version that was permanently deleted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionRecord {
    pub key: ObjectKey,
    pub version_id: VersionId,
}

impl std::fmt::Display for DeletionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Deleted old version of {} (VersionId: {})",
            self.key, self.version_id
        )
    }
}
