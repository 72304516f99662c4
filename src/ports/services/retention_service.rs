use crate::domain::{
    errors::VersionResult,
    models::{DeletionRecord, VersionOrdering},
    value_objects::{BucketName, RetainCount},
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Service port for pruning old versions under a prefix
#[async_trait]
pub trait RetentionService: Send + Sync + 'static {
    /// Keep the newest `retain` versions of every key under the prefix and
    /// permanently delete the rest
    ///
    /// The first backend failure aborts the run. Deletions issued before it
    /// stay deleted and have already been reported to `listener`.
    async fn prune_versions(
        &self,
        request: &PruneRequest,
        listener: &dyn DeletionListener,
        cancel: &CancellationToken,
    ) -> VersionResult<PruneReport>;
}

/// Parameters of a pruning run
#[derive(Debug, Clone)]
pub struct PruneRequest {
    pub bucket: BucketName,
    /// May be empty to cover the whole bucket
    pub prefix: String,
    pub retain: RetainCount,
    pub ordering: VersionOrdering,
}

/// Outcome of a completed pruning run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PruneReport {
    pub deletions: Vec<DeletionRecord>,
    pub keys_scanned: usize,
    pub versions_scanned: usize,
}

/// Notified after every successful delete
pub trait DeletionListener: Send + Sync {
    fn on_deleted(&self, record: &DeletionRecord);
}

impl<F> DeletionListener for F
where
    F: Fn(&DeletionRecord) + Send + Sync,
{
    fn on_deleted(&self, record: &DeletionRecord) {
        self(record)
    }
}
