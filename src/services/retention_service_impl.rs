use crate::{
    domain::{
        errors::VersionResult,
        models::{DeletionRecord, VersionGroups},
    },
    ports::{
        services::{DeletionListener, PruneReport, PruneRequest, RetentionService},
        storage::VersionStore,
    },
    services::pagination::{ensure_active, version_pages},
};
use async_trait::async_trait;
use futures::{StreamExt, pin_mut};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Implementation of the retention pruner
///
/// Runs strictly sequentially: every page is read before the first delete,
/// then deletes are issued one at a time. Nothing is rolled back on failure.
#[derive(Clone)]
pub struct RetentionServiceImpl {
    store: Arc<dyn VersionStore>,
}

impl RetentionServiceImpl {
    pub fn new(store: Arc<dyn VersionStore>) -> Self {
        Self { store }
    }

    async fn collect_groups(
        &self,
        request: &PruneRequest,
        cancel: &CancellationToken,
    ) -> VersionResult<VersionGroups> {
        let pages = version_pages(
            self.store.as_ref(),
            &request.bucket,
            &request.prefix,
            cancel,
        );
        pin_mut!(pages);

        let mut groups = VersionGroups::new();
        while let Some(page) = pages.next().await {
            groups.extend(page?.versions);
        }

        Ok(groups)
    }
}

#[async_trait]
impl RetentionService for RetentionServiceImpl {
    async fn prune_versions(
        &self,
        request: &PruneRequest,
        listener: &dyn DeletionListener,
        cancel: &CancellationToken,
    ) -> VersionResult<PruneReport> {
        let groups = self.collect_groups(request, cancel).await?;
        let keys_scanned = groups.key_count();
        let versions_scanned = groups.version_count();

        debug!(
            bucket = %request.bucket,
            prefix = %request.prefix,
            keys = keys_scanned,
            versions = versions_scanned,
            retain = %request.retain,
            ordering = %request.ordering,
            "Collected versions"
        );

        let mut deletions = Vec::new();
        for plan in groups.plan(request.retain, request.ordering) {
            if plan.is_noop() {
                continue;
            }

            debug!(
                key = %plan.key,
                keep = plan.keep.len(),
                delete = plan.delete.len(),
                "Applying retention"
            );

            for version in plan.delete {
                if let Err(err) = ensure_active(cancel) {
                    warn!(deleted = deletions.len(), "Pruning interrupted");
                    return Err(err);
                }

                self.store
                    .delete_version(&request.bucket, &version.key, &version.version_id)
                    .await?;

                let record = DeletionRecord {
                    key: version.key,
                    version_id: version.version_id,
                };
                info!(key = %record.key, version_id = %record.version_id, "Deleted version");
                listener.on_deleted(&record);
                deletions.push(record);
            }
        }

        info!(
            bucket = %request.bucket,
            prefix = %request.prefix,
            keys = keys_scanned,
            deleted = deletions.len(),
            "Pruning finished"
        );

        Ok(PruneReport {
            deletions,
            keys_scanned,
            versions_scanned,
        })
    }
}
