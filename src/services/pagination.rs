//! Paginated version listing shared by the enumeration and retention services.

use crate::{
    domain::{
        errors::{VersionError, VersionResult},
        models::{PageMarker, VersionPage},
        value_objects::BucketName,
    },
    ports::storage::VersionStore,
};
use async_stream::try_stream;
use futures::Stream;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Fail with `VersionError::Cancelled` once the token has fired
pub(crate) fn ensure_active(cancel: &CancellationToken) -> VersionResult<()> {
    if cancel.is_cancelled() {
        return Err(VersionError::Cancelled);
    }
    Ok(())
}

/// Stream every page of the version listing under `prefix`.
///
/// Pages are fetched one at a time and only when polled. The token is checked
/// before each fetch, so a cancelled listing ends with `VersionError::Cancelled`
/// instead of issuing another request.
pub fn version_pages<'a>(
    store: &'a dyn VersionStore,
    bucket: &'a BucketName,
    prefix: &'a str,
    cancel: &'a CancellationToken,
) -> impl Stream<Item = VersionResult<VersionPage>> + Send + 'a {
    try_stream! {
        let mut marker: Option<PageMarker> = None;
        let mut page_number = 0usize;

        loop {
            ensure_active(cancel)?;
            page_number += 1;

            let page = store
                .list_versions_page(bucket, prefix, marker.as_ref())
                .await?;
            debug!(
                bucket = %bucket,
                prefix,
                page = page_number,
                versions = page.versions.len(),
                truncated = page.next_marker.is_some(),
                "Fetched version page"
            );

            let next_marker = page.next_marker.clone();
            if next_marker.is_some() && next_marker == marker {
                Err::<(), _>(VersionError::backend(
                    "ListObjectVersions",
                    "pagination marker did not advance",
                ))?;
            }

            yield page;

            match next_marker {
                Some(next) => marker = Some(next),
                None => break,
            }
        }
    }
}
