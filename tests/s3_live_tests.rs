use aws_sdk_s3::{
    primitives::ByteStream,
    types::{BucketVersioningStatus, VersioningConfiguration},
};
use s3_version_tools::{
    BucketName, DeletionRecord, ObjectKey, PruneRequest, RetainCount, RetentionService, S3Config,
    VersionListingService, VersionOrdering, adapters::outbound::storage::create_s3_client,
    create_s3_app,
};
use tokio_util::sync::CancellationToken;

// Note: These tests require an S3-compatible server configured via environment variables:
// - S3_ENDPOINT (default: http://localhost:9000)
// - S3_ACCESS_KEY (default: minioadmin)
// - S3_SECRET_KEY (default: minioadmin)
// - S3_TEST_BUCKET (default: version-tools-test)

fn live_config() -> (S3Config, String) {
    let endpoint =
        std::env::var("S3_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string());
    let access_key = std::env::var("S3_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());
    let secret_key = std::env::var("S3_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string());
    let bucket =
        std::env::var("S3_TEST_BUCKET").unwrap_or_else(|_| "version-tools-test".to_string());

    let config = S3Config::new()
        .with_endpoint(endpoint)
        .with_credentials(access_key, secret_key);
    (config, bucket)
}

#[tokio::test]
#[ignore = "requires an S3-compatible server to be running"]
async fn test_list_and_prune_against_live_server() {
    let (config, bucket_name) = live_config();
    let client = create_s3_client(&config).await;

    // Bucket may already exist from an earlier run.
    let _ = client.create_bucket().bucket(&bucket_name).send().await;
    client
        .put_bucket_versioning()
        .bucket(&bucket_name)
        .versioning_configuration(
            VersioningConfiguration::builder()
                .status(BucketVersioningStatus::Enabled)
                .build(),
        )
        .send()
        .await
        .unwrap();

    let object_key = format!("live-test/{}.txt", chrono::Utc::now().timestamp_millis());
    for body in ["one", "two", "three"] {
        client
            .put_object()
            .bucket(&bucket_name)
            .key(&object_key)
            .body(ByteStream::from_static(body.as_bytes()))
            .send()
            .await
            .unwrap();
    }

    let app = create_s3_app(config).await.unwrap();
    let bucket = BucketName::new(bucket_name).unwrap();
    let key = ObjectKey::new(object_key.clone()).unwrap();
    let cancel = CancellationToken::new();

    let records = app
        .version_listing_service
        .list_versions(&bucket, &key, &cancel)
        .await
        .unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].latest, "yes");

    let request = PruneRequest {
        bucket: bucket.clone(),
        prefix: object_key,
        retain: RetainCount::new(1).unwrap(),
        ordering: VersionOrdering::LastModified,
    };
    let report = app
        .retention_service
        .prune_versions(&request, &|_: &DeletionRecord| {}, &cancel)
        .await
        .unwrap();
    assert_eq!(report.deletions.len(), 2);

    let remaining = app
        .version_listing_service
        .list_versions(&bucket, &key, &cancel)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].version_id, records[0].version_id);
}
