use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use s3_version_tools::{
    adapters::inbound::cli::{LoggingArgs, StorageArgs, report_failure, shutdown_token},
    app::{AppBuilder, StorageBackend},
    domain::{BucketName, DeletionRecord, RetainCount, VersionError, VersionOrdering},
    ports::{PruneRequest, RetentionService},
};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cleanup-objects")]
#[command(
    about = "Delete old object versions under a prefix, keeping the newest per key",
    long_about = None
)]
struct Cli {
    /// Bucket to clean up
    #[arg(short, long)]
    bucket: BucketName,

    /// Key prefix to scan (empty matches every key)
    #[arg(short, long)]
    prefix: String,

    /// Number of versions to keep per key (must be > 0)
    #[arg(short, long, allow_negative_numbers = true)]
    retain: RetainCount,

    /// How versions are ranked before the oldest are pruned
    #[arg(long, default_value = "last-modified")]
    order_by: VersionOrdering,

    #[command(flatten)]
    storage: StorageArgs,

    #[command(flatten)]
    logging: LoggingArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(err) = cli.logging.init_logging() {
        eprintln!("{:#}", err);
    }

    let cancel = shutdown_token();

    match run(cli, &cancel).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_failure(&err),
    }
}

async fn run(cli: Cli, cancel: &CancellationToken) -> Result<()> {
    let app = AppBuilder::new()
        .with_storage_backend(StorageBackend::S3(cli.storage.to_s3_config()))
        .build()
        .await
        .map_err(VersionError::from)?;

    let request = PruneRequest {
        bucket: cli.bucket,
        prefix: cli.prefix,
        retain: cli.retain,
        ordering: cli.order_by,
    };

    let print_deletion = |record: &DeletionRecord| println!("{}", record);
    let report = app
        .retention_service
        .prune_versions(&request, &print_deletion, cancel)
        .await?;

    info!(
        deleted = report.deletions.len(),
        keys = report.keys_scanned,
        versions = report.versions_scanned,
        "Cleanup finished"
    );

    Ok(())
}
