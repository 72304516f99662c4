use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use s3_version_tools::{
    adapters::inbound::cli::{
        LoggingArgs, OutputFormat, StorageArgs, render_versions, report_failure, shutdown_token,
    },
    app::{AppBuilder, StorageBackend},
    domain::{BucketName, ObjectKey, VersionError},
    ports::VersionListingService,
};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "show-versions")]
#[command(about = "List every stored version of a single S3 object", long_about = None)]
struct Cli {
    /// Bucket holding the object
    #[arg(short, long)]
    bucket: BucketName,

    /// Exact object key
    #[arg(short, long)]
    key: ObjectKey,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

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

    info!(bucket = %cli.bucket, key = %cli.key, "Listing object versions");

    let records = app
        .version_listing_service
        .list_versions(&cli.bucket, &cli.key, cancel)
        .await?;

    let rendered =
        render_versions(&records, cli.output).context("Failed to render version listing")?;
    println!("{}", rendered);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parses_required_flags() {
        let cli =
            Cli::try_parse_from(["show-versions", "-b", "archive", "-k", "docs/readme.txt"])
                .unwrap();

        assert_eq!(cli.bucket.as_str(), "archive");
        assert_eq!(cli.key.as_str(), "docs/readme.txt");
        assert_eq!(cli.output, OutputFormat::Table);
    }

    #[test]
    fn test_json_output_flag() {
        let cli = Cli::try_parse_from([
            "show-versions",
            "--bucket",
            "archive",
            "--key",
            "a.txt",
            "-o",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let err = Cli::try_parse_from(["show-versions", "-b", "archive"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_invalid_bucket_is_rejected() {
        let err =
            Cli::try_parse_from(["show-versions", "-b", "my/bucket", "-k", "a.txt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        // Short legacy names are left to the backend.
        assert!(Cli::try_parse_from(["show-versions", "-b", "ab", "-k", "a.txt"]).is_ok());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
