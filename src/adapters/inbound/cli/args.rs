use anyhow::{Context, Result};
use clap::Args;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::adapters::outbound::storage::S3Config;

/// Connection settings shared by both commands
#[derive(Args, Debug, Clone, Default)]
pub struct StorageArgs {
    /// Custom S3 endpoint (e.g. https://myserver.lab.local)
    #[arg(short, long, env = "S3_ENDPOINT")]
    pub endpoint: Option<String>,

    /// S3 region (defaults to the AWS provider chain, then us-east-1)
    #[arg(long, env = "S3_REGION")]
    pub region: Option<String>,

    /// S3 access key (falls back to the AWS credential chain when empty)
    #[arg(long, env = "S3_ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "S3_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,
}

impl StorageArgs {
    pub fn to_s3_config(&self) -> S3Config {
        S3Config {
            region: self.region.clone(),
            endpoint: self.endpoint.clone(),
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct LoggingArgs {
    /// Log level for diagnostics written to stderr
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    pub log_level: LevelFilter,
}

impl LoggingArgs {
    /// Install the global subscriber; stdout stays reserved for command output.
    pub fn init_logging(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .with(self.log_level)
            .try_init()
            .context("Failed to install tracing subscriber")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        storage: StorageArgs,
        #[command(flatten)]
        logging: LoggingArgs,
    }

    #[test]
    fn test_storage_args_to_config() {
        let cli = TestCli::try_parse_from([
            "test",
            "-e",
            "https://myserver.lab.local",
            "--region",
            "eu-central-1",
            "--access-key",
            "AKIA",
            "--secret-key",
            "secret",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let config = cli.storage.to_s3_config();
        assert_eq!(config.endpoint.as_deref(), Some("https://myserver.lab.local"));
        assert_eq!(config.region.as_deref(), Some("eu-central-1"));
        assert_eq!(config.static_credentials(), Some(("AKIA", "secret")));
        assert_eq!(cli.logging.log_level, LevelFilter::DEBUG);
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let result = TestCli::try_parse_from(["test", "--log-level", "loud"]);
        assert!(result.is_err());
    }
}
