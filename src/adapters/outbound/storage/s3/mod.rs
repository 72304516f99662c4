//! S3 storage adapter implementation using the AWS SDK
//!
//! Works against AWS itself and any S3-compatible endpoint (MinIO, Ceph, ...).

pub mod s3_version_store;

pub use s3_version_store::S3VersionStore;

use aws_config::{BehaviorVersion, Region, meta::region::RegionProviderChain};
use aws_sdk_s3::{Client, config::Credentials};

/// Region used when neither the flag nor the AWS provider chain names one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Configuration for the S3 storage backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct S3Config {
    pub region: Option<String>,
    /// Custom endpoint URL for self-hosted storage
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

impl S3Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Explicit credentials, if both halves are present and non-empty
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (self.access_key.as_deref(), self.secret_key.as_deref()) {
            (Some(access), Some(secret)) if !access.is_empty() && !secret.is_empty() => {
                Some((access, secret))
            }
            _ => None,
        }
    }
}

/// Create an S3 client from configuration
///
/// Without explicit credentials the default AWS chain applies (environment,
/// shared profile, instance metadata). A custom endpoint switches to
/// path-style addressing, which self-hosted servers generally expect.
pub async fn create_s3_client(config: &S3Config) -> Client {
    let region = RegionProviderChain::first_try(config.region.clone().map(Region::new))
        .or_default_provider()
        .or_else(DEFAULT_REGION);

    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);

    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    if let Some((access_key, secret_key)) = config.static_credentials() {
        let credentials = Credentials::new(access_key, secret_key, None, None, "s3-version-tools");
        loader = loader.credentials_provider(credentials);
    }

    let shared_config = loader.load().await;
    let builder = aws_sdk_s3::config::Builder::from(&shared_config);

    let s3_config = if config.endpoint.is_some() {
        builder.force_path_style(true).build()
    } else {
        builder.build()
    };

    Client::from_conf(s3_config)
}
