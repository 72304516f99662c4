use std::sync::Arc;

use crate::{
    adapters::outbound::storage::{InMemoryVersionStore, S3Config, S3VersionStore},
    domain::errors::VersionError,
    ports::storage::VersionStore,
    services::{RetentionServiceImpl, VersionListingServiceImpl},
};

/// Configuration for the application
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
}

/// Storage backend configuration
#[derive(Debug, Clone, Default)]
pub enum StorageBackend {
    #[default]
    InMemory,
    S3(S3Config),
}

/// Application services container
pub struct AppServices {
    pub version_listing_service: VersionListingServiceImpl,
    pub retention_service: RetentionServiceImpl,
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    version_store: Option<Arc<dyn VersionStore>>,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            version_store: None,
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Use an existing store instead of building one from the configuration
    pub fn with_version_store(mut self, store: Arc<dyn VersionStore>) -> Self {
        self.version_store = Some(store);
        self
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let store = match self.version_store {
            Some(store) => store,
            None => Self::create_version_store(&self.config.storage_backend).await?,
        };

        Ok(AppServices {
            version_listing_service: VersionListingServiceImpl::new(store.clone()),
            retention_service: RetentionServiceImpl::new(store),
        })
    }

    /// Create the storage adapter based on configuration
    async fn create_version_store(
        backend: &StorageBackend,
    ) -> Result<Arc<dyn VersionStore>, AppError> {
        match backend {
            StorageBackend::InMemory => Ok(Arc::new(InMemoryVersionStore::new())),
            StorageBackend::S3(config) => {
                if let Some(endpoint) = &config.endpoint {
                    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                        return Err(AppError::Configuration {
                            message: format!(
                                "endpoint '{}' must start with http:// or https://",
                                endpoint
                            ),
                        });
                    }
                }

                Ok(Arc::new(S3VersionStore::from_config(config).await))
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl From<AppError> for VersionError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Configuration { message } => VersionError::Config { message },
        }
    }
}

/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .build()
        .await
}

/// Create an S3-backed application
pub async fn create_s3_app(config: S3Config) -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::S3(config))
        .build()
        .await
}
