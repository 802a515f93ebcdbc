/// API Context - shared state for all API handlers
use filegate_core::FilegateError;
use filegate_core::models::{AppConfig, StorageBackend};
use filegate_core::services::{
    ExtensionRepository, ExtensionService, InMemoryExtensionRepository, LocalStorageService,
    S3StorageService, StorageService, UploadService,
};
use std::sync::Arc;
use tracing::info;

/// API Context contains shared resources for API handlers
#[derive(Clone)]
pub struct ApiContext {
    /// Effective configuration
    pub config: AppConfig,

    /// Extension catalog administration
    pub extensions: Arc<ExtensionService>,

    /// Upload validation and storage
    pub uploads: Arc<UploadService>,

    /// Storage backend, used directly by health checks
    pub storage: Arc<dyn StorageService>,
}

impl ApiContext {
    /// Create a new API context
    ///
    /// Prepares the storage backend and seeds the fixed catalog on first start.
    pub async fn new(config: AppConfig) -> Result<Arc<Self>, FilegateError> {
        let repository: Arc<dyn ExtensionRepository> = match &config.catalog_file {
            Some(path) => Arc::new(InMemoryExtensionRepository::with_data_file(path).await?),
            None => Arc::new(InMemoryExtensionRepository::new()),
        };

        let storage: Arc<dyn StorageService> = match config.storage_backend {
            StorageBackend::Local => Arc::new(LocalStorageService::new(&config.upload_dir)),
            StorageBackend::S3 => {
                let bucket = config.upload_bucket.clone().ok_or_else(|| {
                    FilegateError::Config(
                        "UPLOAD_BUCKET is required when STORAGE_BACKEND=s3".to_string(),
                    )
                })?;
                Arc::new(S3StorageService::from_env(bucket, &config.upload_prefix).await)
            }
        };
        storage.ensure_ready().await?;

        let extensions = Arc::new(ExtensionService::new(repository));
        extensions.initialize().await?;

        info!(
            storage_backend = ?config.storage_backend,
            persistent_catalog = config.catalog_file.is_some(),
            "API context ready"
        );

        Ok(Self::from_parts(config, extensions, storage))
    }

    /// Assembles a context from already prepared services
    pub fn from_parts(
        config: AppConfig,
        extensions: Arc<ExtensionService>,
        storage: Arc<dyn StorageService>,
    ) -> Arc<Self> {
        let uploads = Arc::new(UploadService::new(
            Arc::clone(&extensions),
            Arc::clone(&storage),
            config.max_upload_size,
        ));

        Arc::new(Self {
            config,
            extensions,
            uploads,
            storage,
        })
    }
}
