/// Configuration models
use crate::constants::{DEFAULT_BIND_ADDR, DEFAULT_MAX_UPLOAD_SIZE_BYTES, DEFAULT_UPLOAD_DIR};
use crate::error::FilegateError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use typed_builder::TypedBuilder;

/// Where accepted uploads are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Local,
    S3,
}

impl FromStr for StorageBackend {
    type Err = FilegateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "s3" => Ok(Self::S3),
            other => Err(FilegateError::Config(format!(
                "Unknown STORAGE_BACKEND: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Reads `LOG_FORMAT`; anything but `json` means pretty output
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT").as_deref() {
            Ok("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Service configuration, loaded from environment variables
#[derive(Debug, Clone, TypedBuilder)]
pub struct AppConfig {
    #[builder(default = DEFAULT_BIND_ADDR.to_string(), setter(into))]
    pub bind_addr: String,
    #[builder(default = PathBuf::from(DEFAULT_UPLOAD_DIR), setter(into))]
    pub upload_dir: PathBuf,
    #[builder(default)]
    pub storage_backend: StorageBackend,
    #[builder(default, setter(strip_option, into))]
    pub upload_bucket: Option<String>,
    #[builder(default, setter(into))]
    pub upload_prefix: String,
    /// JSON file the extension catalog is persisted to; in-memory only when unset
    #[builder(default, setter(strip_option, into))]
    pub catalog_file: Option<PathBuf>,
    #[builder(default = DEFAULT_MAX_UPLOAD_SIZE_BYTES)]
    pub max_upload_size: usize,
    #[builder(default)]
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, FilegateError> {
        let storage_backend = std::env::var("STORAGE_BACKEND")
            .ok()
            .map(|s| s.parse::<StorageBackend>())
            .transpose()?
            .unwrap_or_default();

        let max_upload_size = match std::env::var("MAX_UPLOAD_SIZE_BYTES") {
            Ok(value) => value.parse().map_err(|e| {
                FilegateError::Config(format!("Invalid MAX_UPLOAD_SIZE_BYTES '{}': {}", value, e))
            })?,
            Err(_) => DEFAULT_MAX_UPLOAD_SIZE_BYTES,
        };

        let config = Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            storage_backend,
            upload_bucket: std::env::var("UPLOAD_BUCKET")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            upload_prefix: std::env::var("UPLOAD_PREFIX").unwrap_or_default(),
            catalog_file: std::env::var("CATALOG_FILE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            max_upload_size,
            log_format: LogFormat::from_env(),
        };

        config.validate()?;

        tracing::info!(
            storage_backend = ?config.storage_backend,
            max_upload_size = config.max_upload_size,
            "Configuration validated successfully"
        );

        Ok(config)
    }

    /// Validates configuration is usable
    pub fn validate(&self) -> Result<(), FilegateError> {
        if self.max_upload_size == 0 {
            return Err(FilegateError::Config(
                "MAX_UPLOAD_SIZE_BYTES must be > 0".to_string(),
            ));
        }

        if self.storage_backend == StorageBackend::S3 && self.upload_bucket.is_none() {
            return Err(FilegateError::Config(
                "UPLOAD_BUCKET is required when STORAGE_BACKEND=s3".to_string(),
            ));
        }

        if self.storage_backend == StorageBackend::Local
            && self.upload_dir.as_os_str().is_empty()
        {
            return Err(FilegateError::Config("UPLOAD_DIR must not be empty".to_string()));
        }

        Ok(())
    }
}
