/// Administrative operations on the extension catalogs
use crate::constants::MAX_CUSTOM_EXTENSIONS;
use crate::error::FilegateError;
use crate::models::{CustomExtension, FixedExtension, NewFixedExtension};
use crate::services::catalog::ExtensionRepository;
use crate::services::policy::{BlocklistPolicy, BlocklistSnapshot};
use crate::utils::extension::{is_valid_extension_name, normalize_extension};
use std::sync::Arc;
use tracing::{info, warn};

pub struct ExtensionService {
    repository: Arc<dyn ExtensionRepository>,
    max_custom: usize,
}

impl ExtensionService {
    pub fn new(repository: Arc<dyn ExtensionRepository>) -> Self {
        Self {
            repository,
            max_custom: MAX_CUSTOM_EXTENSIONS,
        }
    }

    /// Seeds the default fixed catalog on first start
    pub async fn initialize(&self) -> Result<(), FilegateError> {
        let inserted = self
            .repository
            .seed_fixed(NewFixedExtension::defaults())
            .await?;
        if inserted > 0 {
            info!(count = inserted, "Initialized fixed extensions");
        }
        Ok(())
    }

    pub async fn list_fixed(&self) -> Result<Vec<FixedExtension>, FilegateError> {
        self.repository.list_fixed().await
    }

    pub async fn update_fixed_status(
        &self,
        id: i64,
        is_blocked: bool,
    ) -> Result<FixedExtension, FilegateError> {
        let updated = self
            .repository
            .set_fixed_blocked(id, is_blocked)
            .await?
            .ok_or_else(|| FilegateError::NotFound(format!("Fixed extension {}", id)))?;

        info!(
            extension = %updated.extension_name,
            is_blocked = is_blocked,
            "Updated fixed extension status"
        );
        Ok(updated)
    }

    pub async fn list_custom(&self) -> Result<Vec<CustomExtension>, FilegateError> {
        self.repository.list_custom().await
    }

    /// Registers a custom extension
    ///
    /// The name is normalized first. Names equal to a fixed entry are refused
    /// so each extension has exactly one owner.
    pub async fn add_custom(&self, raw: &str) -> Result<CustomExtension, FilegateError> {
        let extension = normalize_extension(raw);

        if !is_valid_extension_name(&extension) {
            return Err(FilegateError::Validation(format!(
                "Invalid extension name: '{}' (letters and digits only, at most 20)",
                raw.trim()
            )));
        }

        let snapshot = self.repository.snapshot().await?;
        if snapshot.exists_as_custom(&extension) {
            return Err(FilegateError::Conflict(format!(
                "Extension already registered: {}",
                extension
            )));
        }
        if snapshot.exists_as_fixed(&extension) {
            return Err(FilegateError::Conflict(format!(
                "Extension is managed by the fixed catalog: {}",
                extension
            )));
        }

        match self.repository.insert_custom(&extension, self.max_custom).await {
            Ok(entry) => {
                info!(extension = %entry.extension_name, id = entry.id, "Added custom extension");
                Ok(entry)
            }
            Err(e) => {
                warn!(extension = %extension, error = %e, "Failed to add custom extension");
                Err(e)
            }
        }
    }

    pub async fn delete_custom(&self, id: i64) -> Result<(), FilegateError> {
        let removed = self
            .repository
            .delete_custom(id)
            .await?
            .ok_or_else(|| FilegateError::NotFound(format!("Custom extension {}", id)))?;

        info!(extension = %removed.extension_name, id = id, "Deleted custom extension");
        Ok(())
    }

    pub async fn custom_count(&self) -> Result<usize, FilegateError> {
        self.repository.count_custom().await
    }

    pub fn max_custom(&self) -> usize {
        self.max_custom
    }

    pub async fn is_extension_blocked(&self, extension: &str) -> Result<bool, FilegateError> {
        Ok(self.snapshot().await?.is_extension_blocked(extension))
    }

    pub async fn snapshot(&self) -> Result<BlocklistSnapshot, FilegateError> {
        self.repository.snapshot().await
    }
}
