/// Extension catalog repository
use crate::constants::MAX_FIXED_EXTENSION_LENGTH;
use crate::error::FilegateError;
use crate::models::{CustomExtension, FixedExtension, NewFixedExtension};
use crate::services::policy::BlocklistSnapshot;
use crate::utils::extension::normalize_extension;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

#[async_trait]
pub trait ExtensionRepository: Send + Sync {
    /// Fixed entries ordered by display name ascending
    async fn list_fixed(&self) -> Result<Vec<FixedExtension>, FilegateError>;

    /// Custom entries, newest first
    async fn list_custom(&self) -> Result<Vec<CustomExtension>, FilegateError>;

    /// Inserts the seed entries if the fixed catalog is empty
    ///
    /// Returns the number of entries inserted.
    async fn seed_fixed(&self, entries: Vec<NewFixedExtension>) -> Result<usize, FilegateError>;

    async fn set_fixed_blocked(
        &self,
        id: i64,
        is_blocked: bool,
    ) -> Result<Option<FixedExtension>, FilegateError>;

    /// Inserts a custom entry unless it already exists or the catalog is full
    ///
    /// Uniqueness and the cap are checked atomically with the insert.
    async fn insert_custom(
        &self,
        extension: &str,
        limit: usize,
    ) -> Result<CustomExtension, FilegateError>;

    /// Returns the removed entry, or `None` if the id is unknown
    async fn delete_custom(&self, id: i64) -> Result<Option<CustomExtension>, FilegateError>;

    async fn count_custom(&self) -> Result<usize, FilegateError>;

    /// Point-in-time copy of both catalogs for the validation pipeline
    async fn snapshot(&self) -> Result<BlocklistSnapshot, FilegateError>;
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct CatalogState {
    fixed: Vec<FixedExtension>,
    custom: Vec<CustomExtension>,
    next_fixed_id: i64,
    next_custom_id: i64,
}

impl CatalogState {
    fn allocate_fixed_id(&mut self) -> i64 {
        self.next_fixed_id += 1;
        self.next_fixed_id
    }

    fn allocate_custom_id(&mut self) -> i64 {
        self.next_custom_id += 1;
        self.next_custom_id
    }
}

/// In-memory catalog, optionally persisted to a JSON file
///
/// Every mutation rewrites the whole file; the catalog is small (the custom
/// list is capped) so this stays cheap.
pub struct InMemoryExtensionRepository {
    state: RwLock<CatalogState>,
    data_file: Option<PathBuf>,
}

impl InMemoryExtensionRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CatalogState::default()),
            data_file: None,
        }
    }

    /// Loads the catalog from `path` if it exists and persists every change there
    pub async fn with_data_file(path: impl Into<PathBuf>) -> Result<Self, FilegateError> {
        let path = path.into();

        let state = match tokio::fs::read(&path).await {
            Ok(data) => {
                let state: CatalogState = serde_json::from_slice(&data)?;
                info!(
                    path = %path.display(),
                    fixed = state.fixed.len(),
                    custom = state.custom.len(),
                    "Loaded extension catalog"
                );
                state
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No catalog file yet, starting empty");
                CatalogState::default()
            }
            Err(e) => {
                return Err(FilegateError::Catalog(format!(
                    "Failed to read catalog file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        Ok(Self {
            state: RwLock::new(state),
            data_file: Some(path),
        })
    }

    /// Persists `staged` and only then makes it the live state
    ///
    /// A failed write leaves the live state untouched.
    async fn commit(
        &self,
        live: &mut CatalogState,
        staged: CatalogState,
    ) -> Result<(), FilegateError> {
        self.persist(&staged).await?;
        *live = staged;
        Ok(())
    }

    async fn persist(&self, state: &CatalogState) -> Result<(), FilegateError> {
        let Some(path) = &self.data_file else {
            return Ok(());
        };

        write_atomically(path, &serde_json::to_vec_pretty(state)?).await
    }
}

impl Default for InMemoryExtensionRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes to a sibling temp file and renames it over `path`
async fn write_atomically(path: &Path, data: &[u8]) -> Result<(), FilegateError> {
    let tmp = path.with_extension("json.tmp");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| FilegateError::Catalog(format!("Failed to create catalog dir: {}", e)))?;
    }

    tokio::fs::write(&tmp, data)
        .await
        .map_err(|e| FilegateError::Catalog(format!("Failed to write catalog file: {}", e)))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| FilegateError::Catalog(format!("Failed to replace catalog file: {}", e)))?;

    Ok(())
}

#[async_trait]
impl ExtensionRepository for InMemoryExtensionRepository {
    async fn list_fixed(&self) -> Result<Vec<FixedExtension>, FilegateError> {
        let state = self.state.read().await;
        let mut fixed = state.fixed.clone();
        fixed.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(fixed)
    }

    async fn list_custom(&self) -> Result<Vec<CustomExtension>, FilegateError> {
        let state = self.state.read().await;
        let mut custom = state.custom.clone();
        // Ids break ties between entries created within the same instant
        custom.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(custom)
    }

    async fn seed_fixed(&self, entries: Vec<NewFixedExtension>) -> Result<usize, FilegateError> {
        let mut state = self.state.write().await;
        if !state.fixed.is_empty() {
            debug!(existing = state.fixed.len(), "Fixed catalog already seeded");
            return Ok(0);
        }

        let mut seeds = Vec::with_capacity(entries.len());
        for entry in entries {
            let extension_name = normalize_extension(&entry.extension_name);
            if extension_name.is_empty() || extension_name.len() > MAX_FIXED_EXTENSION_LENGTH {
                return Err(FilegateError::Validation(format!(
                    "Invalid fixed extension: '{}'",
                    entry.extension_name
                )));
            }
            seeds.push((extension_name, entry));
        }

        let mut staged = state.clone();
        let now = Utc::now();
        for (extension_name, entry) in seeds {
            if staged.fixed.iter().any(|e| e.extension_name == extension_name) {
                continue;
            }

            let id = staged.allocate_fixed_id();
            staged.fixed.push(FixedExtension {
                id,
                extension_name,
                display_name: entry.display_name,
                description: entry.description,
                is_blocked: entry.is_blocked,
                created_at: now,
                updated_at: now,
            });
        }

        let inserted = staged.fixed.len();
        self.commit(&mut state, staged).await?;
        info!(count = inserted, "Seeded fixed extension catalog");
        Ok(inserted)
    }

    async fn set_fixed_blocked(
        &self,
        id: i64,
        is_blocked: bool,
    ) -> Result<Option<FixedExtension>, FilegateError> {
        let mut state = self.state.write().await;
        let mut staged = state.clone();
        let Some(entry) = staged.fixed.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };

        entry.is_blocked = is_blocked;
        entry.updated_at = Utc::now();
        let updated = entry.clone();

        self.commit(&mut state, staged).await?;
        Ok(Some(updated))
    }

    async fn insert_custom(
        &self,
        extension: &str,
        limit: usize,
    ) -> Result<CustomExtension, FilegateError> {
        let mut state = self.state.write().await;

        if state.custom.iter().any(|e| e.extension_name == extension) {
            return Err(FilegateError::Conflict(format!(
                "Extension already registered: {}",
                extension
            )));
        }

        if state.custom.len() >= limit {
            return Err(FilegateError::LimitExceeded(format!(
                "Custom extensions are limited to {} entries",
                limit
            )));
        }

        let mut staged = state.clone();
        let entry = CustomExtension {
            id: staged.allocate_custom_id(),
            extension_name: extension.to_string(),
            created_at: Utc::now(),
        };
        staged.custom.push(entry.clone());

        self.commit(&mut state, staged).await?;
        Ok(entry)
    }

    async fn delete_custom(&self, id: i64) -> Result<Option<CustomExtension>, FilegateError> {
        let mut state = self.state.write().await;
        let Some(pos) = state.custom.iter().position(|e| e.id == id) else {
            return Ok(None);
        };

        let mut staged = state.clone();
        let removed = staged.custom.remove(pos);
        self.commit(&mut state, staged).await?;
        Ok(Some(removed))
    }

    async fn count_custom(&self) -> Result<usize, FilegateError> {
        Ok(self.state.read().await.custom.len())
    }

    async fn snapshot(&self) -> Result<BlocklistSnapshot, FilegateError> {
        let state = self.state.read().await;
        Ok(BlocklistSnapshot::new(&state.fixed, &state.custom))
    }
}
