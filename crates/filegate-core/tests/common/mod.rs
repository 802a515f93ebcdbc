//! Common test utilities for the upload pipeline integration tests
#![allow(dead_code)]

pub mod samples;

use filegate_core::services::{
    ExtensionService, InMemoryExtensionRepository, LocalStorageService, StorageService,
    UploadService,
};
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_MAX_UPLOAD_SIZE: usize = 64 * 1024;

/// Fully wired services over a temporary upload directory
pub struct TestHarness {
    pub extensions: Arc<ExtensionService>,
    pub uploads: UploadService,
    pub storage: Arc<LocalStorageService>,
    // Keeps the directory alive for the lifetime of the harness
    pub dir: TempDir,
}

impl TestHarness {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = Arc::new(LocalStorageService::new(dir.path().join("uploads")));
        storage.ensure_ready().await.expect("Failed to prepare storage");

        let extensions = Arc::new(ExtensionService::new(Arc::new(
            InMemoryExtensionRepository::new(),
        )));
        extensions.initialize().await.expect("Failed to seed catalog");

        let uploads = UploadService::new(
            extensions.clone(),
            storage.clone() as Arc<dyn StorageService>,
            TEST_MAX_UPLOAD_SIZE,
        );

        Self {
            extensions,
            uploads,
            storage,
            dir,
        }
    }

    /// Blocks the given fixed extensions
    pub async fn block_fixed(&self, names: &[&str]) {
        for entry in self.extensions.list_fixed().await.unwrap() {
            if names.contains(&entry.extension_name.as_str()) {
                self.extensions
                    .update_fixed_status(entry.id, true)
                    .await
                    .unwrap();
            }
        }
    }

    pub fn stored_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.storage.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
