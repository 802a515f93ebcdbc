/// Service layer: catalog, blocklist policy, storage and uploads
pub mod catalog;
pub mod extensions;
pub mod policy;
pub mod storage;
pub mod upload;

pub use catalog::{ExtensionRepository, InMemoryExtensionRepository};
pub use extensions::ExtensionService;
pub use policy::{BlocklistPolicy, BlocklistSnapshot};
pub use storage::{LocalStorageService, S3StorageService, StorageService};
pub use upload::{UploadService, validate_upload};
