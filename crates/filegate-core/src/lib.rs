/// Filegate Core - Upload validation pipeline and extension blocklist
///
/// This crate contains the extension catalog, the content signature
/// classifier and the upload validation pipeline shared by the Filegate API.
pub mod constants;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use error::{FilegateError, Rejection};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
