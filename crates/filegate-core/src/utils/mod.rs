/// Utility modules
pub mod extension;
pub mod file_validation;
pub mod filename;
pub mod logging;
pub mod sanitization;

pub use extension::*;
pub use file_validation::*;
pub use filename::*;
pub use logging::*;
pub use sanitization::*;
