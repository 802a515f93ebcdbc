pub mod config;
pub mod extension;
pub mod signature;
pub mod upload;

pub use config::*;
pub use extension::*;
pub use signature::*;
pub use upload::*;
