/// Error types for Filegate
use thiserror::Error;

/// Reasons an upload is refused by the validation pipeline
///
/// Every variant is a recoverable, user-facing outcome; none of them
/// indicates a fault in the service itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("A file with a non-empty name is required")]
    EmptyOrMissingFile,

    #[error("Invalid file extension: '{extension}'")]
    InvalidExtensionName { extension: String },

    #[error("File extension is blocked: .{extension}")]
    BlockedExtension { extension: String },

    #[error("Filename contains a blocked extension (e.g. test.exe.txt): {filename}")]
    ObfuscatedExtensionInFilename { filename: String },

    #[error("Extension bypass detected: declared .{declared} but content is {signature}")]
    ContentSignatureMismatch {
        declared: String,
        detected: String,
        signature: String,
    },
}

impl Rejection {
    /// Stable machine-readable code for API clients
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyOrMissingFile => "EMPTY_OR_MISSING_FILE",
            Self::InvalidExtensionName { .. } => "INVALID_EXTENSION_NAME",
            Self::BlockedExtension { .. } => "BLOCKED_EXTENSION",
            Self::ObfuscatedExtensionInFilename { .. } => "OBFUSCATED_EXTENSION_IN_FILENAME",
            Self::ContentSignatureMismatch { .. } => "CONTENT_SIGNATURE_MISMATCH",
        }
    }
}

#[derive(Error, Debug)]
pub enum FilegateError {
    #[error("Upload rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Filename namespace exhausted: {0}")]
    NamespaceExhausted(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FilegateError {
    /// Whether the error is a policy rejection rather than an internal failure
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Determines if an error is retriable
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Storage(_) => true,
            Self::Catalog(_) => true,
            Self::Rejected(_) => false,
            Self::Validation(_) => false,
            Self::Conflict(_) => false,
            Self::LimitExceeded(_) => false,
            Self::NotFound(_) => false,
            Self::NamespaceExhausted(_) => false, // Retrying would probe the same names
            Self::Config(_) => false,
        }
    }
}

// Implement conversions for common error types
impl From<std::io::Error> for FilegateError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for FilegateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Catalog(err.to_string())
    }
}
