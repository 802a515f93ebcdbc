/// Upload and stored-file models
use super::SignatureVerdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a file passing every validation gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpload {
    pub filename: String,
    pub declared_extension: String,
    /// `None` when fewer than two bytes were available to classify
    pub verdict: Option<SignatureVerdict>,
    pub effective_extension: String,
}

/// Receipt returned to the client once an upload has been stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(rename = "originalFilename")]
    pub original_filename: String,
    #[serde(rename = "storedFilename")]
    pub stored_filename: String,
    pub size: usize,
    #[serde(rename = "checksumMd5")]
    pub checksum_md5: String,
    #[serde(rename = "declaredExtension")]
    pub declared_extension: String,
    #[serde(rename = "detectedType", skip_serializing_if = "Option::is_none")]
    pub detected_type: Option<SignatureVerdict>,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
}

/// A file already present in storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub name: String,
    pub size: u64,
    #[serde(rename = "lastModified")]
    pub last_modified: DateTime<Utc>,
}
