/// Upload validation pipeline and the upload entry point
use crate::constants::MAX_FILENAME_LENGTH;
use crate::error::{FilegateError, Rejection};
use crate::models::{StoredFile, UploadReceipt, ValidatedUpload};
use crate::services::extensions::ExtensionService;
use crate::services::policy::BlocklistPolicy;
use crate::services::storage::StorageService;
use crate::utils::extension::last_extension;
use crate::utils::file_validation::{
    classify_signature, has_dangerous_extension_in_filename, read_signature_prefix,
    resolve_effective_extension,
};
use crate::utils::filename::generate_unique_filename;
use crate::utils::logging::filename_for_log;
use crate::utils::sanitization::{is_safe_stored_filename, sanitize_upload_filename};
use chrono::Utc;
use md5::{Digest as _, Md5};
use std::collections::HashSet;
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Runs the validation gates in order, stopping at the first failure
///
/// 1. the declared extension must be a valid extension name
/// 2. the declared extension must not be blocked
/// 3. no blocked extension may hide before the final one
/// 4. the content signature must not reveal a blocked type
///
/// Only gate 4 touches `content`, with a single bounded read. Nothing is
/// written anywhere; admission is up to the caller.
pub fn validate_upload<R, P>(
    filename: &str,
    content: R,
    policy: &P,
) -> Result<ValidatedUpload, FilegateError>
where
    R: Read,
    P: BlocklistPolicy + ?Sized,
{
    let declared = last_extension(filename);

    if !policy.is_valid_extension_name(&declared) {
        return Err(Rejection::InvalidExtensionName {
            extension: declared,
        }
        .into());
    }

    if policy.is_extension_blocked(&declared) {
        return Err(Rejection::BlockedExtension {
            extension: declared,
        }
        .into());
    }

    if has_dangerous_extension_in_filename(filename, policy) {
        return Err(Rejection::ObfuscatedExtensionInFilename {
            filename: filename.to_string(),
        }
        .into());
    }

    let prefix = read_signature_prefix(content).map_err(|e| {
        FilegateError::Storage(format!("Failed to read upload content: {}", e))
    })?;
    let verdict = classify_signature(&prefix);
    let effective = resolve_effective_extension(&declared, verdict).to_string();

    if policy.is_extension_blocked(&effective) {
        let signature = verdict.map(|v| v.description()).unwrap_or("unknown");
        return Err(Rejection::ContentSignatureMismatch {
            declared,
            detected: effective,
            signature: signature.to_string(),
        }
        .into());
    }

    Ok(ValidatedUpload {
        filename: filename.to_string(),
        declared_extension: declared,
        verdict,
        effective_extension: effective,
    })
}

/// Validates, names and stores uploads
pub struct UploadService {
    extensions: Arc<ExtensionService>,
    storage: Arc<dyn StorageService>,
    max_upload_size: usize,
}

impl UploadService {
    pub fn new(
        extensions: Arc<ExtensionService>,
        storage: Arc<dyn StorageService>,
        max_upload_size: usize,
    ) -> Self {
        Self {
            extensions,
            storage,
            max_upload_size,
        }
    }

    pub fn max_upload_size(&self) -> usize {
        self.max_upload_size
    }

    /// Validates `data` against the current blocklist and stores it
    ///
    /// `filename` is the name the client sent, if any. The stored name may
    /// differ when a file of the same name already exists.
    pub async fn upload(
        &self,
        filename: Option<&str>,
        data: &[u8],
    ) -> Result<UploadReceipt, FilegateError> {
        let original = filename.map(sanitize_upload_filename).unwrap_or_default();
        if original.is_empty() {
            warn!(
                filename = %filename_for_log(filename.unwrap_or_default()),
                "Upload without a usable filename"
            );
            return Err(Rejection::EmptyOrMissingFile.into());
        }

        if data.len() > self.max_upload_size {
            return Err(FilegateError::LimitExceeded(format!(
                "Upload is {} bytes, the limit is {} bytes",
                data.len(),
                self.max_upload_size
            )));
        }

        let snapshot = self.extensions.snapshot().await?;
        let validated = match validate_upload(&original, data, &snapshot) {
            Ok(validated) => validated,
            Err(FilegateError::Rejected(rejection)) => {
                warn!(
                    filename = %filename_for_log(&original),
                    code = rejection.code(),
                    reason = %rejection,
                    "Upload rejected"
                );
                return Err(rejection.into());
            }
            Err(e) => return Err(e),
        };

        debug!(
            filename = %filename_for_log(&validated.filename),
            declared = %validated.declared_extension,
            effective = %validated.effective_extension,
            verdict = ?validated.verdict,
            "Upload passed validation"
        );

        let existing: HashSet<String> = self
            .storage
            .list()
            .await?
            .into_iter()
            .map(|f| f.name)
            .collect();

        let stored_filename =
            generate_unique_filename(&original, |name| existing.contains(name)).inspect_err(
                |e| {
                    error!(
                        filename = %filename_for_log(&original),
                        error = %e,
                        "Could not allocate a storage name"
                    )
                },
            )?;

        if stored_filename.len() > MAX_FILENAME_LENGTH {
            warn!(
                filename = %filename_for_log(&stored_filename),
                length = stored_filename.len(),
                "Upload name too long"
            );
            return Err(FilegateError::Validation(format!(
                "File name exceeds {} bytes",
                MAX_FILENAME_LENGTH
            )));
        }

        self.storage.write(&stored_filename, data).await?;

        let mut hasher = Md5::new();
        hasher.update(data);
        let checksum_md5 = format!("{:x}", hasher.finalize());
        info!(
            filename = %filename_for_log(&original),
            stored = %filename_for_log(&stored_filename),
            size = data.len(),
            checksum = %checksum_md5,
            "Upload stored"
        );

        Ok(UploadReceipt {
            original_filename: original,
            stored_filename,
            size: data.len(),
            checksum_md5,
            declared_extension: validated.declared_extension,
            detected_type: validated.verdict,
            uploaded_at: Utc::now(),
        })
    }

    pub async fn list_files(&self) -> Result<Vec<StoredFile>, FilegateError> {
        self.storage.list().await
    }

    pub async fn delete_file(&self, name: &str) -> Result<(), FilegateError> {
        if !is_safe_stored_filename(name) {
            warn!(filename = %filename_for_log(name), "Refusing to delete unsafe name");
            return Err(FilegateError::Validation(format!(
                "Invalid file name: {}",
                filename_for_log(name)
            )));
        }

        self.storage.delete(name).await
    }
}
