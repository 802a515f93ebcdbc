/// Storage backends for accepted uploads
use crate::error::FilegateError;
use crate::models::StoredFile;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Prepares the backend (creates the directory, checks the bucket)
    async fn ensure_ready(&self) -> Result<(), FilegateError>;

    /// Stored files, newest first
    async fn list(&self) -> Result<Vec<StoredFile>, FilegateError>;

    async fn exists(&self, name: &str) -> Result<bool, FilegateError>;

    /// Stores `data` under `name`, failing if the name is already taken
    async fn write(&self, name: &str, data: &[u8]) -> Result<(), FilegateError>;

    /// Removes `name`; `NotFound` if it does not exist
    async fn delete(&self, name: &str) -> Result<(), FilegateError>;
}

fn sort_newest_first(files: &mut [StoredFile]) {
    files.sort_by(|a, b| {
        b.last_modified
            .cmp(&a.last_modified)
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Flat directory on the local filesystem
pub struct LocalStorageService {
    root: PathBuf,
}

impl LocalStorageService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn ensure_ready(&self) -> Result<(), FilegateError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            FilegateError::Storage(format!(
                "Failed to create upload directory {}: {}",
                self.root.display(),
                e
            ))
        })?;
        debug!(root = %self.root.display(), "Upload directory ready");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredFile>, FilegateError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(FilegateError::Storage(format!(
                    "Failed to list upload directory: {}",
                    e
                )));
            }
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }

            let last_modified: DateTime<Utc> = metadata.modified()?.into();
            files.push(StoredFile {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: metadata.len(),
                last_modified,
            });
        }

        sort_newest_first(&mut files);
        Ok(files)
    }

    async fn exists(&self, name: &str) -> Result<bool, FilegateError> {
        Ok(tokio::fs::try_exists(self.path_for(name)).await?)
    }

    async fn write(&self, name: &str, data: &[u8]) -> Result<(), FilegateError> {
        let path = self.path_for(name);

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    FilegateError::Storage(format!("File appeared concurrently: {}", name))
                }
                _ => FilegateError::Storage(format!("Failed to create {}: {}", name, e)),
            })?;

        file.write_all(data).await?;
        file.flush().await?;

        info!(path = %path.display(), bytes = data.len(), "Stored file");
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), FilegateError> {
        match tokio::fs::remove_file(self.path_for(name)).await {
            Ok(()) => {
                info!(name = name, "Deleted stored file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(FilegateError::NotFound(format!("File {}", name)))
            }
            Err(e) => Err(FilegateError::Storage(format!(
                "Failed to delete {}: {}",
                name, e
            ))),
        }
    }
}

/// S3 bucket, optionally under a key prefix
pub struct S3StorageService {
    client: aws_sdk_s3::Client,
    bucket: String,
    prefix: String,
}

impl S3StorageService {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, prefix: &str) -> Self {
        let prefix = match prefix.trim_matches('/') {
            "" => String::new(),
            p => format!("{}/", p),
        };
        Self {
            client,
            bucket,
            prefix,
        }
    }

    /// Builds the client from the environment's AWS configuration
    pub async fn from_env(bucket: String, prefix: &str) -> Self {
        let aws_config = aws_config::load_from_env().await;
        Self::new(aws_sdk_s3::Client::new(&aws_config), bucket, prefix)
    }

    fn key_for(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn ensure_ready(&self) -> Result<(), FilegateError> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| {
                FilegateError::Storage(format!("S3 bucket {} not reachable: {}", self.bucket, e))
            })?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredFile>, FilegateError> {
        let mut files = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let response = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(&self.prefix)
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|e| FilegateError::Storage(format!("S3 list failed: {}", e)))?;

            for object in response.contents() {
                let Some(name) = object
                    .key()
                    .and_then(|key| key.strip_prefix(self.prefix.as_str()))
                else {
                    continue;
                };
                // Only direct children of the prefix are uploads
                if name.is_empty() || name.contains('/') {
                    continue;
                }

                let last_modified = object
                    .last_modified()
                    .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos()))
                    .unwrap_or_default();

                files.push(StoredFile {
                    name: name.to_string(),
                    size: object.size().unwrap_or_default().max(0) as u64,
                    last_modified,
                });
            }

            match response.next_continuation_token() {
                Some(token) if response.is_truncated().unwrap_or(false) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        sort_newest_first(&mut files);
        Ok(files)
    }

    async fn exists(&self, name: &str) -> Result<bool, FilegateError> {
        use aws_sdk_s3::operation::head_object::HeadObjectError;

        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(self.key_for(name))
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(HeadObjectError::is_not_found) => Ok(false),
            Err(e) => Err(FilegateError::Storage(format!("S3 head failed: {}", e))),
        }
    }

    async fn write(&self, name: &str, data: &[u8]) -> Result<(), FilegateError> {
        use aws_sdk_s3::primitives::ByteStream;

        let key = self.key_for(name);
        // Conditional write: refuse to replace an object that appeared concurrently
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .if_none_match("*")
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|e| FilegateError::Storage(format!("S3 upload failed: {}", e)))?;

        info!("Uploaded to s3://{}/{}", self.bucket, key);
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), FilegateError> {
        if !self.exists(name).await? {
            return Err(FilegateError::NotFound(format!("File {}", name)));
        }

        let key = self.key_for(name);
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| FilegateError::Storage(format!("S3 delete failed: {}", e)))?;

        info!("Deleted s3://{}/{}", self.bucket, key);
        Ok(())
    }
}
