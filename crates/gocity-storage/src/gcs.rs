use crate::keys::{object_key, validate_project_name};
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::buffered::BufWriter;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{CredentialProvider, ObjectStoreExt, Result as ObjectResult};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Environment variables that point object_store at explicit credentials.
const CREDENTIAL_ENV_VARS: [&str; 4] = [
    "GOOGLE_SERVICE_ACCOUNT",
    "GOOGLE_SERVICE_ACCOUNT_PATH",
    "GOOGLE_SERVICE_ACCOUNT_KEY",
    "GOOGLE_APPLICATION_CREDENTIALS",
];

/// How long the instance metadata server gets to hand out a token when no
/// other credentials are configured.
const METADATA_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Google Cloud Storage implementation
///
/// All projects live in one bucket fixed at construction. `delete` is a no-op:
/// objects are never removed from the bucket by this backend.
#[derive(Clone)]
pub struct GcsStorage {
    store: Arc<dyn object_store::ObjectStore>,
    bucket: String,
}

impl GcsStorage {
    /// Create a new GcsStorage instance
    ///
    /// Credentials are resolved like the Google client libraries do: an
    /// explicit `service_account_path`, then the `GOOGLE_*` environment
    /// variables, then the gcloud application default credentials file, and
    /// finally the instance metadata server. Construction fails with
    /// `ConfigError` when none of them yields credentials.
    ///
    /// # Arguments
    /// * `bucket` - GCS bucket name
    /// * `service_account_path` - Optional service account JSON file
    pub async fn new(bucket: String, service_account_path: Option<String>) -> StorageResult<Self> {
        if bucket.trim().is_empty() {
            return Err(StorageError::ConfigError(
                "GCS bucket name must not be empty".to_string(),
            ));
        }

        let source = credential_source(service_account_path.as_deref(), |key| env::var(key).ok());

        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket.clone());

        if let Some(path) = service_account_path {
            builder = builder.with_service_account_path(path);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        match source {
            Some(source) => {
                tracing::debug!(bucket = %bucket, source, "Using configured GCS credentials");
            }
            None => {
                // Only the metadata server is left; it has to answer now, not on first request.
                let probe =
                    tokio::time::timeout(METADATA_PROBE_TIMEOUT, store.credentials().get_credential())
                        .await;
                match probe {
                    Ok(Ok(_)) => {
                        tracing::debug!(bucket = %bucket, "Using GCS instance metadata credentials");
                    }
                    Ok(Err(e)) => {
                        return Err(StorageError::ConfigError(format!(
                            "No GCS credentials available: {}",
                            e
                        )));
                    }
                    Err(_) => {
                        return Err(StorageError::ConfigError(
                            "No GCS credentials available: metadata server did not respond"
                                .to_string(),
                        ));
                    }
                }
            }
        }

        Ok(GcsStorage {
            store: Arc::new(store),
            bucket,
        })
    }

    /// Wrap an already built object store, e.g. `object_store::memory::InMemory`.
    pub fn with_store(store: Arc<dyn object_store::ObjectStore>, bucket: impl Into<String>) -> Self {
        GcsStorage {
            store,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// Name of the first static credential source that is configured, if any.
fn credential_source<F>(service_account_path: Option<&str>, lookup: F) -> Option<&'static str>
where
    F: Fn(&str) -> Option<String>,
{
    if service_account_path.is_some() {
        return Some("service_account_path");
    }

    let configured = |key: &str| lookup(key).is_some_and(|v| !v.trim().is_empty());
    if let Some(var) = CREDENTIAL_ENV_VARS.into_iter().find(|var| configured(*var)) {
        return Some(var);
    }

    let well_known = lookup("HOME")
        .map(|home| PathBuf::from(home).join(".config/gcloud/application_default_credentials.json"))
        .or_else(|| {
            lookup("APPDATA")
                .map(|dir| PathBuf::from(dir).join("gcloud/application_default_credentials.json"))
        });
    if well_known.is_some_and(|path| path.is_file()) {
        return Some("application_default_credentials");
    }

    None
}

/// Object location for a project. `Path::parse` keeps the key as-is, so no
/// two project names can end up at the same location.
fn object_location(project_name: &str) -> StorageResult<(String, Path)> {
    let key = object_key(project_name)?;
    let path = Path::parse(&key).map_err(|e| StorageError::InvalidKey(e.to_string()))?;
    Ok((key, path))
}

#[async_trait]
impl Storage for GcsStorage {
    async fn get(&self, project_name: &str) -> StorageResult<Option<Bytes>> {
        let (key, location) = object_location(project_name)?;
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = match result {
            Ok(result) => result,
            Err(ObjectStoreError::NotFound { .. }) => {
                tracing::info!(
                    bucket = %self.bucket,
                    key = %key,
                    "Project not found in GCS"
                );
                return Ok(None);
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "GCS download failed"
                );
                return Err(StorageError::DownloadFailed(e.to_string()));
            }
        };

        let bytes = result.bytes().await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                "GCS read failed"
            );
            StorageError::DownloadFailed(e.to_string())
        })?;

        tracing::debug!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = bytes.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS download successful"
        );

        Ok(Some(bytes))
    }

    async fn save(&self, project_name: &str, content: Bytes) -> StorageResult<()> {
        let (key, location) = object_location(project_name)?;
        let size = content.len() as u64;
        let start = std::time::Instant::now();

        // The object becomes visible only once shutdown commits the upload.
        let mut writer = BufWriter::new(Arc::clone(&self.store), location);

        let written = match writer.write_all(&content).await {
            Ok(()) => writer.shutdown().await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "GCS upload failed"
            );
            if let Err(abort_err) = writer.abort().await {
                tracing::warn!(error = %abort_err, key = %key, "Failed to abort GCS upload");
            }
            return Err(StorageError::UploadFailed(e.to_string()));
        }

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS upload successful"
        );

        Ok(())
    }

    async fn delete(&self, project_name: &str) -> StorageResult<()> {
        validate_project_name(project_name)?;
        tracing::debug!(
            bucket = %self.bucket,
            project = %project_name,
            "GCS delete is a no-op, object kept"
        );
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Gcs
    }
}
