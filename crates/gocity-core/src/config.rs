//! Configuration module
//!
//! Process-wide settings read once at start-up: HTTP server, CORS and the
//! storage backend selection.

use std::env;

use crate::constants::{DEFAULT_BUCKET, DEFAULT_SERVER_PORT};
use crate::storage_types::StorageBackend;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    cors_origins: Vec<String>,
    environment: String,
    // Storage configuration
    storage_backend: Option<StorageBackend>,
    gcs_bucket: String,
    gcs_service_account_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_port: DEFAULT_SERVER_PORT,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            storage_backend: None,
            gcs_bucket: DEFAULT_BUCKET.to_string(),
            gcs_service_account_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = lookup("SERVER_PORT")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_SERVER_PORT);

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(value) if !value.trim().is_empty() => Some(value.parse::<StorageBackend>()?),
            _ => None,
        };

        let gcs_bucket = lookup("GCS_BUCKET")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_BUCKET.to_string());

        let gcs_service_account_path =
            lookup("GCS_SERVICE_ACCOUNT_PATH").filter(|s| !s.trim().is_empty());

        let config = Config {
            server_port,
            cors_origins,
            environment,
            storage_backend,
            gcs_bucket,
            gcs_service_account_path,
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.storage_backend = Some(backend);
        self
    }

    pub fn with_gcs_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.gcs_bucket = bucket.into();
        self
    }

    pub fn with_gcs_service_account_path(mut self, path: impl Into<String>) -> Self {
        self.gcs_service_account_path = Some(path.into());
        self
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Explicitly requested backend; `None` means durable first with fallback.
    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.storage_backend
    }

    pub fn gcs_bucket(&self) -> &str {
        &self.gcs_bucket
    }

    pub fn gcs_service_account_path(&self) -> Option<&str> {
        self.gcs_service_account_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server_port(), 4000);
        assert_eq!(config.gcs_bucket(), "gocity");
        assert_eq!(config.storage_backend(), None);
        assert_eq!(config.cors_origins(), ["*".to_string()]);
        assert!(config.gcs_service_account_path().is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_PORT", "8080"),
            ("STORAGE_BACKEND", "memory"),
            ("GCS_BUCKET", "artifacts"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
        ]))
        .unwrap();
        assert_eq!(config.server_port(), 8080);
        assert_eq!(config.storage_backend(), Some(StorageBackend::Memory));
        assert_eq!(config.gcs_bucket(), "artifacts");
        assert_eq!(config.cors_origins().len(), 2);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[("STORAGE_BACKEND", "s3")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let result = Config::from_lookup(lookup_from(&[("ENVIRONMENT", "production")]));
        assert!(result.is_err());

        let config = Config::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "prod"),
            ("CORS_ORIGINS", "https://gocity.example"),
        ]))
        .unwrap();
        assert!(config.is_production());
    }
}
