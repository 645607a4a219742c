use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::domain::CatalogRecord;
use crate::error::{Result, ResolverError};

/// Where a catalog snapshot comes from. The resolver only ever sees the
/// loaded record vector; implementations own deserialization and shape
/// validation.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable origin, used in logs and the run artifact.
    fn source_name(&self) -> String;

    /// Load the full snapshot into memory.
    async fn load(&self) -> Result<Vec<CatalogRecord>>;
}

/// Loads a snapshot from a local JSON array file.
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<CatalogRecord>> {
        if !self.path.exists() {
            return Err(ResolverError::Catalog(format!(
                "catalog snapshot not found at '{}' (run fetch-catalog first?)",
                self.path.display()
            )));
        }

        debug!("Reading catalog snapshot from {}", self.path.display());
        let content = fs::read_to_string(&self.path)?;
        let records: Vec<CatalogRecord> = serde_json::from_str(&content)?;
        info!(
            "Loaded {} catalog records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

/// Downloads a snapshot from a bulk-data endpoint.
pub struct HttpCatalogSource {
    url: String,
    timeout: Duration,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>, timeout_seconds: u64) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    fn client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder().timeout(self.timeout).build()?)
    }

    /// Download the snapshot and persist it so later runs can use a
    /// `FileCatalogSource`. Validates the payload parses before writing.
    pub async fn fetch_to_file(&self, dest: impl AsRef<Path>) -> Result<usize> {
        let dest = dest.as_ref();
        info!("Downloading catalog snapshot from {}", self.url);

        let body = self
            .client()?
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let records: Vec<CatalogRecord> = serde_json::from_str(&body)?;

        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(dest, body)?;
        info!(
            "Saved {} catalog records to {}",
            records.len(),
            dest.display()
        );
        Ok(records.len())
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    fn source_name(&self) -> String {
        self.url.clone()
    }

    async fn load(&self) -> Result<Vec<CatalogRecord>> {
        info!("Downloading catalog snapshot from {}", self.url);
        let records: Vec<CatalogRecord> = self
            .client()?
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!("Loaded {} catalog records from {}", records.len(), self.url);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_file_source_loads_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "f0a95034-1c4d-4365-9f6c-6e90b87b8ba4",
                 "name": "Lightning Bolt", "set": "m20",
                 "released_at": "2019-07-12"}}]"#
        )
        .unwrap();

        let source = FileCatalogSource::new(file.path());
        let records = source.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Lightning Bolt");
    }

    #[tokio::test]
    async fn test_file_source_missing_file_is_a_catalog_error() {
        let source = FileCatalogSource::new("no/such/snapshot.json");
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, ResolverError::Catalog(_)));
    }

    #[tokio::test]
    async fn test_file_source_rejects_malformed_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"not\": \"an array\"}}").unwrap();

        let source = FileCatalogSource::new(file.path());
        assert!(source.load().await.is_err());
    }
}
