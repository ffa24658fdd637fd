//! A price sheet read from disk.

use std::path::{Path, PathBuf};

use portal_catalog::{CatalogSource, TransportError};

/// Reads the delimited text from a local file, for offline browsing.
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for LocalFileSource {
    async fn fetch_catalog(&self) -> Result<String, TransportError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| TransportError::Io(format!("{}: {e}", self.path.display())))
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        std::fs::write(&path, "Category,Brand\nPhone,Acme\n").unwrap();

        let source = LocalFileSource::new(&path);
        let text = source.fetch_catalog().await.unwrap();
        assert_eq!(text, "Category,Brand\nPhone,Acme\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = LocalFileSource::new(dir.path().join("absent.csv"));
        let err = source.fetch_catalog().await.unwrap_err();
        assert!(matches!(err, TransportError::Io(_)));
    }
}
