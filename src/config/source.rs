use crate::core::CsvSource;
use crate::utils::error::{DashError, Result};
use crate::utils::validation::{validate_path, validate_url};
use async_trait::async_trait;
use reqwest::Client;
use std::path::{Path, PathBuf};

pub const DEFAULT_ASSET: &str = "public/Sheet1.csv";

#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl CsvSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Making request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("Response status: {}", response.status());
        if !response.status().is_success() {
            return Err(DashError::HttpStatus {
                status: response.status().as_u16(),
                url: self.url.clone(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CsvSource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Reading file: {}", self.path.display());
        let data = tokio::fs::read(&self.path).await?;
        Ok(data)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// `http://` / `https://` 走 HTTP，其餘視為本機路徑
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Url(String),
    File(PathBuf),
}

impl SourceLocation {
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceLocation::Url(trimmed.to_string())
        } else {
            SourceLocation::File(PathBuf::from(trimmed))
        }
    }

    pub fn validate(&self, field_name: &str) -> Result<()> {
        match self {
            SourceLocation::Url(url) => validate_url(field_name, url),
            SourceLocation::File(path) => validate_path(field_name, &path.to_string_lossy()),
        }
    }

    pub fn into_source(self) -> AssetSource {
        match self {
            SourceLocation::Url(url) => AssetSource::Http(HttpSource::new(url)),
            SourceLocation::File(path) => AssetSource::File(FileSource::new(path)),
        }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        SourceLocation::File(PathBuf::from(DEFAULT_ASSET))
    }
}

#[derive(Debug, Clone)]
pub enum AssetSource {
    Http(HttpSource),
    File(FileSource),
}

#[async_trait]
impl CsvSource for AssetSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            AssetSource::Http(source) => source.fetch().await,
            AssetSource::File(source) => source.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            AssetSource::Http(source) => source.describe(),
            AssetSource::File(source) => source.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            SourceLocation::parse("https://example.com/Sheet1.csv"),
            SourceLocation::Url("https://example.com/Sheet1.csv".to_string())
        );
        assert_eq!(
            SourceLocation::parse(" ./public/Sheet1.csv "),
            SourceLocation::File(PathBuf::from("./public/Sheet1.csv"))
        );
        assert_eq!(
            SourceLocation::default(),
            SourceLocation::File(PathBuf::from("public/Sheet1.csv"))
        );
    }

    #[test]
    fn test_validate_location() {
        assert!(SourceLocation::parse("http://localhost:8080/Sheet1.csv")
            .validate("source")
            .is_ok());
        assert!(SourceLocation::parse("").validate("source").is_err());
    }

    #[test]
    fn test_file_source_reads_whole_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Domain\na.com\n").unwrap();

        let source = FileSource::new(file.path());
        let body = tokio_test::block_on(source.fetch()).unwrap();

        assert_eq!(body, b"Domain\na.com\n");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let source = HttpSource::new("http://127.0.0.1:1/Sheet1.csv");

        let err = source.fetch().await.unwrap_err();

        assert!(matches!(err, DashError::Transport(_)));
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_missing_file_is_network_category() {
        let source = SourceLocation::parse("/definitely/not/here/Sheet1.csv").into_source();

        let err = tokio_test::block_on(source.fetch()).unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Network);
    }
}
