use anyhow::Result;
use domain_dash::utils::error::ErrorCategory;
use domain_dash::{CsvLoader, DashError, HttpSource, SourceLocation};
use httpmock::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const SHEET: &str = "Domain,Niche 1,Niche 2,Traffic,DR,DA,Language,Price,Spam Score\n\
                     example.com,Tech,SaaS,10K,45,50,English,$200,1%\n";

/// 單列 CSV 經 HTTP 載入後得到一筆記錄，DR 為數值
#[tokio::test]
async fn test_load_sheet_over_http() -> Result<()> {
    let server = MockServer::start_async().await;
    let csv_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/Sheet1.csv");
            then.status(200)
                .header("Content-Type", "text/csv")
                .body(SHEET);
        })
        .await;

    let loader = CsvLoader::new(HttpSource::new(server.url("/Sheet1.csv")));
    let records = loader.load().await?;

    csv_mock.assert_async().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].domain, "example.com");
    assert_eq!(records[0].domain_rating, Some(45.0));
    assert_eq!(records[0].domain_authority, Some(50.0));
    assert_eq!(records[0].spam_score, "1%");
    Ok(())
}

#[tokio::test]
async fn test_http_404_is_network_error() -> Result<()> {
    let server = MockServer::start_async().await;
    let csv_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/Sheet1.csv");
            then.status(404);
        })
        .await;

    let loader = CsvLoader::new(HttpSource::new(server.url("/Sheet1.csv")));
    let err = loader.load().await.unwrap_err();

    csv_mock.assert_async().await;
    assert_eq!(err.category(), ErrorCategory::Network);
    assert!(matches!(err, DashError::HttpStatus { status: 404, .. }));
    Ok(())
}

#[tokio::test]
async fn test_single_fetch_without_retry() -> Result<()> {
    let server = MockServer::start_async().await;
    let csv_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/Sheet1.csv");
            then.status(500);
        })
        .await;

    let loader = CsvLoader::new(HttpSource::new(server.url("/Sheet1.csv")));
    assert!(loader.load().await.is_err());

    csv_mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_invalid_body_is_parse_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/Sheet1.csv");
            then.status(200).body(b"Domain,DR\n\xff\xfe,1\n".to_vec());
        })
        .await;

    let loader = CsvLoader::new(HttpSource::new(server.url("/Sheet1.csv")));
    let err = loader.load().await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Parse);
    Ok(())
}

#[tokio::test]
async fn test_load_from_local_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(SHEET.as_bytes())?;

    let location = SourceLocation::parse(&file.path().to_string_lossy());
    let loader = CsvLoader::new(location.into_source());
    let records = loader.load().await?;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].price, "$200");
    Ok(())
}
