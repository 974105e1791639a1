//! Document transfer from the forecast file server
//!
//! The server is reached over plain FTP with anonymous credentials. The
//! [`DocumentFetcher`] trait is the seam the service talks to, so other
//! sources (or test doubles) can stand in for [`FtpFetcher`].

use async_trait::async_trait;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use suppaftp::FtpStream;
use suppaftp::types::FileType;
use tokio::task;
use tracing::{debug, info, warn};

use crate::config::FtpConfig;
use crate::{ForecastError, Result};

/// Something that can place a named document at a local path
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, document_name: &str, destination: &Path) -> Result<()>;
}

/// Fetches documents from an anonymous FTP server
#[derive(Debug, Clone)]
pub struct FtpFetcher {
    settings: FtpConfig,
}

impl FtpFetcher {
    #[must_use]
    pub fn new(settings: FtpConfig) -> Self {
        Self { settings }
    }

    /// Remote path of a document on the server
    #[must_use]
    pub fn remote_path(&self, document_name: &str) -> String {
        format!("{}{}", self.settings.directory, document_name)
    }
}

impl Default for FtpFetcher {
    fn default() -> Self {
        Self::new(FtpConfig::default())
    }
}

#[async_trait]
impl DocumentFetcher for FtpFetcher {
    #[tracing::instrument(name = "ftp_fetch", level = "debug", skip(self))]
    async fn fetch(&self, document_name: &str, destination: &Path) -> Result<()> {
        validate_document_name(document_name)?;

        let settings = self.settings.clone();
        let remote_path = self.remote_path(document_name);
        let destination = destination.to_path_buf();

        info!(
            "Downloading {} from {}:{}",
            remote_path, settings.host, settings.port
        );

        let bytes = task::spawn_blocking(move || download_blocking(&settings, &remote_path, &destination))
            .await
            .map_err(|e| ForecastError::transfer(format!("Transfer task failed: {e}")))??;

        info!("Downloaded {} ({} bytes)", document_name, bytes);
        Ok(())
    }
}

/// Run one FTP session; the session is closed whether or not retrieval works
fn download_blocking(settings: &FtpConfig, remote_path: &str, destination: &Path) -> Result<usize> {
    let mut ftp_stream = FtpStream::connect((settings.host.as_str(), settings.port)).map_err(|e| {
        ForecastError::transfer(format!(
            "Failed to connect to {}:{}: {e}",
            settings.host, settings.port
        ))
    })?;

    let outcome = retrieve(&mut ftp_stream, settings, remote_path);

    if let Err(e) = ftp_stream.quit() {
        warn!("Failed to close FTP session cleanly: {}", e);
    }

    let buffer = outcome?;
    let bytes = buffer.get_ref().len();
    std::fs::write(destination, buffer.into_inner())
        .map_err(|e| ForecastError::filesystem(destination, e))?;
    Ok(bytes)
}

fn retrieve(
    ftp_stream: &mut FtpStream,
    settings: &FtpConfig,
    remote_path: &str,
) -> Result<Cursor<Vec<u8>>> {
    ftp_stream
        .login(settings.user.as_str(), settings.password.as_str())
        .map_err(|e| ForecastError::transfer(format!("FTP login failed: {e}")))?;
    ftp_stream.transfer_type(FileType::Binary)?;

    debug!("Retrieving {}", remote_path);
    ftp_stream
        .retr_as_buffer(remote_path)
        .map_err(|e| ForecastError::transfer(format!("Failed to retrieve {remote_path}: {e}")))
}

/// Document names are plain file names inside the remote directory
pub fn validate_document_name(document_name: &str) -> Result<()> {
    let invalid = document_name.trim().is_empty()
        || document_name.contains(['/', '\\'])
        || document_name == "."
        || document_name.contains("..");

    if invalid {
        return Err(ForecastError::InvalidDocumentName {
            name: document_name.to_string(),
        });
    }
    Ok(())
}

/// Local path a document is downloaded to
pub fn local_path(download_dir: &Path, document_name: &str) -> Result<PathBuf> {
    validate_document_name(document_name)?;
    Ok(download_dir.join(document_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("IDN11060.xml")]
    #[case("IDV10753.xml")]
    #[case("forecast")]
    fn test_valid_document_names(#[case] name: &str) {
        assert!(validate_document_name(name).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(".")]
    #[case("../IDN11060.xml")]
    #[case("nested/IDN11060.xml")]
    #[case("/etc/passwd")]
    #[case("..\\IDN11060.xml")]
    fn test_invalid_document_names(#[case] name: &str) {
        assert!(matches!(
            validate_document_name(name),
            Err(ForecastError::InvalidDocumentName { .. })
        ));
    }

    #[test]
    fn test_remote_path_uses_directory() {
        let fetcher = FtpFetcher::default();
        assert_eq!(
            fetcher.remote_path("IDN11060.xml"),
            "/anon/gen/fwo/IDN11060.xml"
        );
    }

    #[test]
    fn test_local_path_joins_download_dir() {
        let path = local_path(Path::new("downloads"), "IDN11060.xml").unwrap();
        assert_eq!(path, Path::new("downloads").join("IDN11060.xml"));
        assert!(local_path(Path::new("downloads"), "../x.xml").is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transfer_error() {
        let fetcher = FtpFetcher::new(FtpConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            ..FtpConfig::default()
        });
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("IDN11060.xml");

        let result = fetcher.fetch("IDN11060.xml", &destination).await;
        assert!(matches!(result, Err(ForecastError::Transfer { .. })));
        assert!(!destination.exists());
    }
}
