//! Forecast and place-list requests
//!
//! Every request runs Transfer → Parse → Extract and then, when asked, deletes
//! the local copy. Stage failures are logged and recorded in the result's
//! status; callers always receive a result record.

use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::cleanup::remove_local_copy;
use crate::document::{ProductDocument, load_document};
use crate::extract::{extract_forecast, extract_places};
use crate::models::{ForecastResult, PlaceListResult, RequestStatus};
use crate::transfer::{DocumentFetcher, FtpFetcher, local_path};
use crate::Result;

/// Per-request options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Delete the downloaded document once the request finishes
    pub delete_after: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { delete_after: true }
    }
}

impl FetchOptions {
    #[must_use]
    pub fn keep_file() -> Self {
        Self {
            delete_after: false,
        }
    }
}

pub struct ForecastService<F: DocumentFetcher = FtpFetcher> {
    fetcher: F,
    download_dir: PathBuf,
}

impl<F: DocumentFetcher> ForecastService<F> {
    pub fn new(fetcher: F, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            download_dir: download_dir.into(),
        }
    }

    #[must_use]
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Transfer a document without extracting anything; returns the local path
    pub async fn download_file(&self, document_name: &str) -> Result<PathBuf> {
        let destination = local_path(&self.download_dir, document_name)?;
        self.fetcher.fetch(document_name, &destination).await?;
        Ok(destination)
    }

    /// Forecast periods for `place_name` from `document_name`
    #[tracing::instrument(skip(self))]
    pub async fn get_forecast(
        &self,
        document_name: &str,
        place_name: &str,
        options: FetchOptions,
    ) -> ForecastResult {
        let mut result = ForecastResult::new(document_name, place_name);

        match self.fetch_document(document_name).await {
            Ok(document) => {
                result.forecast = extract_forecast(&document, place_name);
                info!(
                    "Found {} forecast period(s) for '{}' in {}",
                    result.forecast.len(),
                    place_name,
                    document_name
                );
            }
            Err(e) => {
                error!("Forecast request for {} failed: {}", document_name, e);
                result.status = RequestStatus::from(&e);
            }
        }

        self.finish(document_name, options).await;
        result
    }

    /// Every place listed in `document_name`
    #[tracing::instrument(skip(self))]
    pub async fn get_place_list(&self, document_name: &str, options: FetchOptions) -> PlaceListResult {
        let mut result = PlaceListResult::new(document_name);

        match self.fetch_document(document_name).await {
            Ok(document) => {
                result.places = extract_places(&document);
                info!("Found {} place(s) in {}", result.places.len(), document_name);
            }
            Err(e) => {
                error!("Place list request for {} failed: {}", document_name, e);
                result.status = RequestStatus::from(&e);
            }
        }

        self.finish(document_name, options).await;
        result
    }

    /// [`Self::get_forecast`] with the document deleted afterwards
    pub async fn forecast(&self, document_name: &str, place_name: &str) -> ForecastResult {
        self.get_forecast(document_name, place_name, FetchOptions::default())
            .await
    }

    /// [`Self::get_place_list`] with the document deleted afterwards
    pub async fn place_list(&self, document_name: &str) -> PlaceListResult {
        self.get_place_list(document_name, FetchOptions::default())
            .await
    }

    async fn fetch_document(&self, document_name: &str) -> Result<ProductDocument> {
        let path = self.download_file(document_name).await?;
        load_document(&path).await
    }

    async fn finish(&self, document_name: &str, options: FetchOptions) {
        if !options.delete_after {
            return;
        }
        // an invalid name never produced a local file
        if let Ok(path) = local_path(&self.download_dir, document_name) {
            remove_local_copy(&path).await;
        }
    }
}

impl ForecastService<FtpFetcher> {
    /// Service backed by the FTP fetcher
    #[must_use]
    pub fn ftp(settings: crate::config::FtpConfig, download_dir: impl Into<PathBuf>) -> Self {
        Self::new(FtpFetcher::new(settings), download_dir)
    }
}
