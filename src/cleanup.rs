use std::path::Path;
use tracing::{debug, warn};

use crate::ForecastError;

/// Delete a downloaded document. Failures are logged and never returned.
pub async fn remove_local_copy(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("Removed local copy {:?}", path),
        Err(e) => {
            let err = ForecastError::filesystem(path, e);
            warn!("Failed to remove downloaded document: {}", err);
        }
    }
}
