use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::Deserialize;

use crate::models::{ForecastResult, PlaceListResult, RequestStatus};
use crate::service::{FetchOptions, ForecastService};
use crate::transfer::DocumentFetcher;

#[derive(Debug, Default, Deserialize)]
pub struct KeepQuery {
    /// Leave the downloaded document on disk
    #[serde(default)]
    pub keep: bool,
}

impl From<KeepQuery> for FetchOptions {
    fn from(query: KeepQuery) -> Self {
        FetchOptions {
            delete_after: !query.keep,
        }
    }
}

pub fn router<F: DocumentFetcher + 'static>(service: Arc<ForecastService<F>>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/forecast/{document}/{place}", get(get_forecast::<F>))
        .route("/places/{document}", get(get_places::<F>))
        .with_state(service)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn get_forecast<F: DocumentFetcher + 'static>(
    State(service): State<Arc<ForecastService<F>>>,
    Path((document, place)): Path<(String, String)>,
    Query(query): Query<KeepQuery>,
) -> (StatusCode, Json<ForecastResult>) {
    let result = service
        .get_forecast(&document, &place, query.into())
        .await;
    (status_code(&result.status), Json(result))
}

async fn get_places<F: DocumentFetcher + 'static>(
    State(service): State<Arc<ForecastService<F>>>,
    Path(document): Path<String>,
    Query(query): Query<KeepQuery>,
) -> (StatusCode, Json<PlaceListResult>) {
    let result = service.get_place_list(&document, query.into()).await;
    (status_code(&result.status), Json(result))
}

fn status_code(status: &RequestStatus) -> StatusCode {
    match status {
        RequestStatus::Completed => StatusCode::OK,
        RequestStatus::TransferFailed { .. } | RequestStatus::ParseFailed { .. } => {
            StatusCode::BAD_GATEWAY
        }
    }
}
