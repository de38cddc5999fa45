use axum::{Json, extract::State, response::IntoResponse};

use archive_types::api::{Envelope, MetricPayload, RecordMetricRequest, SciencePayload};

use crate::error::ApiError;
use crate::state::{AppState, with_store};

pub const VISITED_METRIC: &str = "visited";
const MAX_METRIC_LEN: usize = 64;

/// GET /science — counts a visit and returns every counter.
pub async fn visit(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let science = with_store(&state, |store| {
        store.record_metric(VISITED_METRIC)?;
        store.load_science()
    })
    .await?;

    Ok(Json(Envelope::ok(SciencePayload { science })))
}

/// POST /science — `{"metric": "..."}` increments that counter.
pub async fn record(
    State(state): State<AppState>,
    Json(req): Json<RecordMetricRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let metric = req.metric.trim().to_string();
    if metric.is_empty() || metric.chars().count() > MAX_METRIC_LEN {
        return Err(ApiError::Validation(format!(
            "metric must be between 1 and {} characters",
            MAX_METRIC_LEN
        )));
    }

    let name = metric.clone();
    let count = with_store(&state, move |store| store.record_metric(&name)).await?;

    Ok(Json(Envelope::ok(MetricPayload { metric, count })))
}
