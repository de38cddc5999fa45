use axum::{Json, extract::State, response::IntoResponse};

use archive_types::api::{Envelope, StatisticsPayload};

use crate::error::ApiError;
use crate::state::{AppState, with_store};

pub async fn get_statistics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let statistics = with_store(&state, |store| store.load_statistics()).await?;
    Ok(Json(Envelope::ok(StatisticsPayload { statistics })))
}
