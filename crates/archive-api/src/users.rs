use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use archive_types::api::{AvatarPayload, Envelope, UserPayload, UserQuery, UsersPayload};
use archive_types::models::User;

use crate::error::ApiError;
use crate::state::{AppState, with_store};

const USER_NOT_FOUND: &str = "The user with the given ID could not be found.";

/// Avatars are left out unless the caller passes `avatar=true`.
fn redact(mut user: User, include_avatar: bool) -> User {
    if !include_avatar {
        user.avatar = None;
    }
    user
}

pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let users = with_store(&state, |store| store.load_users()).await?;

    let users = users
        .into_values()
        .map(|user| redact(user, query.avatar))
        .collect();

    Ok(Json(Envelope::ok(UsersPayload { users })))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user = with_store(&state, move |store| store.load_user(&user_id))
        .await?
        .ok_or_else(|| ApiError::not_found("user", USER_NOT_FOUND))?;

    Ok(Json(Envelope::ok(UserPayload {
        user: redact(user, query.avatar),
    })))
}

pub async fn get_user_avatar(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = with_store(&state, move |store| store.load_user(&user_id))
        .await?
        .ok_or_else(|| ApiError::not_found("avatar", USER_NOT_FOUND))?;

    let avatar = user
        .avatar
        .ok_or_else(|| ApiError::not_found("avatar", "The user with the given ID has no avatar."))?;

    Ok(Json(Envelope::ok(AvatarPayload { avatar })))
}
