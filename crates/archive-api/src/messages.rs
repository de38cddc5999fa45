use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use rand::seq::IndexedRandom;

use archive_store::{page, page_count};
use archive_types::api::{
    AttachmentsPayload, Envelope, MessagePayload, MessagesPage, MessagesQuery, PageCount,
    PagesQuery,
};

use crate::error::ApiError;
use crate::state::{AppState, with_store};

const MESSAGE_NOT_FOUND: &str = "The message with the given ID could not be found.";

/// `items` must fall within `1..=max_items_per_page`.
fn resolve_items(state: &AppState, items: Option<u32>) -> Result<usize, ApiError> {
    let max = state.max_items_per_page;
    let items = items.unwrap_or_else(|| state.default_items_per_page());
    if items == 0 || items > max {
        return Err(ApiError::Validation(format!(
            "items must be between 1 and {}",
            max
        )));
    }
    Ok(items as usize)
}

/// GET /messages?items=&page= — one page of messages, oldest first, with attachments.
pub async fn get_messages(
    State(state): State<AppState>,
    Query(query): Query<MessagesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let items = resolve_items(&state, query.items)?;
    let page_number = query.page.unwrap_or(1);
    if page_number == 0 {
        return Err(ApiError::Validation("page must be at least 1".into()));
    }

    let (messages, pages) = with_store(&state, move |store| {
        let all = store.list_messages()?;
        let pages = page_count(all.len(), items);

        // Attachments are only read for the page being returned
        let messages = page(all, items, page_number as usize)
            .into_iter()
            .map(|message| store.join_attachments(message))
            .collect::<archive_store::Result<Vec<_>>>()?;

        Ok((messages, pages))
    })
    .await?;

    Ok(Json(Envelope::ok(MessagesPage {
        messages,
        pages,
        page: page_number,
    })))
}

/// GET /messages/pages?items= — page count only.
pub async fn get_page_count(
    State(state): State<AppState>,
    Query(query): Query<PagesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let items = resolve_items(&state, query.items)?;
    let total = with_store(&state, |store| Ok(store.load_messages()?.len())).await?;

    Ok(Json(Envelope::ok(PageCount {
        pages: page_count(total, items),
    })))
}

pub async fn get_random_message(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let message = with_store(&state, |store| {
        let messages = store.list_messages()?;
        match messages.choose(&mut rand::rng()).cloned() {
            Some(message) => store.join_attachments(message).map(Some),
            None => Ok(None),
        }
    })
    .await?
    .ok_or_else(|| ApiError::not_found("message", "There are no messages to choose from."))?;

    Ok(Json(Envelope::ok(MessagePayload { message })))
}

pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let message = with_store(&state, move |store| match store.load_message(&message_id)? {
        Some(message) => store.join_attachments(message).map(Some),
        None => Ok(None),
    })
    .await?
    .ok_or_else(|| ApiError::not_found("message", MESSAGE_NOT_FOUND))?;

    Ok(Json(Envelope::ok(MessagePayload { message })))
}

/// GET /messages/{id}/attachments — `[]` when the message exists without
/// attachments, 404 when the message itself does not exist.
pub async fn get_message_attachments(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let attachments = with_store(&state, move |store| {
        match store.load_message(&message_id)? {
            Some(message) => Ok(Some(store.join_attachments(message)?.attachments)),
            None => Ok(None),
        }
    })
    .await?
    .ok_or_else(|| ApiError::not_found("attachments", MESSAGE_NOT_FOUND))?;

    Ok(Json(Envelope::ok(AttachmentsPayload { attachments })))
}
