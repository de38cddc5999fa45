pub mod error;
pub mod messages;
pub mod misc;
pub mod science;
pub mod state;
pub mod statistics;
pub mod users;

use axum::{Router, routing::get};

pub use state::{AppState, AppStateInner};

/// All JSON routes. Static directories are mounted by the server binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(misc::index))
        .route("/.env", get(misc::env_decoy))
        .route("/ping", get(misc::ping))
        .route("/messages", get(messages::get_messages))
        .route("/messages/pages", get(messages::get_page_count))
        .route("/messages/random", get(messages::get_random_message))
        .route("/messages/{message_id}", get(messages::get_message))
        .route(
            "/messages/{message_id}/attachments",
            get(messages::get_message_attachments),
        )
        .route("/users", get(users::get_users))
        .route("/users/{user_id}", get(users::get_user))
        .route("/users/{user_id}/avatar", get(users::get_user_avatar))
        .route("/statistics", get(statistics::get_statistics))
        .route("/science", get(science::visit).post(science::record))
        .with_state(state)
}
