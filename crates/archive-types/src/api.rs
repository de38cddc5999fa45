use serde::{Deserialize, Serialize};

use crate::models::{Attachment, Message, ScienceCounts, Statistics, User};

pub const OK: &str = "OK";

// -- Envelope --

/// Every JSON response is wrapped as `{ "message": ..., "payload": ... }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub message: String,
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            message: OK.to_string(),
            payload,
        }
    }
}

/// `/ping` is the one response without a payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct Pong {
    pub message: String,
}

// -- Messages --

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub items: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PagesQuery {
    pub items: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MessagesPage {
    pub messages: Vec<Message>,
    pub pages: usize,
    pub page: u32,
}

#[derive(Debug, Serialize)]
pub struct PageCount {
    pub pages: usize,
}

#[derive(Debug, Serialize)]
pub struct MessagePayload {
    pub message: Message,
}

#[derive(Debug, Serialize)]
pub struct AttachmentsPayload {
    pub attachments: Vec<Attachment>,
}

// -- Users --

#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub avatar: bool,
}

#[derive(Debug, Serialize)]
pub struct UsersPayload {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct AvatarPayload {
    pub avatar: String,
}

// -- Statistics --

#[derive(Debug, Serialize)]
pub struct StatisticsPayload {
    pub statistics: Statistics,
}

// -- Science --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordMetricRequest {
    pub metric: String,
}

#[derive(Debug, Serialize)]
pub struct MetricPayload {
    pub metric: String,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct SciencePayload {
    pub science: ScienceCounts,
}
