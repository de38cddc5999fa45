use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::de;

/// Message-id → message, user-id → user, and so on.
pub type IdMap<T> = BTreeMap<String, T>;

/// Metric name → number of recorded occurrences.
pub type ScienceCounts = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Filled from the mapping key when the snapshot omits it.
    #[serde(default, deserialize_with = "de::id_string")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// URL or opaque avatar id. Redacted from responses unless asked for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(deserialize_with = "de::id_string")]
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub spoiler: bool,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    pub url: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// A message with its uploader and attachments joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// `None` when the uploader reference does not resolve to a known user.
    pub uploader: Option<User>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Snapshot statistics. Everything besides the update time is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub last_database_update: Option<i64>,
    #[serde(flatten)]
    pub counters: BTreeMap<String, serde_json::Value>,
}
