//! On-disk record types. These mirror the JSON files and are joined into the
//! archive-types models before leaving the store.

use archive_types::de;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct MessageRecord {
    /// Attachment-only messages carry `null` content.
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "de::timestamp")]
    pub timestamp: DateTime<Utc>,
    /// `null` or absent for deleted uploaders.
    #[serde(default)]
    pub uploader: Option<UploaderRef>,
}

/// Partial user reference: `{"id": ...}` in newer snapshots, a bare id in older ones.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UploaderRef {
    Partial {
        #[serde(deserialize_with = "de::id_string")]
        id: String,
    },
    Bare(#[serde(deserialize_with = "de::id_string")] String),
}

impl UploaderRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Partial { id } => id,
            Self::Bare(id) => id,
        }
    }
}
