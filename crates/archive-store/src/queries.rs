use std::fs;
use std::time::UNIX_EPOCH;

use archive_types::models::{Attachment, IdMap, Message, Statistics, User};
use tracing::{debug, warn};

use crate::models::MessageRecord;
use crate::{
    ATTACHMENTS_DIR, MESSAGES_FILE, Result, STATISTICS_FILE, Store, USERS_FILE, is_safe_id,
    read_json, read_json_opt,
};

impl Store {
    // -- Users --

    pub fn load_users(&self) -> Result<IdMap<User>> {
        let mut users: IdMap<User> = read_json(&self.path(USERS_FILE))?;
        // The mapping key wins over whatever id the record carries
        for (id, user) in users.iter_mut() {
            user.id.clone_from(id);
        }
        Ok(users)
    }

    pub fn load_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.load_users()?.remove(id))
    }

    // -- Messages --

    /// Messages keyed by id, each with its uploader resolved to the full user.
    ///
    /// A reference to an unknown user leaves `uploader` as `None`; the message
    /// itself is still returned. Attachments are not loaded here.
    pub fn load_messages(&self) -> Result<IdMap<Message>> {
        let records: IdMap<MessageRecord> = read_json(&self.path(MESSAGES_FILE))?;
        let users = self.load_users()?;

        Ok(records
            .into_iter()
            .map(|(id, record)| {
                let message = join_uploader(id.clone(), record, &users);
                (id, message)
            })
            .collect())
    }

    pub fn load_message(&self, id: &str) -> Result<Option<Message>> {
        Ok(self.load_messages()?.remove(id))
    }

    /// All messages, oldest first. Ties on timestamp are broken by id.
    pub fn list_messages(&self) -> Result<Vec<Message>> {
        let mut messages: Vec<Message> = self.load_messages()?.into_values().collect();
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(messages)
    }

    // -- Attachments --

    /// `None` when the message has no attachments file. Whether the message
    /// exists at all is a separate question for `load_messages`.
    pub fn load_attachments(&self, message_id: &str) -> Result<Option<Vec<Attachment>>> {
        if !is_safe_id(message_id) {
            debug!("Refusing attachments lookup for unsafe id '{}'", message_id);
            return Ok(None);
        }
        let path = self
            .path(ATTACHMENTS_DIR)
            .join(format!("{}.json", message_id));
        read_json_opt(&path)
    }

    /// Fill in `message.attachments` from its attachments file.
    pub fn join_attachments(&self, mut message: Message) -> Result<Message> {
        if !is_safe_id(&message.id) {
            warn!(
                "Message '{}' has an id unusable as a file name; skipping its attachments",
                message.id
            );
            message.attachments = Vec::new();
            return Ok(message);
        }
        message.attachments = self.load_attachments(&message.id)?.unwrap_or_default();
        Ok(message)
    }

    // -- Statistics --

    pub fn load_statistics(&self) -> Result<Statistics> {
        let mut stats: Statistics = read_json(&self.path(STATISTICS_FILE))?;
        if stats.last_database_update.is_none() {
            stats.last_database_update = self.messages_modified_at();
        }
        Ok(stats)
    }

    fn messages_modified_at(&self) -> Option<i64> {
        let modified = fs::metadata(self.path(MESSAGES_FILE))
            .and_then(|m| m.modified())
            .ok()?;
        let secs = modified.duration_since(UNIX_EPOCH).ok()?.as_secs();
        i64::try_from(secs).ok()
    }
}

fn join_uploader(id: String, record: MessageRecord, users: &IdMap<User>) -> Message {
    let uploader = match &record.uploader {
        Some(reference) => {
            let uploader = users.get(reference.id()).cloned();
            if uploader.is_none() {
                warn!("Message '{}' references unknown uploader '{}'", id, reference.id());
            }
            uploader
        }
        None => {
            warn!("Message '{}' has no uploader reference", id);
            None
        }
    };

    Message {
        id,
        content: record.content,
        timestamp: record.timestamp,
        uploader,
        attachments: Vec::new(),
    }
}
