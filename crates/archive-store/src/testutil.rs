use std::fs;

use serde_json::json;
use tempfile::TempDir;

use crate::{ATTACHMENTS_DIR, MESSAGES_FILE, STATISTICS_FILE, Store, USERS_FILE};

/// Five messages from two users; message "3" has an uploader nobody knows
/// and message "2" has two attachments.
pub fn fixture() -> (TempDir, Store) {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();

    let users = json!({
        "100": { "username": "ada", "display_name": "Ada", "avatar": "avatars/100.png" },
        "200": { "id": 200, "username": "bob", "display_name": null }
    });
    let messages = json!({
        "1": { "content": "first", "timestamp": 1700000000, "uploader": { "id": "100" } },
        "2": { "content": "second", "timestamp": "2023-11-14T22:13:21Z", "uploader": { "id": 200 } },
        "3": { "content": "third", "timestamp": 1700000002, "uploader": { "id": "999" } },
        "4": { "content": "fourth", "timestamp": 1700000003, "uploader": "100" },
        "5": { "content": "fifth", "timestamp": 1700000004.25, "uploader": { "id": "200", "username": "bob" } }
    });
    let attachments = json!([
        { "id": "a1", "filename": "cat.png", "content_type": "image/png", "spoiler": false,
          "width": 640, "height": 480, "url": "/attachments/a1.png", "size": 1024 },
        { "id": 77, "filename": "notes.txt", "url": "/attachments/77.txt", "spoiler": true }
    ]);
    let statistics = json!({ "messages": 5, "users": 2 });

    fs::write(dir.join(USERS_FILE), users.to_string()).unwrap();
    fs::write(dir.join(MESSAGES_FILE), messages.to_string()).unwrap();
    fs::write(dir.join(STATISTICS_FILE), statistics.to_string()).unwrap();
    fs::create_dir_all(dir.join(ATTACHMENTS_DIR)).unwrap();
    fs::write(dir.join(ATTACHMENTS_DIR).join("2.json"), attachments.to_string()).unwrap();

    let store = Store::open(dir).unwrap();
    (tmp, store)
}
