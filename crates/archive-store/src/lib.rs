pub mod error;
pub mod models;
pub mod paginate;
pub mod queries;
pub mod science;

#[cfg(test)]
mod testutil;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use tracing::info;

pub use error::{Result, StoreError};
pub use paginate::{page, page_count, paginate};

pub const MESSAGES_FILE: &str = "messages.json";
pub const USERS_FILE: &str = "users.json";
pub const STATISTICS_FILE: &str = "statistics.json";
pub const SCIENCE_FILE: &str = "science.json";
pub const ATTACHMENTS_DIR: &str = "attachments";

/// Flat-file JSON store.
///
/// Every read goes back to disk, so edits to the snapshot files are visible
/// on the next request without a restart. The only write path is the
/// science counter, which is serialized through `science_lock`.
pub struct Store {
    dir: PathBuf,
    science_lock: Mutex<()>,
}

impl Store {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();

        let attachments = dir.join(ATTACHMENTS_DIR);
        fs::create_dir_all(&attachments).map_err(|source| StoreError::Io {
            path: attachments,
            source,
        })?;

        info!("Store opened at {}", dir.display());
        Ok(Self {
            dir,
            science_lock: Mutex::new(()),
        })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Like `read_json`, but a missing file is `Ok(None)`.
fn read_json_opt<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match read_json(path) {
        Ok(value) => Ok(Some(value)),
        Err(StoreError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Ids end up in file names, so only `[A-Za-z0-9_-]` is accepted.
pub fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 128
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
