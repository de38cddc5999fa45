use std::sync::Arc;

use archive_store::Store;

use crate::error::ApiError;

/// Page size used when `/messages` is called without `items`.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 100;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Store,
    pub max_items_per_page: u32,
}

impl AppStateInner {
    pub fn new(store: Store, max_items_per_page: u32) -> AppState {
        Arc::new(Self {
            store,
            max_items_per_page: max_items_per_page.max(1),
        })
    }

    pub fn default_items_per_page(&self) -> u32 {
        DEFAULT_ITEMS_PER_PAGE.min(self.max_items_per_page)
    }
}

/// Run a store call on the blocking pool. Store I/O is synchronous file access.
pub async fn with_store<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Store) -> archive_store::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.store))
        .await
        .map_err(|e| ApiError::Internal(format!("spawn_blocking join error: {}", e)))?
        .map_err(ApiError::from)
}
