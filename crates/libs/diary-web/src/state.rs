//! Shared application state.

use std::sync::Arc;

use diary_auth::jwt::JwtKeys;
use diary_models::store::{EntryStore, UserStore};

/// Handles injected into every request. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub entries: Arc<dyn EntryStore>,
    pub keys: Arc<JwtKeys>,
}

impl AppState {
    /// Builds the state around a single backend serving both users and entries.
    pub fn new<S>(store: S, keys: JwtKeys) -> Self
    where
        S: UserStore + EntryStore + 'static,
    {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            entries: store,
            keys: Arc::new(keys),
        }
    }
}
