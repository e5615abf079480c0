use crate::auth::User;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Mutex;

/// Shared state for every command. Lock order: `db` first, then `current_user`.
pub struct AppState {
    pub db: Mutex<Option<Connection>>,
    pub current_user: Mutex<Option<User>>,
    pub home: PathBuf,
}

impl AppState {
    pub fn new(home: PathBuf) -> Self {
        Self {
            db: Mutex::new(None),
            current_user: Mutex::new(None),
            home,
        }
    }
}
