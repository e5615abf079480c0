pub mod admin;
pub mod auth;
pub mod contact;
pub mod gallery;


use crate::config;
use crate::db::{open_connection, run_migrations};
use crate::state::AppState;
use rusqlite::Connection;

// ── Lock helpers ──────────────────────────────────────────────────────────────

/// Run `f` against the portfolio database, opening and migrating it on first
/// use. The `db` lock is held for the duration of `f`.
pub(crate) fn with_db<T>(
    state: &AppState,
    f: impl FnOnce(&Connection) -> Result<T, String>,
) -> Result<T, String> {
    let mut db_guard = state.db.lock().map_err(|_| "lock poisoned".to_string())?;
    if db_guard.is_none() {
        let path = config::database_path(&state.home);
        tracing::info!("opening portfolio database at {:?}", path);
        let conn = open_connection(&path).map_err(|e| e.to_string())?;
        run_migrations(&conn).map_err(|e| e.to_string())?;
        *db_guard = Some(conn);
    }
    match db_guard.as_ref() {
        Some(conn) => f(conn),
        None => Err("database unavailable".to_string()),
    }
}
