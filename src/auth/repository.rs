use crate::auth::User;
use rusqlite::{params, Connection, OptionalExtension};

/// Stored account row, including the hash that never leaves this module's callers.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub user: User,
    pub password_hash: String,
}

pub fn insert_user(
    conn: &Connection,
    email: &str,
    password_hash: &str,
    is_admin: bool,
) -> rusqlite::Result<User> {
    let now = crate::media::repository::now_timestamp();
    conn.execute(
        "INSERT INTO users (email, password_hash, is_admin, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![email, password_hash, is_admin, now],
    )?;
    Ok(User {
        id: conn.last_insert_rowid(),
        email: email.to_string(),
        is_admin,
    })
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> rusqlite::Result<Option<UserRow>> {
    conn.query_row(
        "SELECT id, email, is_admin, password_hash FROM users WHERE email = ?1 COLLATE NOCASE",
        params![email],
        |row| {
            Ok(UserRow {
                user: User {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    is_admin: row.get(2)?,
                },
                password_hash: row.get(3)?,
            })
        },
    )
    .optional()
}
