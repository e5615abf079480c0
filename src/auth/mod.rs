//! Admin authentication against the local `users` table.

pub mod password;
pub mod repository;

use crate::media::validate::{is_valid_email, ValidationError};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid login credentials")]
    InvalidCredentials,
    #[error("Account {0} does not have admin access")]
    NotAdmin(String),
    #[error("user store error: {0}")]
    Store(#[from] rusqlite::Error),
    #[error("password hash error: {0}")]
    Hash(argon2::password_hash::Error),
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(e: argon2::password_hash::Error) -> Self {
        AuthError::Hash(e)
    }
}

pub fn validate_credentials(credentials: &Credentials) -> Result<(), ValidationError> {
    if !is_valid_email(credentials.email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    if credentials.password.chars().count() < password::MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort(password::MIN_PASSWORD_LENGTH));
    }
    Ok(())
}

/// Check credentials and return the account. Unknown email and wrong password
/// produce the same error.
pub fn sign_in(conn: &Connection, credentials: &Credentials) -> Result<User, AuthError> {
    validate_credentials(credentials)?;
    let row = repository::find_user_by_email(conn, credentials.email.trim())?
        .ok_or(AuthError::InvalidCredentials)?;
    if !password::verify_password(&credentials.password, &row.password_hash)? {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(row.user)
}

/// Hash the password and store a new account.
pub fn create_user(
    conn: &Connection,
    credentials: &Credentials,
    is_admin: bool,
) -> Result<User, AuthError> {
    validate_credentials(credentials)?;
    let hash = password::hash_password(&credentials.password)?;
    Ok(repository::insert_user(
        conn,
        credentials.email.trim(),
        &hash,
        is_admin,
    )?)
}
