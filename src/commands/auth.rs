use crate::auth::{self, Credentials, User};
use crate::commands::with_db;
use crate::config::append_operation_log;
use crate::notify::{Notifier, Toast};
use crate::state::AppState;

pub fn sign_in(
    credentials: Credentials,
    state: &AppState,
    notifier: &dyn Notifier,
) -> Result<User, String> {
    tracing::info!("sign_in: email={}", credentials.email.trim());
    let user = with_db(state, |conn| {
        auth::sign_in(conn, &credentials).map_err(|e| e.to_string())
    })
    .inspect_err(|e| notifier.notify(Toast::error("Login Failed", e.clone())))?;
    *state
        .current_user
        .lock()
        .map_err(|_| "lock poisoned".to_string())? = Some(user.clone());
    append_operation_log(&state.home, &format!("SIGNED_IN user={}", user.email));
    Ok(user)
}

/// Returns true if someone was signed in.
pub fn sign_out(state: &AppState) -> Result<bool, String> {
    let previous = state
        .current_user
        .lock()
        .map_err(|_| "lock poisoned".to_string())?
        .take();
    if let Some(user) = &previous {
        tracing::info!("sign_out: email={}", user.email);
        append_operation_log(&state.home, &format!("SIGNED_OUT user={}", user.email));
    }
    Ok(previous.is_some())
}

pub fn current_user(state: &AppState) -> Result<Option<User>, String> {
    Ok(state
        .current_user
        .lock()
        .map_err(|_| "lock poisoned".to_string())?
        .clone())
}

pub fn is_admin(state: &AppState) -> Result<bool, String> {
    Ok(current_user(state)?.is_some_and(|u| u.is_admin))
}

/// Bootstrap an account. Does not sign it in.
pub fn create_user(credentials: Credentials, is_admin: bool, state: &AppState) -> Result<User, String> {
    let user = with_db(state, |conn| {
        auth::create_user(conn, &credentials, is_admin).map_err(|e| e.to_string())
    })?;
    tracing::info!("create_user: email={} admin={}", user.email, user.is_admin);
    append_operation_log(
        &state.home,
        &format!("USER_CREATED user={} admin={}", user.email, user.is_admin),
    );
    Ok(user)
}
