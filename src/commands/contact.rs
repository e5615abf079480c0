use crate::config;
use crate::contact::{ContactRequest, FormRelay, HttpFormRelay};
use crate::notify::{Notifier, Toast};
use crate::state::AppState;

pub const SENT_DESCRIPTION: &str =
    "Thank you for reaching out. I'll get back to you within 24 hours.";
pub const RETRY_DESCRIPTION: &str = "Please try again later.";
pub const NETWORK_DESCRIPTION: &str = "Unable to send message. Please try again later.";

/// Send the form through `relay`. Every outcome ends in a toast; returns true
/// when the relay accepted the message so the host can clear the form.
pub fn submit_contact(request: &ContactRequest, relay: &dyn FormRelay, notifier: &dyn Notifier) -> bool {
    if let Err(e) = request.validate() {
        notifier.notify(Toast::error("Validation Error", e.to_string()));
        return false;
    }
    tracing::info!("submit_contact: event_type={:?}", request.event_type);
    match relay.submit(request) {
        Ok(reply) if reply.success => {
            notifier.notify(Toast::success("Message Sent!", SENT_DESCRIPTION));
            true
        }
        Ok(reply) => {
            let description = reply
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| RETRY_DESCRIPTION.to_string());
            tracing::warn!("relay rejected message: {}", description);
            notifier.notify(Toast::error("Error sending message", description));
            false
        }
        Err(e) => {
            tracing::warn!("relay failed: {}", e);
            notifier.notify(Toast::error("Network error", NETWORK_DESCRIPTION));
            false
        }
    }
}

/// Build the HTTP relay from `config.json`. An access key is required.
pub fn relay_from_config(state: &AppState) -> Result<HttpFormRelay, String> {
    let config = config::read_config(&state.home).map_err(|e| e.to_string())?;
    let access_key = config
        .relay_access_key
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| "relay_access_key is not configured".to_string())?;
    HttpFormRelay::new(config.relay_endpoint, access_key).map_err(|e| e.to_string())
}
