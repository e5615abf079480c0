//! Contact form submission through a third-party form relay.

use crate::media::validate::{is_valid_email, ValidationError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, rename = "eventType")]
    pub event_type: String,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("Name"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("Email"));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.message.trim().is_empty() {
            return Err(ValidationError::MissingField("Message"));
        }
        Ok(())
    }
}

/// Relay reply body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("relay unreachable: {0}")]
    Network(String),
    #[error("relay reply unreadable: {0}")]
    Decode(String),
}

pub trait FormRelay {
    fn submit(&self, request: &ContactRequest) -> Result<RelayResponse, RelayError>;
}

/// Form-encoded POST to a web3forms-style endpoint.
pub struct HttpFormRelay {
    client: reqwest::blocking::Client,
    endpoint: String,
    access_key: String,
}

impl HttpFormRelay {
    pub fn new(endpoint: impl Into<String>, access_key: impl Into<String>) -> Result<Self, RelayError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| RelayError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            access_key: access_key.into(),
        })
    }

    fn form_fields<'a>(&'a self, request: &'a ContactRequest) -> Vec<(&'static str, &'a str)> {
        vec![
            ("name", request.name.as_str()),
            ("email", request.email.as_str()),
            ("phone", request.phone.as_str()),
            ("eventType", request.event_type.as_str()),
            ("message", request.message.as_str()),
            ("access_key", self.access_key.as_str()),
        ]
    }
}

impl FormRelay for HttpFormRelay {
    fn submit(&self, request: &ContactRequest) -> Result<RelayResponse, RelayError> {
        tracing::info!("relay submit: endpoint={}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&self.form_fields(request))
            .send()
            .map_err(|e| RelayError::Network(e.to_string()))?;
        let body = response
            .text()
            .map_err(|e| RelayError::Network(e.to_string()))?;
        parse_relay_response(&body)
    }
}

/// Error statuses still carry a JSON body, so only the body is inspected.
pub fn parse_relay_response(body: &str) -> Result<RelayResponse, RelayError> {
    serde_json::from_str(body).map_err(|e| RelayError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ContactRequest {
        ContactRequest {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            event_type: "wedding".to_string(),
            message: "Looking for coverage in December.".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let mut r = request();
        r.name = "  ".to_string();
        assert_eq!(r.validate(), Err(ValidationError::MissingField("Name")));

        let mut r = request();
        r.email = "asha".to_string();
        assert_eq!(r.validate(), Err(ValidationError::InvalidEmail));

        let mut r = request();
        r.message.clear();
        assert_eq!(r.validate(), Err(ValidationError::MissingField("Message")));
    }

    #[test]
    fn test_phone_and_event_type_optional() {
        let mut r = request();
        r.phone.clear();
        r.event_type.clear();
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_parse_relay_response() {
        let ok = parse_relay_response(r#"{"success": true, "message": "Email sent"}"#).unwrap();
        assert!(ok.success);
        let failed = parse_relay_response(r#"{"success": false}"#).unwrap();
        assert!(!failed.success);
        assert!(failed.message.is_none());
        assert!(matches!(
            parse_relay_response("<html>bad gateway</html>"),
            Err(RelayError::Decode(_))
        ));
    }

    #[test]
    fn test_form_fields_append_access_key() {
        let relay = HttpFormRelay::new("https://relay.example.com/submit", "key-123").unwrap();
        let req = request();
        let fields = relay.form_fields(&req);
        assert_eq!(fields.last(), Some(&("access_key", "key-123")));
        assert!(fields.contains(&("eventType", "wedding")));
    }
}
