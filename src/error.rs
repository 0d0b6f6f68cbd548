use crate::okta::api_responses::OktaError;
use serde_json::Value;
use std::fmt;

pub type Result<T> = std::result::Result<T, RequestError>;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// A response outside of the success range.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    status: u16,
    payload: Option<Value>,
}

impl ApiError {
    /// Builds the error from a raw response body. Bodies that are not JSON leave the payload empty.
    pub fn from_body(status: u16, body: &str) -> Self {
        ApiError {
            status,
            payload: serde_json::from_str(body).ok(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// The payload read as an Okta error document, when it has that shape.
    pub fn okta_error(&self) -> Option<OktaError> {
        let payload = self.payload.clone()?;
        serde_json::from_value(payload).ok()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.okta_error() {
            Some(error) => write!(f, "status {}: {}", self.status, error.summary()),
            None => write!(f, "unexpected response status {}", self.status),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_api_error_with_json_body() {
        let error = ApiError::from_body(404, r#"{"errorCode":"E001"}"#);
        assert_eq!(error.status(), 404);
        assert_eq!(
            error.payload(),
            Some(&serde_json::json!({"errorCode": "E001"}))
        );
    }

    #[test]
    fn test_api_error_with_text_body() {
        let error = ApiError::from_body(500, "Internal Error");
        assert_eq!(error.payload(), None);
        assert!(error.okta_error().is_none());
        assert_eq!(error.to_string(), "unexpected response status 500");
    }

    #[test]
    fn test_api_error_display_uses_okta_summary() {
        let body = serde_json::json!({
            "errorCode": "E0000007",
            "errorSummary": "Not found: Resource not found: u1 (User)",
            "errorLink": "E0000007",
            "errorId": "oaeXYZ",
            "errorCauses": [],
        });
        let error = ApiError::from_body(404, &body.to_string());
        assert_eq!(
            error.to_string(),
            "status 404: okta error code E0000007 - Not found: Resource not found: u1 (User)"
        );
    }

    #[test]
    fn test_transport_error_is_passed_through() {
        let error = RequestError::from(anyhow!("connection refused"));
        assert_eq!(error.to_string(), "connection refused");
    }
}
