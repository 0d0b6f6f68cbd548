use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The error document Okta returns alongside non-success statuses.
///
/// See <https://developer.okta.com/docs/reference/error-codes/>
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OktaError {
    pub error_code: String,
    pub error_summary: String,
    #[serde(default)]
    pub error_link: Option<String>,
    #[serde(default)]
    pub error_id: Option<String>,
    #[serde(default)]
    pub error_causes: Vec<ErrorCause>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCause {
    pub error_summary: String,
}

impl OktaError {
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "okta error code {} - {}",
            self.error_code, self.error_summary
        );
        for cause in &self.error_causes {
            summary.push_str("; ");
            summary.push_str(cause.error_summary.as_str());
        }

        summary
    }
}

/// A decoded success response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The JSON document as a structured value.
    Structured(Value),
    /// A top level JSON object exposed as a plain key/value mapping.
    Mapping(Map<String, Value>),
}

impl Payload {
    /// Decodes a success body. An empty body decodes to JSON null.
    pub fn decode(body: &str, as_mapping: bool) -> serde_json::Result<Payload> {
        let value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(body)?
        };

        Ok(match value {
            Value::Object(map) if as_mapping => Payload::Mapping(map),
            value => Payload::Structured(value),
        })
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Payload::Mapping(_))
    }

    pub fn as_mapping(&self) -> Option<&Map<String, Value>> {
        match self {
            Payload::Mapping(map) => Some(map),
            Payload::Structured(Value::Object(map)) => Some(map),
            Payload::Structured(_) => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping()?.get(key)
    }

    pub fn into_value(self) -> Value {
        match self {
            Payload::Structured(value) => value,
            Payload::Mapping(map) => Value::Object(map),
        }
    }

    pub fn into_typed<T: DeserializeOwned>(self) -> serde_json::Result<T> {
        serde_json::from_value(self.into_value())
    }
}
