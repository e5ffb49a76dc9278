use crate::core::json::{lookup, values_match};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// A present key always yields `Some`, so `"value": null` means "equals null"
// while an absent key means "any value".
fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// A single expectation checked against a received response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    StatusEquals {
        status: u16,
    },
    /// Passes when the property exists, and deep-equals `value` if one is given.
    BodyHasProperty {
        key: String,
        #[serde(
            default,
            deserialize_with = "present_value",
            skip_serializing_if = "Option::is_none"
        )]
        value: Option<Value>,
    },
    BodyPropertyEquals {
        key: String,
        value: Value,
    },
    /// The response reports an error: a 4xx or 5xx status.
    StatusIsError,
}

/// Body of a received response as seen by assertions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum ResponseBody {
    Empty,
    Json(Value),
    /// Body that could not be parsed as JSON, with the parse error.
    Text { raw: String, error: String },
}

impl ResponseBody {
    pub fn parse(raw: String, content_type: Option<&str>) -> Self {
        if raw.trim().is_empty() {
            return ResponseBody::Empty;
        }
        let declared_json = content_type.is_some_and(crate::core::json::is_json_content_type);
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(err) if declared_json || crate::core::json::is_json_content(&raw) => {
                ResponseBody::Text {
                    raw,
                    error: format!("malformed JSON response: {err}"),
                }
            }
            Err(_) => ResponseBody::Text {
                raw,
                error: "response body is not JSON".to_string(),
            },
        }
    }

    fn json(&self) -> Result<&Value, String> {
        match self {
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Empty => Err("response body is empty".to_string()),
            ResponseBody::Text { error, .. } => Err(error.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionResult {
    pub assertion: Assertion,
    pub passed: bool,
    pub detail: String,
}

impl Assertion {
    pub fn description(&self) -> String {
        match self {
            Assertion::StatusEquals { status } => format!("status equals {status}"),
            Assertion::BodyHasProperty { key, value: None } => format!("body has property '{key}'"),
            Assertion::BodyHasProperty {
                key,
                value: Some(value),
            } => format!("body has property '{key}' = {value}"),
            Assertion::BodyPropertyEquals { key, value } => {
                format!("body property '{key}' equals {value}")
            }
            Assertion::StatusIsError => "status is an error (4xx/5xx)".to_string(),
        }
    }

    pub fn evaluate(&self, status: u16, body: &ResponseBody) -> AssertionResult {
        let (passed, detail) = match self {
            Assertion::StatusEquals { status: expected } => (
                status == *expected,
                format!("expected status {expected}, got {status}"),
            ),
            Assertion::StatusIsError => (
                (400..600).contains(&status),
                format!("expected 4xx/5xx status, got {status}"),
            ),
            Assertion::BodyHasProperty { key, value } => {
                check_property(body, key, value.as_ref())
            }
            Assertion::BodyPropertyEquals { key, value } => check_property(body, key, Some(value)),
        };

        AssertionResult {
            assertion: self.clone(),
            passed,
            detail,
        }
    }
}

fn check_property(body: &ResponseBody, key: &str, expected: Option<&Value>) -> (bool, String) {
    let json = match body.json() {
        Ok(json) => json,
        Err(err) => return (false, err),
    };

    match (lookup(json, key), expected) {
        (None, _) => (false, format!("property '{key}' not found")),
        (Some(actual), None) => (true, format!("property '{key}' present ({actual})")),
        (Some(actual), Some(expected)) => (
            values_match(expected, actual),
            format!("expected '{key}' = {expected}, got {actual}"),
        ),
    }
}
