use super::assertion::Assertion;
use super::http_method::HttpMethod;
use super::template;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Request payload of a case. `Raw` text is sent verbatim, even when it is
/// not valid JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestBody {
    Json(Value),
    Raw(String),
}

impl RequestBody {
    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        match self {
            RequestBody::Json(value) => serde_json::to_string(value),
            RequestBody::Raw(text) => Ok(text.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub method: HttpMethod,
    pub path: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub expected_status: u16,
    pub assertions: Vec<Assertion>,
}

impl TestCase {
    pub fn new(name: &str, method: HttpMethod, path: &str, expected_status: u16) -> Self {
        let group = name.split_once('/').map(|(group, _)| group.to_string());
        Self {
            name: name.to_string(),
            group,
            method,
            path: path.to_string(),
            params: BTreeMap::new(),
            body: None,
            content_type: None,
            expected_status,
            assertions: Vec::new(),
        }
    }

    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    pub fn json_body(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn raw_body(mut self, body: &str) -> Self {
        self.body = Some(RequestBody::Raw(body.to_string()));
        self
    }

    pub fn assert(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Path with all placeholders bound.
    pub fn resolved_path(&self) -> Result<String, String> {
        template::render(&self.path, &self.params).map_err(|unbound| {
            format!(
                "unbound placeholder(s) in '{}': {}",
                self.path,
                unbound.join(", ")
            )
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("case name must not be empty".to_string());
        }
        if !self.path.starts_with('/') {
            return Err(format!("case '{}': path must start with '/'", self.name));
        }
        if self.assertions.is_empty() {
            return Err(format!("case '{}': assertion list is empty", self.name));
        }
        if !(100..600).contains(&self.expected_status) {
            return Err(format!(
                "case '{}': expected status {} is not an HTTP status",
                self.name, self.expected_status
            ));
        }
        self.resolved_path()
            .map(|_| ())
            .map_err(|err| format!("case '{}': {err}", self.name))
    }
}
