use crate::core::logger::Logger;
use crate::suite::{HttpMethod, TestCase};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    pub kind: &'static str,
    pub message: String,
}

impl HttpError {
    pub fn new(kind: &'static str, message: impl Into<String>) -> Self {
        HttpError {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new("timeout", message)
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl Error for HttpError {}

fn error_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            "timeout"
        } else if error.is_connect() {
            "connection error"
        } else if error.is_body() || error.is_decode() {
            "body error"
        } else if error.is_builder() || error.is_request() {
            "request error"
        } else {
            "transport error"
        };
        HttpError::new(kind, error_chain(&error))
    }
}

/// A case with its path bound to a concrete URL and its body serialized.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<String>,
    pub content_type: String,
}

impl PreparedRequest {
    pub fn from_case(case: &TestCase, base_url: &str) -> Result<Self, HttpError> {
        let path = case
            .resolved_path()
            .map_err(|err| HttpError::new("request error", err))?;
        let body = case
            .body
            .as_ref()
            .map(|body| body.to_payload())
            .transpose()
            .map_err(|err| HttpError::new("request error", format!("cannot encode body: {err}")))?;

        Ok(PreparedRequest {
            method: case.method,
            url: join_url(base_url, &path),
            body,
            content_type: case
                .content_type
                .clone()
                .unwrap_or_else(|| crate::core::json::CONTENT_TYPE.to_string()),
        })
    }
}

pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(reqwest::header::CONTENT_TYPE.as_str())
            .map(String::as_str)
    }
}

pub async fn execute_request(
    client: &reqwest::Client,
    request: &PreparedRequest,
) -> Result<HttpResponse, HttpError> {
    Logger::debug(&format!(
        "Executing {} request to URL: {}",
        request.method.as_str(),
        request.url
    ));

    let mut req_builder = client
        .request(request.method.to_reqwest_method(), &request.url)
        .header(reqwest::header::ACCEPT, crate::core::json::CONTENT_TYPE);

    if let Some(body) = &request.body {
        Logger::debug(&format!("Request body: {body}"));
        req_builder = req_builder
            .header(reqwest::header::CONTENT_TYPE, &request.content_type)
            .body(body.clone());
    }

    let response = req_builder.send().await?;
    let status = response.status().as_u16();

    let mut headers = BTreeMap::new();
    for (key, value) in response.headers() {
        if let Ok(value_str) = value.to_str() {
            headers.insert(key.to_string(), value_str.to_string());
        }
    }

    let body = response.text().await?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
