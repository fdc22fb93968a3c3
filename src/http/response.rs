use crate::assertions::json_path;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;

/// Everything captured from one response. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    raw_body: String,
    parsed_body: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, raw_body: String) -> Self {
        let parsed_body = serde_json::from_str(&raw_body).ok();
        Self {
            status,
            headers,
            raw_body,
            parsed_body,
        }
    }

    pub fn json(status: StatusCode, body: &Value) -> Self {
        Self::new(status, HeaderMap::new(), body.to_string())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    /// `None` when the body was not valid JSON (e.g. an HTML error page).
    pub fn parsed_body(&self) -> Option<&Value> {
        self.parsed_body.as_ref()
    }

    pub fn field(&self, path: &str) -> Option<&Value> {
        self.parsed_body
            .as_ref()
            .and_then(|body| json_path::lookup(body, path))
    }

    pub fn str_field(&self, path: &str) -> Option<&str> {
        self.field(path).and_then(Value::as_str)
    }
}
