//! Status and JSON field matchers.
//!
//! Each matcher returns an [`AssertionFailure`] naming the path, the expected
//! value and what was actually found. [`ResponseCheck`] runs many of them
//! against one response and keeps every failure.

use crate::http::ApiResponse;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;

pub mod json_path;

/// Path reported for status code mismatches.
pub const STATUS_PATH: &str = "<status>";

const MISSING: &str = "<missing>";
const BODY_PREVIEW_LEN: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{path}: expected {expected}, got {actual}")]
pub struct AssertionFailure {
    pub path: String,
    pub expected: String,
    pub actual: String,
}

impl AssertionFailure {
    pub fn new(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

fn describe_actual(response: &ApiResponse, path: &str) -> String {
    match response.parsed_body() {
        None => {
            let preview: String = response.raw_body().chars().take(BODY_PREVIEW_LEN).collect();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("no content type");
            format!("non-JSON body ({content_type}) {preview:?}")
        }
        Some(body) => json_path::lookup(body, path)
            .map(Value::to_string)
            .unwrap_or_else(|| MISSING.to_owned()),
    }
}

pub fn assert_status(response: &ApiResponse, expected: u16) -> Result<(), AssertionFailure> {
    let actual = response.status().as_u16();
    if actual == expected {
        Ok(())
    } else {
        Err(AssertionFailure::new(
            STATUS_PATH,
            expected.to_string(),
            actual.to_string(),
        ))
    }
}

pub fn assert_json_field(
    response: &ApiResponse,
    path: &str,
    expected: &Value,
) -> Result<(), AssertionFailure> {
    match response.field(path) {
        Some(actual) if actual == expected => Ok(()),
        _ => Err(AssertionFailure::new(
            path,
            expected.to_string(),
            describe_actual(response, path),
        )),
    }
}

pub fn assert_json_field_exists(response: &ApiResponse, path: &str) -> Result<(), AssertionFailure> {
    match response.field(path) {
        Some(_) => Ok(()),
        None => Err(AssertionFailure::new(
            path,
            "<present>",
            describe_actual(response, path),
        )),
    }
}

/// Present and not `null`, `""`, `[]` or `{}`.
pub fn assert_json_field_non_empty(
    response: &ApiResponse,
    path: &str,
) -> Result<(), AssertionFailure> {
    let non_empty = match response.field(path) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Bool(_)) | Some(Value::Number(_)) => true,
    };

    if non_empty {
        Ok(())
    } else {
        Err(AssertionFailure::new(
            path,
            "<non-empty>",
            describe_actual(response, path),
        ))
    }
}

/// Collects the result of every check made against one response.
pub struct ResponseCheck<'a> {
    response: &'a ApiResponse,
    failures: Vec<AssertionFailure>,
}

impl<'a> ResponseCheck<'a> {
    pub fn new(response: &'a ApiResponse) -> Self {
        Self {
            response,
            failures: Vec::new(),
        }
    }

    pub fn status(&mut self, expected: u16) -> &mut Self {
        let result = assert_status(self.response, expected);
        self.record(result)
    }

    pub fn field_eq(&mut self, path: &str, expected: &Value) -> &mut Self {
        let result = assert_json_field(self.response, path, expected);
        self.record(result)
    }

    pub fn field_exists(&mut self, path: &str) -> &mut Self {
        let result = assert_json_field_exists(self.response, path);
        self.record(result)
    }

    pub fn field_non_empty(&mut self, path: &str) -> &mut Self {
        let result = assert_json_field_non_empty(self.response, path);
        self.record(result)
    }

    pub fn record(&mut self, result: Result<(), AssertionFailure>) -> &mut Self {
        if let Err(failure) = result {
            self.failures.push(failure);
        }
        self
    }

    pub fn finish(self) -> Vec<AssertionFailure> {
        self.failures
    }
}
