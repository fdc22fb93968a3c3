use serde::Deserialize;

/// Body returned by the service for every rejected request.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
