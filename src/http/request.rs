use reqwest::Method;
use serde_json::Value;

/// Endpoints of the service the harness talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    Login,
    UpdateUser,
    DeleteUser,
    CreateOrder,
    FetchOrders,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Register | Endpoint::Login | Endpoint::CreateOrder => Method::POST,
            Endpoint::UpdateUser => Method::PATCH,
            Endpoint::DeleteUser => Method::DELETE,
            Endpoint::FetchOrders => Method::GET,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Register => "/auth/register",
            Endpoint::Login => "/auth/login",
            Endpoint::UpdateUser | Endpoint::DeleteUser => "/auth/user",
            Endpoint::CreateOrder | Endpoint::FetchOrders => "/orders",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    /// No payload at all, as opposed to an empty JSON document.
    Empty,
}

impl RequestBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            RequestBody::Json(value) => Some(value),
            RequestBody::Empty => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    /// Sent verbatim as the `Authorization` header. The service already
    /// includes the `Bearer ` prefix in the tokens it issues.
    pub token: Option<String>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            token: None,
            body: RequestBody::Empty,
        }
    }

    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.token = token.map(ToOwned::to_owned);
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}
