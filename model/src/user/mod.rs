use serde::{Deserialize, Serialize};

pub use self::email::{EmailGenerator, EmailGeneratorError};

mod email;

/// Throwaway account owned by a single scenario.
///
/// The access token is only attached once registration succeeds. While it is
/// present the account is considered live and must be deleted exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestUser {
    pub email: String,
    pub password: String,
    pub name: String,
    access_token: Option<String>,
}

impl TestUser {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
            access_token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.attach_token(token);
        self
    }

    pub fn attach_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Removes the token so a second release of the same account does nothing.
    pub fn take_token(&mut self) -> Option<String> {
        self.access_token.take()
    }

    pub fn is_live(&self) -> bool {
        self.access_token.is_some()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Partial profile update. Unset fields are left out of the payload.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub email: String,
    pub name: String,
}

/// Successful register/login body.
#[derive(Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(rename = "accessToken", default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub success: bool,
    pub user: UserInfo,
}
