//! Ephemeral user accounts.
//!
//! [`UserFixture::setup`] registers a fresh account and returns it with its
//! access token attached. [`UserFixture::teardown`] deletes the account and
//! consumes the token, so the delete is attempted at most once per account.

use crate::config::HarnessConfig;
use crate::http::{ApiRequest, Endpoint, NetworkError, Transport};
use crate::requests::register_body;
use model::error::ErrorResponse;
use model::user::{AuthResponse, EmailGenerator, EmailGeneratorError, TestUser};
use reqwest::StatusCode;
use std::sync::Arc;

/// Statuses the service uses to acknowledge a deleted account.
pub const ACCEPTED_DELETE_STATUSES: [StatusCode; 2] = [StatusCode::OK, StatusCode::ACCEPTED];

const FIXTURE_EMAIL_PREFIX: &str = "test";

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("registration of {email} was rejected with status {status}: {message}")]
    RegistrationRejected {
        email: String,
        status: u16,
        message: String,
    },
    #[error("registration of {email} succeeded without an access token")]
    MissingToken { email: String },
    #[error("deleting {email} returned unexpected status {status}")]
    UnexpectedTeardownStatus { email: String, status: u16 },
    #[error("scenario needs a fixture user but none was provisioned")]
    NotProvisioned,
    #[error(transparent)]
    Email(#[from] EmailGeneratorError),
    #[error("network failure during {stage} of {email}: {source}")]
    Network {
        stage: &'static str,
        email: String,
        #[source]
        source: NetworkError,
    },
}

impl FixtureError {
    pub fn network_error(&self) -> Option<&NetworkError> {
        match self {
            FixtureError::Network { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownOutcome {
    Deleted(StatusCode),
    /// The account had no live token: it was never registered or was
    /// already deleted.
    Skipped,
}

pub struct UserFixture<T: Transport> {
    transport: Arc<T>,
    emails: EmailGenerator,
    password: String,
    name: String,
}

impl<T: Transport> UserFixture<T> {
    pub fn new(transport: Arc<T>, config: &HarnessConfig) -> Self {
        Self {
            transport,
            emails: EmailGenerator::new(config.email_domain.clone()),
            password: config.default_password.clone(),
            name: config.default_user_name.clone(),
        }
    }

    /// Run-wide email source. Scenarios that need extra fresh addresses draw
    /// from the same generator so uniqueness holds across the whole run.
    pub fn emails(&self) -> &EmailGenerator {
        &self.emails
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub async fn setup(&self) -> Result<TestUser, FixtureError> {
        let email = self.emails.generate(FIXTURE_EMAIL_PREFIX)?;
        let user = TestUser::new(email, self.password.clone(), self.name.clone());
        let user = self.register(user).await?;
        tracing::info!(email = %user.email, "Fixture user registered");
        Ok(user)
    }

    async fn register(&self, mut user: TestUser) -> Result<TestUser, FixtureError> {
        let request = ApiRequest::new(Endpoint::Register).with_body(register_body(
            Some(&user.email),
            &user.password,
            &user.name,
        ));
        let response =
            self.transport
                .send(request)
                .await
                .map_err(|source| FixtureError::Network {
                    stage: "setup",
                    email: user.email.clone(),
                    source,
                })?;

        let auth = response
            .parsed_body()
            .and_then(|body| serde_json::from_value::<AuthResponse>(body.clone()).ok());
        let accepted = auth.as_ref().is_some_and(|auth| auth.success);

        if response.status() != StatusCode::OK || !accepted {
            let message = response
                .parsed_body()
                .and_then(|body| serde_json::from_value::<ErrorResponse>(body.clone()).ok())
                .and_then(|error| error.message)
                .unwrap_or_else(|| response.raw_body().to_owned());
            return Err(FixtureError::RegistrationRejected {
                email: user.email,
                status: response.status().as_u16(),
                message,
            });
        }

        let token = auth
            .and_then(|auth| auth.access_token)
            .filter(|token| !token.is_empty());

        match token {
            Some(token) => {
                user.attach_token(token);
                Ok(user)
            }
            None => Err(FixtureError::MissingToken { email: user.email }),
        }
    }

    pub async fn teardown(&self, user: &mut TestUser) -> Result<TeardownOutcome, FixtureError> {
        let Some(token) = user.take_token() else {
            return Ok(TeardownOutcome::Skipped);
        };

        let request = ApiRequest::new(Endpoint::DeleteUser).with_token(Some(&token));
        let response =
            self.transport
                .send(request)
                .await
                .map_err(|source| FixtureError::Network {
                    stage: "teardown",
                    email: user.email.clone(),
                    source,
                })?;

        let status = response.status();
        if ACCEPTED_DELETE_STATUSES.contains(&status) {
            tracing::info!(email = %user.email, status = status.as_u16(), "Fixture user deleted");
            Ok(TeardownOutcome::Deleted(status))
        } else {
            tracing::error!(
                email = %user.email,
                status = status.as_u16(),
                "Fixture user could not be deleted, account leaked"
            );
            Err(FixtureError::UnexpectedTeardownStatus {
                email: user.email.clone(),
                status: status.as_u16(),
            })
        }
    }
}
