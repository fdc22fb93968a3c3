//! Executes scenarios: fixture setup, request, assertions, teardown.
//!
//! Scenarios run on a bounded worker pool. With a concurrency of one they run
//! strictly in catalog order. Each scenario owns its users, so nothing is
//! shared between tasks except the transport and the email registry.

use crate::config::HarnessConfig;
use crate::fixtures::{FixtureError, UserFixture};
use crate::http::{ApiClient, ApiRequest, ApiResponse, Endpoint, RequestBody, Transport};
use crate::requests::{
    login_body, order_body, order_without_body, register_body, update_user_body,
};
use crate::result::error::{HarnessError, Result};
use crate::scenarios::{
    AuthMode, EmailSource, OrderPayload, PasswordSource, RequestSpec, Scenario,
};
use chrono::Utc;
use model::order::OrderRequest;
use model::user::{AuthResponse, TestUser, UserUpdate};
use reqwest::StatusCode;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::Instrument;
use validator::Validate;

pub use self::report::{RunReport, RunSummary, ScenarioOutcome, Verdict};
pub use self::stage::{ScenarioStage, StageTracker};

mod evaluate;
mod report;
mod stage;

use self::evaluate::{evaluate, Evaluation};

/// Request built for one scenario, plus what is needed to check and clean up
/// after it.
struct PreparedRequest {
    request: ApiRequest,
    /// Account the request would create if the service accepts it.
    registers: Option<TestUser>,
}

/// What the body of a scenario produced before teardown.
struct Executed {
    status: StatusCode,
    evaluation: Evaluation,
}

/// First reason the run was stopped, shared between workers.
#[derive(Default)]
struct AbortSignal(Mutex<Option<String>>);

impl AbortSignal {
    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn trigger(&self, reason: String) {
        self.lock().get_or_insert(reason);
    }

    fn reason(&self) -> Option<String> {
        self.lock().clone()
    }
}

pub struct Runner<T: Transport> {
    transport: Arc<T>,
    fixture: UserFixture<T>,
    concurrency: usize,
    abort: AbortSignal,
}

impl Runner<ApiClient> {
    /// Validates the configuration and builds a runner over the real service.
    pub fn from_config(config: &HarnessConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| HarnessError::Config(e.into()))?;
        let client = ApiClient::new(config)?;
        Ok(Self::new(Arc::new(client), config))
    }
}

impl<T: Transport + 'static> Runner<T> {
    pub fn new(transport: Arc<T>, config: &HarnessConfig) -> Self {
        Self {
            fixture: UserFixture::new(transport.clone(), config),
            transport,
            concurrency: config.concurrency.max(1),
            abort: AbortSignal::default(),
        }
    }

    pub fn fixture(&self) -> &UserFixture<T> {
        &self.fixture
    }

    /// Runs every scenario and reports each one independently. Outcomes keep
    /// the order of `scenarios`.
    pub async fn run(self: &Arc<Self>, scenarios: Vec<Scenario>) -> RunReport {
        let started_at = Utc::now();
        tracing::info!(
            scenarios = scenarios.len(),
            concurrency = self.concurrency,
            "Contract run started"
        );

        let mut outcomes: Vec<Option<ScenarioOutcome>> = vec![None; scenarios.len()];
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        for (index, scenario) in scenarios.iter().cloned().enumerate() {
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                break;
            };
            let runner = Arc::clone(self);
            tasks.spawn(async move {
                let _permit = permit;
                (index, runner.run_scenario(&scenario).await)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = Some(outcome),
                Err(e) => tracing::error!(error = %e, "Scenario task did not complete"),
            }
        }

        let outcomes = outcomes
            .into_iter()
            .zip(&scenarios)
            .map(|(outcome, scenario)| {
                outcome.unwrap_or_else(|| {
                    let mut lost = ScenarioOutcome::skipped(
                        scenario.name,
                        scenario.area,
                        "scenario task panicked or was cancelled",
                    );
                    lost.verdict = Verdict::Failed;
                    lost
                })
            })
            .collect();

        RunReport {
            started_at,
            finished_at: Utc::now(),
            aborted: self.abort.reason(),
            outcomes,
        }
    }

    /// Runs one scenario through every stage. Teardown runs whatever happened
    /// before it.
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioOutcome {
        if let Some(reason) = self.abort.reason() {
            return ScenarioOutcome::skipped(
                scenario.name,
                scenario.area,
                format!("run aborted: {reason}"),
            );
        }

        let span = tracing::info_span!("scenario", name = scenario.name, area = %scenario.area);
        self.run_stages(scenario).instrument(span).await
    }

    async fn run_stages(&self, scenario: &Scenario) -> ScenarioOutcome {
        let started = Instant::now();
        tracing::info!("Scenario started");

        let mut tracker = StageTracker::default();
        let mut users = Vec::new();
        let executed = self.execute(scenario, &mut tracker, &mut users).await;
        if executed.is_err() {
            tracker.fail();
        }

        tracker.advance(ScenarioStage::FixtureTeardown);
        let mut fixture_errors = Vec::new();
        for user in users.iter_mut() {
            if let Err(e) = self.fixture.teardown(user).await {
                fixture_errors.push(e.to_string());
            }
        }

        let mut outcome = ScenarioOutcome {
            name: scenario.name,
            area: scenario.area,
            verdict: Verdict::Passed,
            status: None,
            assertion_failures: Vec::new(),
            network_error: None,
            fixture_errors,
            notes: Vec::new(),
            stages: Vec::new(),
            duration_ms: 0,
        };

        match executed {
            Ok(Executed { status, evaluation }) => {
                outcome.status = Some(status.as_u16());
                outcome.assertion_failures = evaluation.failures;
                outcome.notes = evaluation.notes;
            }
            Err(HarnessError::Network(e)) => outcome.network_error = Some(e.to_string()),
            Err(HarnessError::Fixture(e)) => outcome.fixture_errors.insert(0, e.to_string()),
            Err(e) => outcome.assertion_failures.push(crate::assertions::AssertionFailure::new(
                "<scenario>",
                "successful execution",
                e.to_string(),
            )),
        }

        if !outcome.assertion_failures.is_empty()
            || outcome.network_error.is_some()
            || !outcome.fixture_errors.is_empty()
        {
            tracker.fail();
            outcome.verdict = Verdict::Failed;
        }
        tracker.advance(ScenarioStage::Done);
        outcome.stages = tracker.into_stages();
        outcome.duration_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            verdict = ?outcome.verdict,
            status = ?outcome.status,
            duration_ms = outcome.duration_ms,
            "Scenario finished"
        );
        outcome
    }

    /// Setup, request and assertions. Every account created on the way is
    /// pushed to `users` as soon as it exists so the caller can release it.
    async fn execute(
        &self,
        scenario: &Scenario,
        tracker: &mut StageTracker,
        users: &mut Vec<TestUser>,
    ) -> Result<Executed> {
        let result = self.execute_stages(scenario, tracker, users).await;
        if let Err(e) = &result {
            if e.is_unreachable() {
                tracing::error!(error = %e, "Service unreachable, aborting remaining scenarios");
                self.abort.trigger(e.to_string());
            }
        }
        result
    }

    async fn execute_stages(
        &self,
        scenario: &Scenario,
        tracker: &mut StageTracker,
        users: &mut Vec<TestUser>,
    ) -> Result<Executed> {
        let fixture_user = if scenario.needs_fixture() {
            tracker.advance(ScenarioStage::FixtureSetup);
            let user = self.fixture.setup().await?;
            users.push(user.clone());
            Some(user)
        } else {
            None
        };

        let PreparedRequest { request, registers } =
            self.prepare(scenario, fixture_user.as_ref())?;
        let sent_body = request.body.as_json().cloned();

        tracker.advance(ScenarioStage::RequestSent);
        let response = self.transport.send(request).await?;
        if let Some(user) = adopt_registered_user(registers, &response) {
            tracing::info!(email = %user.email, "Scenario registered a user, scheduling deletion");
            users.push(user);
        }

        tracker.advance(ScenarioStage::Asserted);
        let evaluation = evaluate(scenario, sent_body.as_ref(), &response);
        Ok(Executed {
            status: response.status(),
            evaluation,
        })
    }

    fn prepare(
        &self,
        scenario: &Scenario,
        fixture_user: Option<&TestUser>,
    ) -> std::result::Result<PreparedRequest, FixtureError> {
        let token = match scenario.auth {
            AuthMode::Anonymous => None,
            AuthMode::FixtureToken => Some(
                fixture_user
                    .and_then(TestUser::access_token)
                    .ok_or(FixtureError::NotProvisioned)?,
            ),
        };

        let mut registers = None;
        let (endpoint, body) = match &scenario.request {
            RequestSpec::Register {
                email,
                password,
                name,
            } => {
                let email = self.resolve_email(email, fixture_user)?;
                let password = self.resolve_password(password, fixture_user)?;
                let body = register_body(email.as_deref(), &password, name);
                registers = email.map(|email| TestUser::new(email, password, *name));
                (Endpoint::Register, body)
            }
            RequestSpec::Login { email, password } => {
                let email = self.resolve_email(email, fixture_user)?.unwrap_or_default();
                let password = self.resolve_password(password, fixture_user)?;
                (Endpoint::Login, login_body(&email, &password))
            }
            RequestSpec::UpdateUser { email, name } => {
                let email = match email {
                    Some(source) => self.resolve_email(source, fixture_user)?,
                    None => None,
                };
                let update = UserUpdate {
                    email,
                    name: name.map(ToOwned::to_owned),
                    password: None,
                };
                (Endpoint::UpdateUser, update_user_body(&update))
            }
            RequestSpec::CreateOrder(payload) => {
                let body = match payload {
                    OrderPayload::Ingredients(ids) => {
                        order_body(&OrderRequest::new(ids.iter().copied()))
                    }
                    OrderPayload::EmptyList => order_body(&OrderRequest::default()),
                    OrderPayload::NoBody => order_without_body(),
                };
                (Endpoint::CreateOrder, body)
            }
            RequestSpec::FetchOrders => (Endpoint::FetchOrders, RequestBody::Empty),
        };

        Ok(PreparedRequest {
            request: ApiRequest::new(endpoint)
                .with_token(token)
                .with_body(body),
            registers,
        })
    }

    fn resolve_email(
        &self,
        source: &EmailSource,
        fixture_user: Option<&TestUser>,
    ) -> std::result::Result<Option<String>, FixtureError> {
        match source {
            EmailSource::Fresh(prefix) => Ok(Some(self.fixture.emails().generate(prefix)?)),
            EmailSource::FixtureUser => fixture_user
                .map(|user| Some(user.email.clone()))
                .ok_or(FixtureError::NotProvisioned),
            EmailSource::Missing => Ok(None),
            EmailSource::Literal(email) => Ok(Some((*email).to_owned())),
        }
    }

    fn resolve_password(
        &self,
        source: &PasswordSource,
        fixture_user: Option<&TestUser>,
    ) -> std::result::Result<String, FixtureError> {
        match source {
            PasswordSource::Default => Ok(self.fixture.password().to_owned()),
            PasswordSource::FixtureUser => fixture_user
                .map(|user| user.password.clone())
                .ok_or(FixtureError::NotProvisioned),
            PasswordSource::Literal(password) => Ok((*password).to_owned()),
        }
    }
}

/// A registration the service accepted created a real account. Attach its
/// token so teardown deletes it like any fixture user.
fn adopt_registered_user(candidate: Option<TestUser>, response: &ApiResponse) -> Option<TestUser> {
    let mut user = candidate?;
    if response.status() != StatusCode::OK {
        return None;
    }

    let token = response
        .parsed_body()
        .and_then(|body| serde_json::from_value::<AuthResponse>(body.clone()).ok())
        .and_then(|auth| auth.access_token)
        .filter(|token| !token.is_empty())?;
    user.attach_token(token);
    Some(user)
}
