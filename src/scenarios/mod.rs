//! Declarative description of every contract check.
//!
//! A [`Scenario`] holds data only: which user it needs, what request to build,
//! and what the response must look like. The runner turns it into calls.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

pub mod catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Auth,
    User,
    Orders,
}

impl Area {
    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Auth => "auth",
            Area::User => "user",
            Area::Orders => "orders",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureNeed {
    None,
    AuthenticatedUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Anonymous,
    /// Send the fixture user's token in `Authorization`.
    FixtureToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailSource {
    /// A never-used address with the given prefix.
    Fresh(&'static str),
    FixtureUser,
    /// Sent as an empty string.
    Missing,
    Literal(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordSource {
    /// The configured default password.
    Default,
    FixtureUser,
    Literal(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderPayload {
    Ingredients(&'static [&'static str]),
    /// `{"ingredients": []}`.
    EmptyList,
    /// No request body at all.
    NoBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSpec {
    Register {
        email: EmailSource,
        password: PasswordSource,
        name: &'static str,
    },
    Login {
        email: EmailSource,
        password: PasswordSource,
    },
    UpdateUser {
        email: Option<EmailSource>,
        name: Option<&'static str>,
    },
    CreateOrder(OrderPayload),
    FetchOrders,
}

impl RequestSpec {
    fn uses_fixture_user(&self) -> bool {
        let email_uses = |source: &EmailSource| *source == EmailSource::FixtureUser;
        match self {
            RequestSpec::Register {
                email, password, ..
            }
            | RequestSpec::Login { email, password } => {
                email_uses(email) || *password == PasswordSource::FixtureUser
            }
            RequestSpec::UpdateUser { email, .. } => email.as_ref().is_some_and(email_uses),
            RequestSpec::CreateOrder(_) | RequestSpec::FetchOrders => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedStatus {
    Exact(u16),
    /// The service is known to answer `observed` where `correct` is the proper
    /// contract. Both are accepted; which one was seen is noted in the report.
    KnownQuirk {
        observed: u16,
        correct: u16,
        note: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    Equals(Value),
    /// Equal to the value the request carried at the given path.
    EchoesRequest(&'static str),
    Exists,
    NonEmpty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldExpectation {
    pub path: &'static str,
    pub expected: Expected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: &'static str,
    pub area: Area,
    pub fixture: FixtureNeed,
    pub auth: AuthMode,
    pub request: RequestSpec,
    pub expected_status: ExpectedStatus,
    pub expectations: Vec<FieldExpectation>,
}

impl Scenario {
    /// Starts a scenario expecting 200. The fixture user is requested
    /// automatically when the request refers to it.
    pub fn new(name: &'static str, area: Area, request: RequestSpec) -> Self {
        let fixture = if request.uses_fixture_user() {
            FixtureNeed::AuthenticatedUser
        } else {
            FixtureNeed::None
        };

        Self {
            name,
            area,
            fixture,
            auth: AuthMode::Anonymous,
            request,
            expected_status: ExpectedStatus::Exact(200),
            expectations: Vec::new(),
        }
    }

    /// Sends the fixture user's token, which also requires the fixture.
    pub fn authorized(mut self) -> Self {
        self.auth = AuthMode::FixtureToken;
        self.fixture = FixtureNeed::AuthenticatedUser;
        self
    }

    /// Provisions a fixture user even though the request does not use it.
    pub fn with_fixture_user(mut self) -> Self {
        self.fixture = FixtureNeed::AuthenticatedUser;
        self
    }

    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = ExpectedStatus::Exact(status);
        self
    }

    pub fn expect_known_quirk(mut self, observed: u16, correct: u16, note: &'static str) -> Self {
        self.expected_status = ExpectedStatus::KnownQuirk {
            observed,
            correct,
            note,
        };
        self
    }

    pub fn expect(mut self, path: &'static str, expected: Expected) -> Self {
        self.expectations.push(FieldExpectation { path, expected });
        self
    }

    pub fn expect_eq(self, path: &'static str, value: impl Into<Value>) -> Self {
        self.expect(path, Expected::Equals(value.into()))
    }

    pub fn needs_fixture(&self) -> bool {
        self.fixture == FixtureNeed::AuthenticatedUser
    }
}
