//! HarnessError is the top-level failure of a scenario step or of building the
//! harness. Assertion mismatches are not errors at this level: they are
//! collected into the scenario report instead.

use crate::assertions::AssertionFailure;
use crate::fixtures::FixtureError;
use crate::http::NetworkError;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Load(#[from] envy::Error),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    #[error("assertion failed: {0}")]
    Assertion(#[from] AssertionFailure),
}

impl HarnessError {
    /// True when the service could not be reached at all, which ends the run.
    pub fn is_unreachable(&self) -> bool {
        match self {
            HarnessError::Network(e) => e.is_unreachable(),
            HarnessError::Fixture(e) => e.network_error().is_some_and(NetworkError::is_unreachable),
            _ => false,
        }
    }
}
