use super::stage::ScenarioStage;
use crate::assertions::AssertionFailure;
use crate::scenarios::Area;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Passed,
    Failed,
    Skipped,
}

/// Result of one scenario. Assertion, network and fixture problems are kept
/// in separate fields so a leaked account is never hidden behind a body failure.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub area: Area,
    pub verdict: Verdict,
    pub status: Option<u16>,
    pub assertion_failures: Vec<AssertionFailure>,
    pub network_error: Option<String>,
    pub fixture_errors: Vec<String>,
    pub notes: Vec<String>,
    pub stages: Vec<ScenarioStage>,
    pub duration_ms: u64,
}

impl ScenarioOutcome {
    pub fn skipped(name: &'static str, area: Area, reason: impl Into<String>) -> Self {
        Self {
            name,
            area,
            verdict: Verdict::Skipped,
            status: None,
            assertion_failures: Vec::new(),
            network_error: None,
            fixture_errors: Vec::new(),
            notes: vec![reason.into()],
            stages: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Passed
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Set when the run stopped early because the service was unreachable.
    pub aborted: Option<String>,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    pub fn summary(&self) -> RunSummary {
        self.outcomes
            .iter()
            .fold(RunSummary::default(), |mut summary, outcome| {
                summary.total += 1;
                match outcome.verdict {
                    Verdict::Passed => summary.passed += 1,
                    Verdict::Failed => summary.failed += 1,
                    Verdict::Skipped => summary.skipped += 1,
                }
                summary
            })
    }

    /// Every scenario passed and the run was not aborted.
    pub fn is_success(&self) -> bool {
        self.aborted.is_none() && self.outcomes.iter().all(ScenarioOutcome::passed)
    }

    pub fn outcome(&self, name: &str) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|outcome| outcome.name == name)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.verdict == Verdict::Failed)
    }

    pub fn log(&self) {
        for outcome in self.failures() {
            tracing::error!(
                scenario = outcome.name,
                area = %outcome.area,
                status = ?outcome.status,
                assertion_failures = ?outcome.assertion_failures,
                network_error = ?outcome.network_error,
                fixture_errors = ?outcome.fixture_errors,
                "Scenario failed"
            );
        }
        for outcome in self.outcomes.iter().filter(|o| !o.notes.is_empty()) {
            tracing::warn!(scenario = outcome.name, notes = ?outcome.notes, "Scenario notes");
        }

        let summary = self.summary();
        let elapsed_ms = (self.finished_at - self.started_at).num_milliseconds();
        if self.is_success() {
            tracing::info!(?summary, elapsed_ms, "Contract run passed");
        } else {
            tracing::error!(?summary, aborted = ?self.aborted, elapsed_ms, "Contract run failed");
        }
    }
}
