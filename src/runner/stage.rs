use serde::Serialize;

/// Lifecycle of one scenario execution.
///
/// `Failed` can be entered from any stage. After it only `FixtureTeardown`
/// and `Done` are accepted, so teardown always runs before a scenario ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScenarioStage {
    Init,
    FixtureSetup,
    RequestSent,
    Asserted,
    FixtureTeardown,
    Done,
    Failed,
}

#[derive(Debug, Clone)]
pub struct StageTracker {
    stages: Vec<ScenarioStage>,
}

impl Default for StageTracker {
    fn default() -> Self {
        Self {
            stages: vec![ScenarioStage::Init],
        }
    }
}

impl StageTracker {
    pub fn current(&self) -> ScenarioStage {
        self.stages
            .last()
            .copied()
            .unwrap_or(ScenarioStage::Init)
    }

    pub fn has_failed(&self) -> bool {
        self.stages.contains(&ScenarioStage::Failed)
    }

    /// Moves forward. Ignored once failed unless the target is teardown or done.
    pub fn advance(&mut self, stage: ScenarioStage) {
        if self.current() == stage {
            return;
        }
        if self.has_failed()
            && !matches!(
                stage,
                ScenarioStage::FixtureTeardown | ScenarioStage::Done
            )
        {
            return;
        }
        self.stages.push(stage);
    }

    pub fn fail(&mut self) {
        if !self.has_failed() {
            self.stages.push(ScenarioStage::Failed);
        }
    }

    pub fn into_stages(self) -> Vec<ScenarioStage> {
        self.stages
    }
}
