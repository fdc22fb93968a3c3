use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct RunnerConfig {
    /// Restricts the run to one area (`auth`, `user`, `orders`) or to the
    /// scenarios whose name contains this text.
    #[serde(default)]
    pub scenario_filter: Option<String>,
}
