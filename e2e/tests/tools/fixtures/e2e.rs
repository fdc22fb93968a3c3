use crate::tools::config::Config;
use rstest::fixture;
use std::sync::Arc;
use stellar_burgers_contract::config::HarnessConfig;

pub struct E2EFixture {
    pub config: Arc<Config>,
    pub harness: HarnessConfig,
}

#[fixture]
#[once]
pub fn e2e_fixture() -> E2EFixture {
    let config = Config::load_test();
    let harness = config.harness_config();

    E2EFixture {
        config: Arc::new(config),
        harness,
    }
}
