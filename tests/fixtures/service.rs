use common::test_tools::http::fake_service::FakeStellarBurgers;
use rstest::fixture;
use std::time::Duration;
use stellar_burgers_contract::config::HarnessConfig;

/// Per-call timeout used by tests that expect a slow service to time out.
pub const SHORT_TIMEOUT_SECS: u64 = 1;

pub struct ServiceFixture {
    pub service: FakeStellarBurgers,
    pub config: HarnessConfig,
}

impl ServiceFixture {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency;
        self
    }

    /// Every account the service registered was deleted again.
    pub fn leaked_accounts(&self) -> i64 {
        self.service.registered_users() as i64 - self.service.deleted_users() as i64
    }
}

#[fixture]
pub async fn service_fixture() -> ServiceFixture {
    let service = FakeStellarBurgers::start().await;
    let config = HarnessConfig::new(service.base_url());
    ServiceFixture { service, config }
}

#[fixture]
pub async fn slow_service_fixture() -> ServiceFixture {
    let service =
        FakeStellarBurgers::start_with_delay(Duration::from_secs(SHORT_TIMEOUT_SECS + 2)).await;
    let mut config = HarnessConfig::new(service.base_url());
    config.request_timeout_secs = SHORT_TIMEOUT_SECS;
    ServiceFixture { service, config }
}
