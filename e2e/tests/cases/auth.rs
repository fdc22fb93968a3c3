use crate::tools::fixtures::e2e::*;
use crate::tools::runner::run_e2e_scenarios;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn e2e_test_auth_contract(e2e_fixture: &E2EFixture) {
    run_e2e_scenarios("Auth Contract", "auth", e2e_fixture).await;
}
