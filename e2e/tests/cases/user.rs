use crate::tools::fixtures::e2e::*;
use crate::tools::runner::run_e2e_scenarios;
use rstest::rstest;

#[rstest]
#[case::email_with_authorization("update_email_with_authorization")]
#[case::name_with_authorization("update_name_with_authorization")]
#[case::email_without_authorization("update_email_without_authorization")]
#[case::name_without_authorization("update_name_without_authorization")]
#[tokio::test(flavor = "multi_thread")]
async fn e2e_test_user_update(e2e_fixture: &E2EFixture, #[case] scenario: &str) {
    run_e2e_scenarios("User Update", scenario, e2e_fixture).await;
}
