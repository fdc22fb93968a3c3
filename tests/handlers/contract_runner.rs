use std::sync::Arc;

use rstest::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stellar_burgers_contract::config::HarnessConfig;
use stellar_burgers_contract::runner::{Runner, ScenarioStage, Verdict};
use stellar_burgers_contract::scenarios::catalog::{default_catalog, select};

use crate::fixtures::service::{service_fixture, slow_service_fixture, ServiceFixture};
use crate::helpers::report::{assert_all_passed, verdict_of};

#[rstest]
#[case::sequential(1)]
#[case::parallel(4)]
#[tokio::test(flavor = "multi_thread")]
async fn full_catalog_passes_without_leaking_accounts(
    #[future] service_fixture: ServiceFixture,
    #[case] concurrency: usize,
) {
    let fixture = service_fixture.await.with_concurrency(concurrency);
    let runner = Arc::new(Runner::from_config(&fixture.config).unwrap());

    let report = runner.run(default_catalog()).await;

    assert_all_passed(&report);
    assert_eq!(18, report.summary().passed);
    assert!(fixture.service.registered_users() > 0);
    assert_eq!(0, fixture.leaked_accounts());

    let quirk = report
        .outcome("create_order_with_malformed_ingredients")
        .unwrap();
    assert_eq!(Some(500), quirk.status);
    assert!(quirk.notes[0].starts_with("known quirk still present"));
}

#[rstest]
#[tokio::test]
async fn outcomes_keep_catalog_order(#[future] service_fixture: ServiceFixture) {
    let fixture = service_fixture.await.with_concurrency(8);
    let runner = Arc::new(Runner::from_config(&fixture.config).unwrap());
    let scenarios = select(default_catalog(), Some("orders"));
    let expected: Vec<&str> = scenarios.iter().map(|scenario| scenario.name).collect();

    let report = runner.run(scenarios).await;

    let names: Vec<&str> = report.outcomes.iter().map(|outcome| outcome.name).collect();
    assert_eq!(expected, names);
    assert_all_passed(&report);
}

#[rstest]
#[tokio::test]
async fn unreachable_service_aborts_the_run() {
    let config = HarnessConfig::new("http://127.0.0.1:1/api");
    let runner = Arc::new(Runner::from_config(&config).unwrap());

    let report = runner.run(default_catalog()).await;

    let summary = report.summary();
    assert!(report.aborted.is_some());
    assert!(!report.is_success());
    assert_eq!(1, summary.failed);
    assert_eq!(17, summary.skipped);
    assert!(report.outcomes[0].network_error.is_some());
    assert!(report.outcomes[1].notes[0].starts_with("run aborted"));
}

#[rstest]
#[tokio::test]
async fn timeout_fails_scenario_without_aborting(#[future] slow_service_fixture: ServiceFixture) {
    let fixture = slow_service_fixture.await;
    let runner = Arc::new(Runner::from_config(&fixture.config).unwrap());
    let scenarios = select(default_catalog(), Some("fetch_orders_without_authorization"));

    let report = runner.run(scenarios).await;

    let outcome = &report.outcomes[0];
    assert_eq!(Verdict::Failed, outcome.verdict);
    assert!(outcome
        .network_error
        .as_deref()
        .is_some_and(|error| error.contains("timed out")));
    assert!(report.aborted.is_none());
}

#[rstest]
#[tokio::test]
async fn rejected_teardown_is_reported_as_leak() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "accessToken": "Bearer leaked",
            "user": { "email": "x", "name": "y" },
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "orders": [] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/auth/user"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = HarnessConfig::new(format!("{}/api", server.uri()));
    let runner = Arc::new(Runner::from_config(&config).unwrap());
    let scenarios = select(default_catalog(), Some("fetch_orders_with_authorization"));

    let report = runner.run(scenarios).await;

    let outcome = &report.outcomes[0];
    assert_eq!(Verdict::Failed, verdict_of(&report, "fetch_orders_with_authorization"));
    assert!(outcome.assertion_failures.is_empty());
    assert_eq!(1, outcome.fixture_errors.len());
    assert_eq!(
        Some(&ScenarioStage::Done),
        outcome.stages.last(),
        "{:?}",
        outcome.stages
    );
}

#[rstest]
#[tokio::test]
async fn wrong_contract_reports_every_mismatch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let config = HarnessConfig::new(format!("{}/api", server.uri()));
    let runner = Arc::new(Runner::from_config(&config).unwrap());
    let scenarios = select(default_catalog(), Some("fetch_orders_without_authorization"));

    let report = runner.run(scenarios).await;

    let paths: Vec<&str> = report.outcomes[0]
        .assertion_failures
        .iter()
        .map(|failure| failure.path.as_str())
        .collect();
    assert_eq!(vec!["<status>", "success"], paths);
}

#[rstest]
#[tokio::test]
async fn invalid_config_is_rejected_before_any_call() {
    let mut config = HarnessConfig::new("not a url");
    config.concurrency = 0;

    assert!(Runner::from_config(&config).is_err());
}
