use crate::tools::fixtures::e2e::E2EFixture;
use crate::tools::helper::{
    print_outcome, print_test_output_line_begins, print_test_output_line_ends, print_with_time,
};
use std::sync::Arc;
use stellar_burgers_contract::runner::Runner;
use stellar_burgers_contract::scenarios::catalog::{default_catalog, select};

/// Runs the catalog scenarios matching `filter` against the live service and
/// fails the test unless every one of them passed.
pub async fn run_e2e_scenarios(test_name: &str, filter: &str, fixture: &E2EFixture) {
    print_test_output_line_begins();
    print_with_time(format!(
        "[+] Starting Rust E2E {} on {} Environment, URL: {}",
        test_name, fixture.config.environment, fixture.config.env_url
    ));

    let scenarios = select(default_catalog(), Some(filter));
    assert!(!scenarios.is_empty(), "no scenario matches {filter}");

    let runner = Arc::new(Runner::from_config(&fixture.harness).expect("invalid e2e configuration"));
    let report = runner.run(scenarios).await;
    for outcome in &report.outcomes {
        print_outcome(outcome);
    }

    let summary = report.summary();
    print_with_time(format!(
        "[-] Finished Rust E2E {}: {} passed, {} failed, {} skipped",
        test_name, summary.passed, summary.failed, summary.skipped
    ));
    print_test_output_line_ends();

    assert!(
        report.is_success(),
        "{test_name} failed: {:#?}",
        report.failures().collect::<Vec<_>>()
    );
}
