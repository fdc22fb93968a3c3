use stellar_burgers_contract::runner::{RunReport, Verdict};

/// Fails with every non-passing outcome listed, which keeps test output readable.
pub fn assert_all_passed(report: &RunReport) {
    let failed: Vec<String> = report
        .outcomes
        .iter()
        .filter(|outcome| outcome.verdict != Verdict::Passed)
        .map(|outcome| format!("{outcome:#?}"))
        .collect();

    assert!(
        failed.is_empty() && report.aborted.is_none(),
        "aborted: {:?}\n{}",
        report.aborted,
        failed.join("\n")
    );
}

pub fn verdict_of(report: &RunReport, name: &str) -> Verdict {
    report
        .outcome(name)
        .unwrap_or_else(|| panic!("no outcome for {name}"))
        .verdict
}
