use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use common::config::ConfigLoader;

use stellar_burgers_contract::config::HarnessConfig;
use stellar_burgers_contract::runner::Runner;
use stellar_burgers_contract::scenarios::catalog::{default_catalog, select};
use stellar_burgers_contract::telemetry::init_tracing;

use crate::config::RunnerConfig;

mod config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = HarnessConfig::load().context("loading harness configuration")?;
    let runner_config: RunnerConfig =
        ConfigLoader::load_default().context("loading runner configuration")?;
    let _guard = init_tracing(config.verbose)?;

    let scenarios = select(default_catalog(), runner_config.scenario_filter.as_deref());
    if scenarios.is_empty() {
        bail!(
            "no scenario matches filter {:?}",
            runner_config.scenario_filter.unwrap_or_default()
        );
    }

    let runner = Arc::new(Runner::from_config(&config)?);
    let report = runner.run(scenarios).await;
    report.log();

    let summary = report.summary();
    println!(
        "{} scenarios: {} passed, {} failed, {} skipped",
        summary.total, summary.passed, summary.failed, summary.skipped
    );

    if report.is_success() {
        Ok(())
    } else {
        Err(anyhow!(
            "contract run failed{}",
            report
                .aborted
                .as_deref()
                .map(|reason| format!(" (aborted: {reason})"))
                .unwrap_or_default()
        ))
    }
}
