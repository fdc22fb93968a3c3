use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{filter::LevelFilter, prelude::*};

/// Installs the global subscriber: bunyan JSON lines on stdout through a
/// non-blocking writer. Only warnings and errors are
/// written unless `verbose`.
///
/// The returned guard flushes pending lines on drop, so keep it alive until
/// the run ends.
pub fn init_tracing(verbose: bool) -> anyhow::Result<WorkerGuard> {
    LogTracer::init()?;
    let app_name = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")).to_string();
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let bunyan_formatting_layer = BunyanFormattingLayer::new(app_name, non_blocking_writer);

    let level = if verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::registry()
        .with(level)
        .with(JsonStorageLayer)
        .with(bunyan_formatting_layer)
        .try_init()?;

    Ok(guard)
}
