//! Medal Viz - Main Entry Point
//!
//! Usage: `medal-viz [CONFIG.toml]`

use std::path::PathBuf;

use medal_viz::app::run_app;
use medal_viz::helpers::get_or_create_data_dir;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Console logging plus a daily log file in the data directory. The guard
/// must live until exit so buffered lines are flushed.
fn init_logging() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match get_or_create_data_dir() {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "medal-viz.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();
    guard
}

fn main() -> anyhow::Result<()> {
    let _guard = init_logging();
    tracing::info!("Starting Medal Viz...");

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    run_app(config_path)
}
