use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global tracing subscriber
///
/// With `log_dir`, output goes to a timestamped file in that directory
/// (created if missing); otherwise to stderr. Filtering follows `RUST_LOG`.
pub fn init_logger(log_dir: Option<&str>) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    match log_dir {
        Some(dir) => {
            if !Path::new(dir).exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create log directory '{}'", dir))?;
            }

            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            let log_file = format!("{}/url_editor_{}.log", dir, timestamp);
            let file = fs::File::create(&log_file)
                .with_context(|| format!("Failed to create log file '{}'", log_file))?;

            let subscriber = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        None => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    info!("Logger initialized");
    Ok(())
}
