//! Unified logging
//!
//! `tracing` is the logging facade everywhere in the workspace. By default a
//! `tracing-subscriber` fmt subscriber is installed, filtered by `RUST_LOG`
//! (falling back to `info`). With the `ftlog` feature the asynchronous ftlog
//! backend is installed instead for `log`-crate records.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize logging once per process; later calls are no-ops
pub fn init_logging() {
    INIT.call_once(|| {
        #[cfg(feature = "ftlog")]
        init_ftlog();

        init_tracing();
    });
}

#[cfg(feature = "ftlog")]
fn init_ftlog() {
    let built = ftlog::builder()
        .max_log_level(ftlog::LevelFilter::Debug)
        .bounded(100_000, false)
        .utc()
        .try_init();

    match built {
        // The guard must outlive every log call
        Ok(guard) => std::mem::forget(guard),
        Err(e) => eprintln!("ftlog init failed: {e}"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Another subscriber may already be installed (tests, host application)
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .try_init();

    if installed.is_ok() {
        tracing::info!("📝 Initialized tracing logging");
    }
}

/// Log a latency measurement in μs or ms depending on magnitude
#[macro_export]
macro_rules! log_latency {
    ($operation:expr, $duration_micros:expr) => {{
        let micros: u64 = $duration_micros;
        if micros < 1000 {
            tracing::debug!("⚡ {} completed in {}μs", $operation, micros);
        } else {
            tracing::debug!("⚡ {} completed in {:.3}ms", $operation, micros as f64 / 1000.0);
        }
    }};
}

#[macro_export]
macro_rules! log_order {
    ($action:expr, $order_id:expr, $instrument:expr) => {
        tracing::info!("📋 ORDER {}: {} ({})", $action, $order_id, $instrument);
    };
}

#[macro_export]
macro_rules! log_error {
    ($operation:expr, $error:expr) => {
        tracing::error!("❌ {} failed: {}", $operation, $error);
    };
}
