//! Common helpers shared across facer crates.

/// Overlay and telemetry settings persisted as JSON.
pub mod config;
/// 2D point type shared by detector and display space.
pub mod point;
/// Instrumentation helpers for optional performance tracing.
pub mod telemetry;

use std::path::Path;

use anyhow::Result;
use log::LevelFilter;

pub use config::{AppSettings, OverlaySettings, OverlayVariant, TelemetrySettings};
pub use point::Point;
pub use telemetry::{
    TELEMETRY_TARGET, TimingGuard, configure as configure_telemetry, telemetry_allows,
    telemetry_enabled, telemetry_level, timing_guard,
};

/// Initialize logging once for the CLI and embedding applications.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies. Telemetry
/// records are always let through so [`configure_telemetry`] alone decides
/// whether they appear.
pub fn init_logging(default_filter: LevelFilter) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter.as_str()),
    );
    builder.filter_module(TELEMETRY_TARGET, LevelFilter::Trace);

    // A second call (tests, embedding hosts) keeps the first logger.
    let _ = builder.try_init();
    Ok(())
}

/// Validate that a path exists and resolve it to an absolute path.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> Result<std::path::PathBuf> {
    let path = path.as_ref();
    anyhow::ensure!(path.exists(), "path does not exist: {}", path.display());
    Ok(path.canonicalize()?)
}
