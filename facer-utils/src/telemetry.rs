//! Scoped timing logs for the overlay pipeline.
//!
//! A [`TimingGuard`] measures how long a scope took and emits one log record
//! under the `facer::telemetry` target when it is dropped. Guards stay inert
//! unless telemetry was switched on through [`configure`] and the logger
//! accepts the requested level, so the draw loop pays only an `Instant::now`.

use std::{
    borrow::Cow,
    sync::atomic::{AtomicU8, Ordering},
    time::Instant,
};

use log::{Level, LevelFilter, log, log_enabled};

/// Log target used for every telemetry record.
pub const TELEMETRY_TARGET: &str = "facer::telemetry";

/// Highest level telemetry may emit at; `0` means telemetry is disabled.
static THRESHOLD: AtomicU8 = AtomicU8::new(0);

/// Logs the elapsed time of a scope when dropped.
pub struct TimingGuard {
    label: Cow<'static, str>,
    level: Level,
    start: Instant,
    active: bool,
}

impl TimingGuard {
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        log!(
            target: TELEMETRY_TARGET,
            self.level,
            "{} took {:.2?}",
            self.label,
            self.start.elapsed()
        );
    }
}

/// Guard that follows the global telemetry configuration.
pub fn timing_guard(label: impl Into<Cow<'static, str>>, level: Level) -> TimingGuard {
    TimingGuard {
        label: label.into(),
        level,
        start: Instant::now(),
        active: telemetry_allows(level) && log_enabled!(target: TELEMETRY_TARGET, level),
    }
}

/// Switch telemetry on or off and set its maximum level.
pub fn configure(enabled: bool, level: LevelFilter) {
    let threshold = if enabled { level as u8 } else { 0 };
    THRESHOLD.store(threshold, Ordering::Relaxed);
}

pub fn telemetry_enabled() -> bool {
    THRESHOLD.load(Ordering::Relaxed) > 0
}

/// Maximum level telemetry currently emits at (`Off` when disabled).
pub fn telemetry_level() -> LevelFilter {
    match THRESHOLD.load(Ordering::Relaxed) {
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        5 => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

/// Whether a guard at `level` would pass the telemetry threshold.
pub fn telemetry_allows(level: Level) -> bool {
    level <= telemetry_level()
}
