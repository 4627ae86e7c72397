//! Timing and debug-log instrumentation for parse and render passes.
//!
//! Scopes report through `tracing` when timing is enabled. The render debug
//! log is a separate plain-text file that records timestamped events, such
//! as the outline of every rendered tree.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

const DEBUG_LOG_HEADER: &str = "marktree render debug log start";

static ENABLED: AtomicBool = AtomicBool::new(false);
static DEBUG_LOG: LazyLock<Mutex<DebugLog>> = LazyLock::new(|| Mutex::new(DebugLog::closed()));

/// Times the enclosing block. Reports on drop.
#[derive(Debug)]
#[must_use = "a scope reports when it is dropped"]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Scope {
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed().as_secs_f64() * 1000.0;
        if is_enabled() {
            tracing::info!(target: "marktree::perf", scope = self.name, elapsed_ms, "timing");
        }
        log_event(self.name, format!("{elapsed_ms:.3} ms"));
    }
}

#[derive(Debug)]
struct DebugLog {
    start: Instant,
    writer: Option<BufWriter<File>>,
}

impl DebugLog {
    fn closed() -> Self {
        Self {
            start: Instant::now(),
            writer: None,
        }
    }
}

fn debug_log() -> MutexGuard<'static, DebugLog> {
    DEBUG_LOG.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Turn scope timing on or off.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Start timing a named scope.
pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Open (truncating) or close the render debug log.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the header cannot be
/// written.
pub fn set_debug_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let mut log = debug_log();
    let Some(path) = path else {
        if let Some(mut writer) = log.writer.take() {
            writer.flush()?;
        }
        return Ok(());
    };

    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{DEBUG_LOG_HEADER}")?;
    writer.flush()?;
    log.start = Instant::now();
    log.writer = Some(writer);
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    debug_log().writer.is_some()
}

/// Append a timestamped event to the debug log, if one is open.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    let mut log = debug_log();
    let elapsed_ms = log.start.elapsed().as_secs_f64() * 1000.0;
    let Some(writer) = log.writer.as_mut() else {
        return;
    };
    let written = writeln!(writer, "[{elapsed_ms:>10.3} ms] {name}: {}", detail.as_ref())
        .and_then(|()| writer.flush());
    if let Err(err) = written {
        tracing::warn!(error = %err, "failed to write render debug log");
    }
}
