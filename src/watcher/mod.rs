//! Watches a markdown source file so the CLI can re-render on save.
//!
//! Editors rarely write a file in place: many write a temporary file and
//! rename it over the original. The parent directory is watched and any
//! event naming the directory or the file counts as a change.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{Error, Result};

/// Debounced change notifications for one source file.
pub struct SourceWatcher {
    _watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    directory: PathBuf,
    path: PathBuf,
    file_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl SourceWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    /// Returns [`Error::Watch`] if the platform watcher cannot be created or
    /// the parent directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> Result<Self> {
        // Event paths arrive canonical; compare against canonical paths.
        let path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let file_name = path.file_name().map(std::ffi::OsStr::to_os_string);
        let directory = parent_directory(&path);
        let watch_error = |source| Error::Watch {
            path: path.clone(),
            source,
        };

        let (tx, events) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |event| {
            let _ = tx.send(event);
        })
        .map_err(watch_error)?;
        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(watch_error)?;
        tracing::debug!(path = %path.display(), "watching source file");

        Ok(Self {
            _watcher: watcher,
            events,
            directory,
            path,
            file_name,
            debounce,
            pending_since: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending events. Returns true once a change has been quiet for
    /// the debounce interval.
    pub fn poll_change(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            match event {
                Ok(event) if self.concerns_source(&event) => changed = true,
                Ok(event) => {
                    crate::perf::log_event("watcher.ignored", format!("{:?}", event.paths));
                }
                Err(err) => tracing::warn!(error = %err, "file watcher error"),
            }
        }

        if changed {
            self.pending_since = Some(Instant::now());
        }
        match self.pending_since {
            Some(since) if since.elapsed() >= self.debounce => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    /// Block until a debounced change arrives, polling every `interval`.
    /// Gives up after `timeout` when one is set.
    pub fn wait_for_change(&mut self, interval: Duration, timeout: Option<Duration>) -> bool {
        let deadline = timeout.map(|timeout| Instant::now() + timeout);
        loop {
            if self.poll_change() {
                return true;
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return false;
            }
            std::thread::sleep(interval);
        }
    }

    /// Read the current source text.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read.
    pub fn read(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn concerns_source(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.directory
                || path == &self.path
                || self
                    .file_name
                    .as_ref()
                    .is_some_and(|name| path.file_name() == Some(name.as_os_str()))
        })
    }
}

fn parent_directory(path: &Path) -> PathBuf {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
