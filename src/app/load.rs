// Thermograph - app/load.rs
//
// Load lifecycle management. Runs fetch -> parse -> normalise on a
// background thread and sends progress messages to the UI thread via an
// mpsc channel.
//
// Architecture:
//   - `LoadManager` lives on the UI thread; `run_load` runs on a background thread.
//   - Starting a new load replaces the receiver, so a superseded load's
//     messages are never observed. Its thread exits on the next failed send.
//   - An `Arc<AtomicBool>` cancel flag is checked between phases. The HTTP
//     request itself is not interruptible and is bounded by the fetch timeout.
//   - `run_pipeline` runs the same `fetch_raw` and `finish` phases without
//     threads, for the headless `--summary` mode and tests.

use crate::core::model::{LoadOutcome, LoadProgress, RawTable};
use crate::core::source::ExportLocation;
use crate::core::{normalize, raw, source};
use crate::platform::fetch::{self, FetchOptions};
use crate::util::error::{DataSourceError, NormalizeError, ThermographError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Instant;

// =============================================================================
// Synchronous pipeline
// =============================================================================

/// Fetch, parse and normalise the export behind `link`. Blocks the caller.
pub fn run_pipeline(link: &str, options: &FetchOptions) -> Result<LoadOutcome, ThermographError> {
    let start = Instant::now();
    let location = source::resolve(link);
    tracing::info!(link, location = %location, "Loading export");

    let raw_table = fetch_raw(&location, options)?;
    Ok(finish(link, &location, &raw_table, start)?)
}

/// Fetch phase shared by both pipelines: read the export and parse it as CSV.
fn fetch_raw(location: &ExportLocation, options: &FetchOptions) -> Result<RawTable, DataSourceError> {
    let text = fetch::fetch_export(location, options)?;
    raw::parse_raw_table(&text, location.as_str())
}

/// Normalise phase shared by both pipelines.
fn finish(
    link: &str,
    location: &ExportLocation,
    raw_table: &RawTable,
    start: Instant,
) -> Result<LoadOutcome, NormalizeError> {
    let (table, report) = normalize::normalize(raw_table)?;
    let duration = start.elapsed();
    tracing::info!(
        rows = table.len(),
        sensors = table.sensors.len(),
        dropped = report.dropped_rows,
        ms = duration.as_millis() as u64,
        "Export loaded"
    );
    Ok(LoadOutcome {
        link: link.trim().to_string(),
        export_location: location.to_string(),
        table,
        report,
        duration,
    })
}

// =============================================================================
// LoadManager
// =============================================================================

/// Manages a load operation on a background thread.
pub struct LoadManager {
    /// Channel receiver for the UI to poll progress messages.
    progress_rx: Option<mpsc::Receiver<LoadProgress>>,

    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl LoadManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Start loading `link`. Any load already running is superseded.
    pub fn start_load(&mut self, link: String, options: FetchOptions) {
        self.cancel_load();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        std::thread::spawn(move || {
            run_load(link, options, tx, cancel);
        });

        tracing::debug!("Load thread spawned");
    }

    /// Abandon the running load. Its pending messages are discarded.
    pub fn cancel_load(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::SeqCst);
        }
        self.cancel_flag = None;
        self.progress_rx = None;
    }

    /// Whether a load thread is attached.
    pub fn is_active(&self) -> bool {
        self.progress_rx.is_some()
    }

    /// Poll for progress messages without blocking. Returns all pending messages.
    ///
    /// Detaches from the channel once a terminal message has been received.
    pub fn poll_progress(&mut self) -> Vec<LoadProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok(msg) = rx.try_recv() {
                messages.push(msg);
            }
        }
        if messages.iter().any(is_terminal) {
            self.progress_rx = None;
            self.cancel_flag = None;
        }
        messages
    }
}

impl Default for LoadManager {
    fn default() -> Self {
        Self::new()
    }
}

fn is_terminal(msg: &LoadProgress) -> bool {
    matches!(
        msg,
        LoadProgress::Completed(_)
            | LoadProgress::SourceFailed { .. }
            | LoadProgress::MissingTimestampColumn { .. }
    )
}

// =============================================================================
// Background load pipeline
// =============================================================================

/// Full load pipeline with progress reporting. Runs on a background thread.
fn run_load(
    link: String,
    options: FetchOptions,
    tx: mpsc::Sender<LoadProgress>,
    cancel: Arc<AtomicBool>,
) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                return; // Receiver dropped (superseded or UI closed).
            }
        };
    }

    macro_rules! check_cancel {
        () => {
            if cancel.load(Ordering::SeqCst) {
                tracing::debug!("Load cancelled");
                return;
            }
        };
    }

    let start = Instant::now();
    let location = source::resolve(&link);
    send!(LoadProgress::Fetching {
        location: location.to_string(),
    });

    let raw_table = match fetch_raw(&location, &options) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(error = %e, "Export could not be loaded");
            send!(LoadProgress::SourceFailed {
                error: e.to_string()
            });
            return;
        }
    };
    check_cancel!();
    send!(LoadProgress::Parsed {
        raw_rows: raw_table.len(),
        columns: raw_table.headers.len(),
    });

    match finish(&link, &location, &raw_table, start) {
        Ok(outcome) => {
            check_cancel!();
            send!(LoadProgress::Completed(Box::new(outcome)));
        }
        Err(NormalizeError::MissingTimestampColumn { columns }) => {
            tracing::warn!(?columns, "No timestamp column");
            send!(LoadProgress::MissingTimestampColumn { columns });
        }
    }
}
