/*!
 * Logger
 *
 * Fan-out logger with an asynchronous delivery queue.
 *
 * # Lifecycle
 *
 * Configuring → Running → Stopped. Sinks are registered while configuring,
 * `init()` starts one worker thread that owns them, and `shutdown()` closes
 * the queue, waits for the worker to drain it and shuts every sink down.
 * A stopped logger cannot be restarted.
 *
 * # Records
 *
 * Each record carries the caller's file base name and line (captured with
 * `#[track_caller]`) and a sequence number starting at 1, under the attribute
 * names configured in `LoggerConfig`.
 */

use super::{Attrs, Level, LoggerConfig, Record, Sink};
use crate::core::limits::LOGGER_THREAD_NAME;
use crate::core::{LogError, LogResult};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::panic::Location;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::JoinHandle;
use tracing::{debug, warn};

enum Lifecycle {
    Configuring(Vec<Box<dyn Sink>>),
    Running(JoinHandle<LogResult<()>>),
    Stopped,
}

pub struct Logger {
    config: LoggerConfig,
    seq: AtomicU64,
    initialized: AtomicBool,
    base_attrs: RwLock<Attrs>,
    sender: Mutex<Option<flume::Sender<Record>>>,
    lifecycle: Mutex<Lifecycle>,
}

macro_rules! level_methods {
    ($($level:expr => $name:ident, $name_with:ident;)+) => {
        $(
            #[doc = concat!("Log at `", stringify!($level), "`")]
            #[track_caller]
            pub fn $name(&self, message: impl Into<String>) -> LogResult<()> {
                self.log_at($level, Attrs::new(), message.into(), Location::caller())
            }

            #[doc = concat!("Log at `", stringify!($level), "` with extra attributes")]
            #[track_caller]
            pub fn $name_with(&self, attrs: Attrs, message: impl Into<String>) -> LogResult<()> {
                self.log_at($level, attrs, message.into(), Location::caller())
            }
        )+
    };
}

impl Logger {
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            config,
            seq: AtomicU64::new(0),
            initialized: AtomicBool::new(false),
            base_attrs: RwLock::new(Attrs::new()),
            sender: Mutex::new(None),
            lifecycle: Mutex::new(Lifecycle::Configuring(Vec::new())),
        }
    }

    /// Register a sink. Only allowed before `init()`.
    pub fn add_sink(&self, sink: Box<dyn Sink>) -> LogResult<()> {
        match &mut *self.lifecycle.lock() {
            Lifecycle::Configuring(sinks) => {
                sinks.push(sink);
                Ok(())
            }
            Lifecycle::Running(_) => Err(LogError::AlreadyInitialized),
            Lifecycle::Stopped => Err(LogError::Closed),
        }
    }

    /// Attribute added to every record that does not set the key itself
    pub fn set_attr(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.base_attrs.write().insert(key, value);
    }

    /// Initialize every sink and start the delivery worker
    pub fn init(&self) -> LogResult<()> {
        let mut lifecycle = self.lifecycle.lock();
        let sinks = match &mut *lifecycle {
            Lifecycle::Configuring(sinks) => sinks,
            Lifecycle::Running(_) => return Err(LogError::AlreadyInitialized),
            Lifecycle::Stopped => return Err(LogError::Closed),
        };

        for index in 0..sinks.len() {
            if let Err(e) = sinks[index].init() {
                // Sinks already started are stopped again; the logger stays configuring.
                for started in sinks[..index].iter_mut() {
                    if let Err(shutdown_err) = started.shutdown() {
                        warn!(error = %shutdown_err, "log sink shutdown after failed init");
                    }
                }
                return Err(e);
            }
        }

        let sinks = std::mem::take(sinks);
        let sink_count = sinks.len();
        let (tx, rx) = flume::bounded(self.config.max_queue_size);
        let worker = std::thread::Builder::new()
            .name(LOGGER_THREAD_NAME.to_string())
            .spawn(move || deliver(rx, sinks))
            .map_err(|e| LogError::WorkerSpawn(e.to_string()))?;

        *self.sender.lock() = Some(tx);
        *lifecycle = Lifecycle::Running(worker);
        self.initialized.store(true, Ordering::SeqCst);

        debug!(sinks = sink_count, "logger initialized");
        Ok(())
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Drain queued records and shut every sink down
    ///
    /// Reports the first sink failure seen during the logger's lifetime,
    /// including write failures of records already delivered.
    pub fn shutdown(&self) -> LogResult<()> {
        let mut lifecycle = self.lifecycle.lock();
        let worker = match std::mem::replace(&mut *lifecycle, Lifecycle::Stopped) {
            Lifecycle::Running(worker) => worker,
            other => {
                *lifecycle = other;
                return Err(LogError::NotInitialized);
            }
        };

        self.initialized.store(false, Ordering::SeqCst);
        // Dropping the sender ends the worker loop once the queue is empty.
        // Taking it waits for any caller mid-send, so their records are delivered first.
        self.sender.lock().take();

        let result = worker.join().map_err(|_| LogError::WorkerPanicked)?;
        debug!(ok = result.is_ok(), "logger shut down");
        result
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: impl Into<String>) -> LogResult<()> {
        self.log_at(level, Attrs::new(), message.into(), Location::caller())
    }

    #[track_caller]
    pub fn log_with(
        &self,
        level: Level,
        attrs: Attrs,
        message: impl Into<String>,
    ) -> LogResult<()> {
        self.log_at(level, attrs, message.into(), Location::caller())
    }

    level_methods! {
        Level::Debug => debug, debug_with;
        Level::Info => info, info_with;
        Level::Warning => warn, warn_with;
        Level::Error => error, error_with;
        Level::Fatal => fatal, fatal_with;
    }

    fn log_at(
        &self,
        level: Level,
        mut attrs: Attrs,
        message: String,
        caller: &'static Location<'static>,
    ) -> LogResult<()> {
        // Sequence numbers are assigned and enqueued under the sender lock, so
        // records reach the sinks in `seq` order even with concurrent producers.
        let guard = self.sender.lock();
        let sender = guard.as_ref().ok_or(LogError::NotInitialized)?;

        if level < self.config.min_level {
            return Ok(());
        }

        if let Some(name) = &self.config.filename_attr {
            attrs.insert(name.clone(), file_base_name(caller.file()));
        }
        if let Some(name) = &self.config.line_number_attr {
            attrs.insert(name.clone(), caller.line());
        }
        if let Some(name) = &self.config.sequence_attr {
            attrs.insert(name.clone(), self.seq.fetch_add(1, Ordering::SeqCst) + 1);
        }
        attrs.merge_missing(&self.base_attrs.read());

        sender
            .send(Record::new(level, message, attrs))
            .map_err(|_| LogError::Closed)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.is_initialized() {
            if let Err(e) = self.shutdown() {
                warn!(error = %e, "logger dropped while running; shutdown failed");
            }
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("initialized", &self.is_initialized())
            .field("seq", &self.seq.load(Ordering::Relaxed))
            .finish()
    }
}

fn file_base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// Worker loop: deliver until every sender is gone, then shut sinks down
fn deliver(rx: flume::Receiver<Record>, mut sinks: Vec<Box<dyn Sink>>) -> LogResult<()> {
    let mut first_error = None;

    for record in rx.iter() {
        for sink in sinks.iter_mut() {
            if let Err(e) = sink.write(&record) {
                warn!(error = %e, "log sink write failed");
                first_error.get_or_insert(e);
            }
        }
    }

    for sink in sinks.iter_mut() {
        if let Err(e) = sink.shutdown() {
            first_error.get_or_insert(e);
        }
    }

    first_error.map_or(Ok(()), Err)
}
