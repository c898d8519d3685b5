/*!
 * Process Handle
 *
 * Bundles arguments, environment, stdio, the execution context and the exit
 * hook of one process run, plus two lazily created resources:
 *
 * - the logger (guarded by its own lock, torn down by `exit`)
 * - the single-shot error channel (guarded by its own lock)
 *
 * Both are created on first access under their lock, so every concurrent
 * first caller receives the same instance.
 */

use super::error_channel::{ErrorChannel, ErrorReceiver};
use super::lookup;
use super::AppBuilder;
use crate::context::Context;
use crate::core::limits::{LOG_TEMPLATE, TIMESTAMP_PREFIX};
use crate::core::LogResult;
use crate::logging::{ConsoleSink, Logger, LoggerConfig, Template};
use crate::stdio::{Input, Output};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Replacement for `std::process::exit`; must not return
pub type ExitHandler = Arc<dyn Fn(i32) + Send + Sync>;

/// Core application handle. Build a mock with `App::builder()` or bind to the
/// real process with `App::from_os()`.
pub struct App {
    pub(super) id: Uuid,
    pub(super) arguments: Arc<[String]>,
    pub(super) environment: Arc<[String]>,
    pub(super) context: Context,
    pub(super) stdin: Input,
    pub(super) stdout: Output,
    pub(super) stderr: Output,
    pub(super) exit_handler: Option<ExitHandler>,

    pub(super) logger: Mutex<Option<Arc<Logger>>>,
    pub(super) errors: Mutex<Option<ErrorChannel>>,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Bind to the running process: argv without the program name, the
    /// process environment, real stdio, a fresh root context and
    /// `std::process::exit`.
    pub fn from_os() -> Self {
        AppBuilder::new()
            .arguments(
                std::env::args_os()
                    .skip(1)
                    .map(|arg| arg.to_string_lossy().into_owned()),
            )
            .environment(std::env::vars_os().map(|(key, value)| {
                format!("{}={}", key.to_string_lossy(), value.to_string_lossy())
            }))
            .stdin(Input::stdin())
            .stdout(Output::stdout())
            .stderr(Output::stderr())
            .exit_handler(|code| std::process::exit(code))
            .build()
    }

    /// Identifier used to correlate this handle's diagnostics
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// `KEY=VALUE` entries in their original order
    pub fn environment(&self) -> &[String] {
        &self.environment
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn stdin(&self) -> &Input {
        &self.stdin
    }

    pub fn stdout(&self) -> &Output {
        &self.stdout
    }

    pub fn stderr(&self) -> &Output {
        &self.stderr
    }

    // =========================================================================
    // Logger lifecycle
    // =========================================================================

    /// Shared logger writing to this handle's stderr, created on first call
    ///
    /// Records carry `filename`, `lineno` and `seq` attributes. A timestamp
    /// prefix is added only when stderr is the real process stream.
    ///
    /// # Panics
    ///
    /// Panics if the logger cannot be built. The template is fixed, so this
    /// indicates a defect rather than a runtime condition.
    pub fn logger(&self) -> Arc<Logger> {
        self.logger_or_init(&self.log_template())
    }

    /// Whether a logger exists in the current epoch
    pub fn has_logger(&self) -> bool {
        self.logger.lock().is_some()
    }

    fn log_template(&self) -> String {
        if self.stderr.is_stderr() {
            format!("{}{}", TIMESTAMP_PREFIX, LOG_TEMPLATE)
        } else {
            LOG_TEMPLATE.to_string()
        }
    }

    fn logger_or_init(&self, template: &str) -> Arc<Logger> {
        let mut slot = self.logger.lock();
        if let Some(logger) = slot.as_ref() {
            return logger.clone();
        }

        let logger = match console_logger(self.stderr.clone(), template) {
            Ok(logger) => Arc::new(logger),
            Err(e) => panic!("failed to build app logger: {}", e),
        };
        *slot = Some(logger.clone());

        debug!(app = %self.id, timestamped = self.stderr.is_stderr(), "logger created");
        logger
    }

    // =========================================================================
    // Exit
    // =========================================================================

    /// Shut the logger down, then hand control to the exit handler
    ///
    /// Without a handler the process exits via `std::process::exit`.
    ///
    /// # Panics
    ///
    /// - if the logger fails to shut down cleanly (log data would be lost)
    /// - if the exit handler returns
    pub fn exit(&self, code: i32) -> ! {
        {
            let mut slot = self.logger.lock();
            if let Some(logger) = slot.as_ref() {
                if logger.is_initialized() {
                    if let Err(e) = logger.shutdown() {
                        panic!("failed to shut down logger: {}", e);
                    }
                }
                *slot = None;
                debug!(app = %self.id, "logger torn down");
            }
        }

        info!(app = %self.id, code, "exiting");
        match &self.exit_handler {
            None => std::process::exit(code),
            Some(handler) => {
                handler(code);
                panic!("exit handler returned");
            }
        }
    }

    // =========================================================================
    // Error channel
    // =========================================================================

    /// Receiver for the single application error; created on first call
    pub fn errors(&self) -> ErrorReceiver {
        self.errors
            .lock()
            .get_or_insert_with(ErrorChannel::new)
            .receiver()
    }

    /// Deliver `err` to the error channel and close it
    ///
    /// # Panics
    ///
    /// Panics when called a second time on the same handle.
    pub fn handle_error<E>(&self, err: E)
    where
        E: Into<anyhow::Error>,
    {
        let err = err.into();
        let mut slot = self.errors.lock();
        let channel = slot.get_or_insert_with(ErrorChannel::new);
        if channel.is_closed() {
            warn!(app = %self.id, error = %err, "error reported after channel closed");
        } else {
            debug!(app = %self.id, error = %err, "error reported");
        }
        channel.send_and_close(err);
    }

    // =========================================================================
    // Environment
    // =========================================================================

    /// Value of `key` in this handle's environment, searched concurrently
    ///
    /// `None` when no entry matches or the context is cancelled before a match
    /// is found. With duplicate keys any one of the values may be returned.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn lookup_env(&self, key: &str) -> Option<String> {
        let value = lookup::lookup(self.environment.clone(), key, self.context.clone()).await;
        debug!(
            app = %self.id,
            key,
            entries = self.environment.len(),
            found = value.is_some(),
            "environment lookup"
        );
        value
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("id", &self.id)
            .field("arguments", &self.arguments)
            .field("environment_len", &self.environment.len())
            .field("context", &self.context)
            .field("stdin", &self.stdin)
            .field("stdout", &self.stdout)
            .field("stderr", &self.stderr)
            .field("has_exit_handler", &self.exit_handler.is_some())
            .field("has_logger", &self.has_logger())
            .finish()
    }
}

fn console_logger(stderr: Output, template: &str) -> LogResult<Logger> {
    let template = Template::parse(template)?;
    let logger = Logger::new(LoggerConfig::default());
    logger.add_sink(Box::new(ConsoleSink::new(stderr, template)))?;
    logger.init()?;
    Ok(logger)
}
