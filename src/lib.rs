/*!
 * AI-OS App Library
 * Process handle with mockable inputs, lazy logger, single-shot error
 * channel and concurrent environment lookup
 */

pub mod app;
pub mod context;
pub mod core;
pub mod logging;
pub mod monitoring;
pub mod stdio;

// Re-exports
pub use app::{App, AppBuilder, ErrorReceiver, ExitHandler, TryRecvError};
pub use context::Context;
pub use crate::core::{LogError, LogResult};
pub use logging::{Attrs, ConsoleSink, Level, Logger, LoggerConfig, Record, Sink, Template};
pub use monitoring::init_tracing;
pub use stdio::{Input, Output, SharedBuffer};
