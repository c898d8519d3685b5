/*!
 * Logging
 *
 * Leveled logger with pluggable sinks, templated console output and an
 * asynchronous delivery queue. The `App` owns at most one logger at a time
 * and tears it down on exit.
 */

mod attrs;
mod config;
mod console;
mod level;
mod logger;
mod record;
mod sink;
mod template;

pub use attrs::Attrs;
pub use config::LoggerConfig;
pub use console::ConsoleSink;
pub use level::Level;
pub use logger::Logger;
pub use record::Record;
pub use sink::Sink;
pub use template::Template;
