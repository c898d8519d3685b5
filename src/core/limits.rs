/*!
 * Limits and Constants
 *
 * Centralized location for the handle's fixed limits, templates and attribute names.
 */

// =============================================================================
// LOGGER LIMITS
// =============================================================================

/// Maximum number of records queued for the logger worker (10000)
/// Producers block once the queue is full until the worker catches up
pub const DEFAULT_MAX_QUEUE_SIZE: usize = 10_000;

/// Attribute carrying the base name of the file that emitted a record
pub const FILENAME_ATTR: &str = "filename";

/// Attribute carrying the source line that emitted a record
pub const LINE_NUMBER_ATTR: &str = "lineno";

/// Attribute carrying the per-logger sequence number
pub const SEQUENCE_ATTR: &str = "seq";

/// Name of the logger worker thread
pub const LOGGER_THREAD_NAME: &str = "app-logger";

// =============================================================================
// LOG FORMAT
// =============================================================================

/// Prefix prepended when writing to the real standard-error stream
pub const TIMESTAMP_PREFIX: &str = "{timestamp} ";

/// Console line layout: `[<colorized LEVEL>] <message>{ <json attrs>}`
pub const LOG_TEMPLATE: &str = "[{color}{level}{reset}] {message}{attrs}";

/// ANSI sequence restoring the default terminal color
pub const ANSI_RESET: &str = "\x1b[0m";
