/*!
 * Log Sinks
 */

use super::Record;
use crate::core::LogResult;

/// Destination for log records
///
/// A sink is driven by exactly one logger worker thread: `init` once, `write`
/// for every record in queue order, then `shutdown` once, which must flush
/// everything written so far.
#[cfg_attr(test, mockall::automock)]
pub trait Sink: Send {
    fn init(&mut self) -> LogResult<()> {
        Ok(())
    }

    fn write(&mut self, record: &Record) -> LogResult<()>;

    fn shutdown(&mut self) -> LogResult<()>;
}
