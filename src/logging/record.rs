/*!
 * Log Record
 */

use super::{Attrs, Level};
use time::OffsetDateTime;

/// A single log event as handed to sinks
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp: OffsetDateTime,
    pub level: Level,
    pub message: String,
    pub attrs: Attrs,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>, attrs: Attrs) -> Self {
        Self {
            timestamp: OffsetDateTime::now_utc(),
            level,
            message: message.into(),
            attrs,
        }
    }
}
