/*!
 * Logger Configuration
 */

use super::Level;
use crate::core::limits::{
    DEFAULT_MAX_QUEUE_SIZE, FILENAME_ATTR, LINE_NUMBER_ATTR, SEQUENCE_ATTR,
};

/// Logger settings
///
/// Attribute names set to `None` are left out of every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Attribute for the caller's file base name
    pub filename_attr: Option<String>,
    /// Attribute for the caller's line number
    pub line_number_attr: Option<String>,
    /// Attribute for the per-logger sequence number
    pub sequence_attr: Option<String>,
    /// Capacity of the record queue between callers and the worker
    pub max_queue_size: usize,
    /// Records below this level are dropped
    pub min_level: Level,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            filename_attr: Some(FILENAME_ATTR.to_string()),
            line_number_attr: Some(LINE_NUMBER_ATTR.to_string()),
            sequence_attr: Some(SEQUENCE_ATTR.to_string()),
            max_queue_size: DEFAULT_MAX_QUEUE_SIZE,
            min_level: Level::Debug,
        }
    }
}

impl LoggerConfig {
    /// No caller or sequence attributes
    #[inline]
    #[must_use]
    pub fn bare() -> Self {
        Self {
            filename_attr: None,
            line_number_attr: None,
            sequence_attr: None,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn with_filename_attr(mut self, name: impl Into<String>) -> Self {
        self.filename_attr = Some(name.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_line_number_attr(mut self, name: impl Into<String>) -> Self {
        self.line_number_attr = Some(name.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_sequence_attr(mut self, name: impl Into<String>) -> Self {
        self.sequence_attr = Some(name.into());
        self
    }

    /// A zero size is bumped to 1 so the queue always accepts a record
    #[inline]
    #[must_use]
    pub fn with_max_queue_size(mut self, size: usize) -> Self {
        self.max_queue_size = size.max(1);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }
}
