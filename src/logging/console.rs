/*!
 * Console Sink
 * Renders records through a template onto an output stream, one line each
 */

use super::{Record, Sink, Template};
use crate::core::{LogError, LogResult};
use crate::stdio::Output;
use std::io::Write;

pub struct ConsoleSink {
    writer: Output,
    template: Template,
    colorize: bool,
}

impl ConsoleSink {
    pub fn new(writer: Output, template: Template) -> Self {
        Self {
            writer,
            template,
            colorize: true,
        }
    }

    #[must_use]
    pub fn with_colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, record: &Record) -> LogResult<()> {
        let mut line = self.template.render(record, self.colorize)?;
        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn shutdown(&mut self) -> LogResult<()> {
        self.writer
            .flush()
            .map_err(|e| LogError::Shutdown(e.to_string()))
    }
}
