/*!
 * Output Handle
 */

use super::SharedBuffer;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Writable stream handle (fd1/fd2)
///
/// Cheap to clone; the logger keeps its own clone of the handle's stderr.
#[derive(Clone)]
pub struct Output {
    kind: OutputKind,
}

#[derive(Clone)]
enum OutputKind {
    Stdout,
    Stderr,
    Buffer(SharedBuffer),
    Writer(Arc<Mutex<Box<dyn Write + Send>>>),
}

impl Output {
    /// The real process standard output
    pub fn stdout() -> Self {
        Self {
            kind: OutputKind::Stdout,
        }
    }

    /// The real process standard error
    pub fn stderr() -> Self {
        Self {
            kind: OutputKind::Stderr,
        }
    }

    pub fn buffer(buffer: SharedBuffer) -> Self {
        Self {
            kind: OutputKind::Buffer(buffer),
        }
    }

    /// An output that discards everything
    pub fn sink() -> Self {
        Self::from_writer(io::sink())
    }

    pub fn from_writer<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            kind: OutputKind::Writer(Arc::new(Mutex::new(Box::new(writer)))),
        }
    }

    /// Whether this handle is bound to the real process standard error
    ///
    /// The logger only stamps records with wall-clock time on the real stream,
    /// keeping output to mocked streams deterministic.
    #[inline]
    pub fn is_stderr(&self) -> bool {
        matches!(self.kind, OutputKind::Stderr)
    }

    #[inline]
    pub fn is_stdout(&self) -> bool {
        matches!(self.kind, OutputKind::Stdout)
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.kind {
            OutputKind::Stdout => io::stdout().write(buf),
            OutputKind::Stderr => io::stderr().write(buf),
            OutputKind::Buffer(buffer) => buffer.write(buf),
            OutputKind::Writer(writer) => writer.lock().write(buf),
        }
    }

    // Whole lines go out under one lock so concurrent writers never interleave
    // inside a record.
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match &mut self.kind {
            OutputKind::Stdout => io::stdout().lock().write_all(buf),
            OutputKind::Stderr => io::stderr().lock().write_all(buf),
            OutputKind::Buffer(buffer) => buffer.write_all(buf),
            OutputKind::Writer(writer) => writer.lock().write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.kind {
            OutputKind::Stdout => io::stdout().flush(),
            OutputKind::Stderr => io::stderr().flush(),
            OutputKind::Buffer(buffer) => buffer.flush(),
            OutputKind::Writer(writer) => writer.lock().flush(),
        }
    }
}

impl std::fmt::Debug for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            OutputKind::Stdout => "stdout",
            OutputKind::Stderr => "stderr",
            OutputKind::Buffer(_) => "buffer",
            OutputKind::Writer(_) => "writer",
        };
        f.debug_tuple("Output").field(&kind).finish()
    }
}
