/*!
 * Input Handle
 */

use parking_lot::Mutex;
use std::io::{self, Cursor, Read};
use std::sync::Arc;

/// Readable stream handle (fd0)
///
/// Clones share the underlying reader, so bytes consumed through one clone are
/// gone for all of them.
#[derive(Clone)]
pub struct Input {
    kind: InputKind,
}

#[derive(Clone)]
enum InputKind {
    Stdin,
    Buffer(Arc<Mutex<Cursor<Vec<u8>>>>),
    Reader(Arc<Mutex<Box<dyn Read + Send>>>),
}

impl Input {
    /// The real process standard input
    pub fn stdin() -> Self {
        Self {
            kind: InputKind::Stdin,
        }
    }

    /// An input that is immediately at end-of-file
    pub fn empty() -> Self {
        Self::from_bytes(Vec::new())
    }

    /// An input that yields the given bytes, then end-of-file
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: InputKind::Buffer(Arc::new(Mutex::new(Cursor::new(bytes.into())))),
        }
    }

    pub fn from_reader<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self {
            kind: InputKind::Reader(Arc::new(Mutex::new(Box::new(reader)))),
        }
    }

    /// Whether this handle is bound to the real process standard input
    #[inline]
    pub fn is_stdin(&self) -> bool {
        matches!(self.kind, InputKind::Stdin)
    }
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &self.kind {
            InputKind::Stdin => io::stdin().read(buf),
            InputKind::Buffer(cursor) => cursor.lock().read(buf),
            InputKind::Reader(reader) => reader.lock().read(buf),
        }
    }
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            InputKind::Stdin => "stdin",
            InputKind::Buffer(_) => "buffer",
            InputKind::Reader(_) => "reader",
        };
        f.debug_tuple("Input").field(&kind).finish()
    }
}
