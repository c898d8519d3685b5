/*!
 * Error Reporting Channel
 *
 * Single-shot channel carrying at most one application error from the
 * reporter to any number of observers. Every observer holds a receiver of the
 * same channel; whichever receives first gets the error, everyone after that
 * (including the first observer again) sees the channel closed.
 */

use std::fmt;

/// Sending half, owned by the `App`
pub(crate) struct ErrorChannel {
    tx: Option<flume::Sender<anyhow::Error>>,
    rx: flume::Receiver<anyhow::Error>,
}

impl ErrorChannel {
    pub(crate) fn new() -> Self {
        // Capacity 1: the single send never blocks.
        let (tx, rx) = flume::bounded(1);
        Self { tx: Some(tx), rx }
    }

    pub(crate) fn receiver(&self) -> ErrorReceiver {
        ErrorReceiver {
            rx: self.rx.clone(),
        }
    }

    /// Deliver the error and close the channel
    ///
    /// # Panics
    ///
    /// Panics if an error was already delivered: the channel is single-shot and
    /// a second report is a programming error.
    pub(crate) fn send_and_close(&mut self, err: anyhow::Error) {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => panic!("error channel already closed"),
        };

        // We hold `rx`, so the channel is never disconnected here, and the
        // buffer is empty because this is the only send.
        if tx.try_send(err).is_err() {
            unreachable!("error channel rejected its only value");
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.tx.is_none()
    }
}

/// Why `try_recv` produced no error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryRecvError {
    /// Nothing reported yet
    Empty,
    /// The single error was already reported and consumed
    Closed,
}

impl fmt::Display for TryRecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryRecvError::Empty => f.write_str("no error reported yet"),
            TryRecvError::Closed => f.write_str("error channel closed"),
        }
    }
}

impl std::error::Error for TryRecvError {}

/// Read-only view of an `App`'s error channel
#[derive(Clone)]
pub struct ErrorReceiver {
    rx: flume::Receiver<anyhow::Error>,
}

impl ErrorReceiver {
    /// Block until an error arrives (`Some`) or the channel closes (`None`)
    ///
    /// There is no built-in timeout; pair with a context or use
    /// `recv_async` under `tokio::time::timeout`.
    pub fn recv(&self) -> Option<anyhow::Error> {
        self.rx.recv().ok()
    }

    pub async fn recv_async(&self) -> Option<anyhow::Error> {
        self.rx.recv_async().await.ok()
    }

    pub fn try_recv(&self) -> Result<anyhow::Error, TryRecvError> {
        self.rx.try_recv().map_err(|e| match e {
            flume::TryRecvError::Empty => TryRecvError::Empty,
            flume::TryRecvError::Disconnected => TryRecvError::Closed,
        })
    }

    /// Whether both receivers observe the same underlying channel
    pub fn same_channel(&self, other: &ErrorReceiver) -> bool {
        self.rx.same_channel(&other.rx)
    }
}

impl fmt::Debug for ErrorReceiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorReceiver")
            .field("pending", &self.rx.len())
            .field("closed", &self.rx.is_disconnected())
            .finish()
    }
}
