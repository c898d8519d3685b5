/*!
 * Cancellation Token
 *
 * A cloneable cancellation scope. Cancellation is cooperative: holders poll
 * `is_cancelled()` or await `cancelled()`; nothing in flight is interrupted.
 *
 * Derived contexts created with `child()` are cancelled together with their
 * parent, never the other way around.
 */

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::Notify;

/// Cancellable execution context
///
/// All clones share the same state; cancelling one makes every clone observe
/// `is_cancelled() == true`.
#[derive(Clone)]
pub struct Context {
    inner: Arc<Inner>,
}

struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
    children: Mutex<Vec<Weak<Inner>>>,
}

impl Inner {
    fn new(cancelled: bool) -> Self {
        Self {
            cancelled: AtomicBool::new(cancelled),
            notify: Notify::new(),
            children: Mutex::new(Vec::new()),
        }
    }

    fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        self.notify.notify_waiters();

        let children = std::mem::take(&mut *self.children.lock());
        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel();
        }
    }
}

impl Context {
    /// Create a root context that is not cancelled
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner::new(false)),
        }
    }

    /// Derive a context that is cancelled whenever this one is
    #[must_use]
    pub fn child(&self) -> Self {
        let mut children = self.inner.children.lock();

        // Checked under the lock so a concurrent cancel() either sees the new
        // child in the list or we see its flag.
        if self.is_cancelled() {
            return Self {
                inner: Arc::new(Inner::new(true)),
            };
        }

        let child = Arc::new(Inner::new(false));
        children.retain(|weak| weak.strong_count() > 0);
        children.push(Arc::downgrade(&child));
        Self { inner: child }
    }

    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// Non-blocking poll of the cancellation state
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the context is cancelled, immediately if it already is
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            // Register before checking the flag so a cancel() racing with us
            // cannot slip between the check and the await.
            notified.as_mut().enable();

            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
