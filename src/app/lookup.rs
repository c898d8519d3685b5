/*!
 * Concurrent Environment Lookup
 *
 * Fan-out/fan-in search over `KEY=VALUE` entries:
 *
 * 1. A supervisor task spawns one worker per entry into a `JoinSet`.
 * 2. Each worker polls the context first and abandons its entry when the
 *    context is cancelled; otherwise it splits on the first `=` and sends the
 *    value on a match.
 * 3. The supervisor waits for every worker, then drops its sender, which
 *    closes the channel once the workers' clones are gone too.
 * 4. The caller performs exactly one receive: a value means found, a closed
 *    channel means not found.
 *
 * With duplicate keys, whichever matching worker sends first wins. The winner
 * is not deterministic.
 */

use crate::context::Context;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Value of `entry` when its key equals `key`. Entries without `=` never match.
#[inline]
pub(crate) fn match_entry<'a>(entry: &'a str, key: &str) -> Option<&'a str> {
    entry
        .split_once('=')
        .filter(|(name, _)| *name == key)
        .map(|(_, value)| value)
}

/// Search `environment` for `key` in parallel
///
/// Also returns `None` as soon as `ctx` is cancelled while waiting.
///
/// # Panics
///
/// Must be called from within a Tokio runtime.
pub(crate) async fn lookup(environment: Arc<[String]>, key: &str, ctx: Context) -> Option<String> {
    let key: Arc<str> = Arc::from(key);
    let (tx, mut rx) = mpsc::channel::<String>(1);

    let supervisor_ctx = ctx.clone();
    tokio::spawn(async move {
        let mut workers = JoinSet::new();

        for index in 0..environment.len() {
            let environment = environment.clone();
            let key = key.clone();
            let ctx = supervisor_ctx.clone();
            let tx = tx.clone();

            workers.spawn(async move {
                if ctx.is_cancelled() {
                    return;
                }
                if let Some(value) = match_entry(&environment[index], &key) {
                    // Fails only once the caller has stopped listening.
                    let _ = tx.send(value.to_owned()).await;
                }
            });
        }

        while workers.join_next().await.is_some() {}
        drop(tx);
    });

    tokio::select! {
        biased;
        value = rx.recv() => value,
        _ = ctx.cancelled() => None,
    }
}
