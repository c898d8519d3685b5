/*!
 * app-env - Main Entry Point
 *
 * Looks up each argument in the process environment and prints `KEY=VALUE`
 * for the ones that are set. Exits 1 if any key is missing or output fails,
 * 2 on a usage error or an interrupted run.
 */

use ai_os_app::{init_tracing, App, Attrs, LogResult};
use std::io::Write;

#[tokio::main]
async fn main() {
    init_tracing();

    let app = App::from_os();
    let logger = app.logger();

    // Ctrl+C cancels in-flight lookups
    {
        let ctx = app.context().clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                ctx.cancel();
            }
        });
    }

    if app.arguments().is_empty() {
        logged(logger.warn("usage: app-env KEY [KEY...]"));
        app.exit(2);
    }

    let mut stdout = app.stdout().clone();
    let mut missing = 0usize;

    for key in app.arguments() {
        match app.lookup_env(key).await {
            Some(value) => {
                if let Err(e) = writeln!(stdout, "{}={}", key, value) {
                    app.handle_error(e);
                    break;
                }
            }
            None if app.context().is_cancelled() => {
                logged(logger.error("interrupted"));
                app.exit(2);
            }
            None => {
                missing += 1;
                logged(logger.warn_with(Attrs::new().with("key", key.as_str()), "not set"));
            }
        }
    }

    if let Ok(err) = app.errors().try_recv() {
        logged(logger.error(format!("failed to write output: {}", err)));
        app.exit(1);
    }

    app.exit(if missing == 0 { 0 } else { 1 });
}

/// Fall back to tracing when the app logger rejects a record
fn logged(result: LogResult<()>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "app logger unavailable");
    }
}
