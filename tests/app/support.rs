/*!
 * Shared helpers for App tests
 */

use ai_os_app::{App, Input, Output, SharedBuffer};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Mocked handle whose exit handler panics with `system exit <code>`
///
/// Returns the handle together with its stderr buffer.
pub fn new_app(environ: &[&str], args: &[&str]) -> (App, SharedBuffer) {
    let stderr = SharedBuffer::new();
    let app = App::builder()
        .arguments(args.iter().copied())
        .environment(environ.iter().copied())
        .stdin(Input::empty())
        .stdout(Output::buffer(SharedBuffer::new()))
        .stderr(Output::buffer(stderr.clone()))
        .exit_handler(|code| panic!("system exit {}", code))
        .build();
    (app, stderr)
}

pub fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}

/// Run `f`, which must panic, and return the panic message
pub fn expect_panic<F: FnOnce()>(f: F) -> String {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => panic!("expected a panic"),
        Err(payload) => panic_message(payload),
    }
}
