/*!
 * Exit Orchestration Tests
 * Logger teardown ordering and exit handler contract
 */

use crate::support::{expect_panic, new_app};
use ai_os_app::{App, Output};
use pretty_assertions::assert_eq;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

#[test]
fn test_exit_without_logger_calls_handler() {
    let (app, stderr) = new_app(&[], &[]);

    let msg = expect_panic(|| {
        app.exit(255);
    });

    assert_eq!(msg, "system exit 255");
    assert!(stderr.is_empty());
}

#[test]
fn test_returning_exit_handler_is_a_contract_violation() {
    let seen = Arc::new(AtomicI32::new(-1));
    let app = {
        let seen = seen.clone();
        App::builder()
            .exit_handler(move |code| seen.store(code, Ordering::SeqCst))
            .build()
    };

    let msg = expect_panic(|| {
        app.exit(255);
    });

    assert_eq!(msg, "exit handler returned");
    assert_eq!(seen.load(Ordering::SeqCst), 255);
}

#[test]
fn test_exit_shuts_logger_down_first() {
    let (app, stderr) = new_app(&[], &[]);

    let logger = app.logger();
    let (line, result) = (line!(), logger.warn("test"));
    result.unwrap();

    let msg = expect_panic(|| {
        app.exit(255);
    });

    assert_eq!(msg, "system exit 255");
    assert!(!logger.is_initialized());
    assert!(!app.has_logger());
    assert_eq!(
        stderr.to_string_lossy(),
        format!(
            "[\x1b[33mWARN\x1b[0m] test {{\"filename\":\"exit_test.rs\",\"lineno\":{},\"seq\":1}}\n",
            line
        )
    );
}

#[test]
fn test_exit_starts_a_new_logger_epoch() {
    let (app, stderr) = new_app(&[], &[]);

    let first = app.logger();
    first.info("before").unwrap();
    expect_panic(|| {
        app.exit(1);
    });

    let second = app.logger();
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(second.is_initialized());

    second.info("after").unwrap();
    second.shutdown().unwrap();

    let output = stderr.to_string_lossy();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    // sequence numbers restart with the new logger
    assert!(lines[0].contains("before") && lines[0].ends_with("\"seq\":1}"));
    assert!(lines[1].contains("after") && lines[1].ends_with("\"seq\":1}"));
}

#[test]
fn test_exit_skips_shutdown_of_already_stopped_logger() {
    let (app, _stderr) = new_app(&[], &[]);

    let logger = app.logger();
    logger.shutdown().unwrap();

    let msg = expect_panic(|| {
        app.exit(3);
    });
    assert_eq!(msg, "system exit 3");
    assert!(!app.has_logger());
}

struct UnflushableWriter;

impl io::Write for UnflushableWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
    }
}

#[test]
fn test_logger_shutdown_failure_aborts_exit() {
    let handler_called = Arc::new(AtomicBool::new(false));
    let app = {
        let handler_called = handler_called.clone();
        App::builder()
            .stderr(Output::from_writer(UnflushableWriter))
            .exit_handler(move |_| handler_called.store(true, Ordering::SeqCst))
            .build()
    };

    app.logger().info("never flushed").unwrap();

    let msg = expect_panic(|| {
        app.exit(0);
    });

    assert_eq!(
        msg,
        "failed to shut down logger: Sink shutdown failed: device unplugged"
    );
    assert!(!handler_called.load(Ordering::SeqCst));
}
