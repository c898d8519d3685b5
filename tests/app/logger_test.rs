/*!
 * Logger Lifecycle Tests
 */

use crate::support::new_app;
use ai_os_app::{Attrs, Level, Logger};
use pretty_assertions::assert_eq;
use rand::Rng;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_concurrent_first_callers_share_one_logger() {
    let (app, _stderr) = new_app(&[], &[]);
    let app = Arc::new(app);

    let n = rand::thread_rng().gen_range(2..10);
    let barrier = Arc::new(Barrier::new(n));

    let handles: Vec<_> = (0..n)
        .map(|_| {
            let app = app.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                app.logger()
            })
        })
        .collect();

    let loggers: Vec<Arc<Logger>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let first = &loggers[0];
    for other in &loggers[1..] {
        assert!(Arc::ptr_eq(first, other));
    }

    first.shutdown().unwrap();
}

#[test]
fn test_mock_stream_output_has_no_timestamp() {
    let (app, stderr) = new_app(&[], &[]);
    let logger = app.logger();

    logger.debug("one").unwrap();
    logger.info_with(Attrs::new().with("user", "ada"), "two").unwrap();
    logger.log(Level::Error, "three").unwrap();
    logger.shutdown().unwrap();

    let output = stderr.to_string_lossy();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("[\x1b[36mDEBUG\x1b[0m] one {\"filename\":\"logger_test.rs\""));
    assert!(lines[1].starts_with("[\x1b[32mINFO\x1b[0m] two {\"filename\":\"logger_test.rs\""));
    assert!(lines[1].ends_with(",\"seq\":2,\"user\":\"ada\"}"));
    assert!(lines[2].starts_with("[\x1b[31mERROR\x1b[0m] three "));
}

#[test]
fn test_logging_from_many_threads_keeps_lines_whole() {
    let (app, stderr) = new_app(&[], &[]);
    let app = Arc::new(app);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let app = app.clone();
            thread::spawn(move || {
                let logger = app.logger();
                for i in 0..25 {
                    logger.info(format!("worker {} message {}", t, i)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    app.logger().shutdown().unwrap();

    let output = stderr.to_string_lossy();
    assert_eq!(output.lines().count(), 200);
    for line in output.lines() {
        assert!(line.starts_with("[\x1b[32mINFO\x1b[0m] worker "));
        assert!(line.ends_with('}'));
    }
}
