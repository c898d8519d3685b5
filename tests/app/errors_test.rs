/*!
 * Error Channel Tests
 * Single-shot delivery to any number of observers
 */

use crate::support::{expect_panic, new_app};
use ai_os_app::{ErrorReceiver, TryRecvError};
use pretty_assertions::assert_eq;
use rand::Rng;
use std::io;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

#[test]
fn test_concurrent_first_callers_share_one_channel() {
    let (app, _stderr) = new_app(&[], &[]);
    let app = Arc::new(app);

    let n = rand::thread_rng().gen_range(2..10);
    let barrier = Arc::new(Barrier::new(n));

    let receivers: Vec<ErrorReceiver> = (0..n)
        .map(|_| {
            let app = app.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                app.errors()
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();

    for other in &receivers[1..] {
        assert!(receivers[0].same_channel(other));
    }
}

#[test]
fn test_handle_error_delivers_once_then_closes() {
    let (app, _stderr) = new_app(&[], &[]);
    let app = Arc::new(app);

    let reporter = {
        let app = app.clone();
        thread::spawn(move || {
            app.handle_error(io::Error::new(io::ErrorKind::NotFound, "test error"));
        })
    };
    reporter.join().unwrap();

    let received = app.errors().try_recv().expect("error should be pending");
    assert_eq!(received.to_string(), "test error");
    assert_eq!(
        received.downcast_ref::<io::Error>().map(io::Error::kind),
        Some(io::ErrorKind::NotFound)
    );

    assert_eq!(app.errors().try_recv().unwrap_err(), TryRecvError::Closed);
    assert!(app.errors().recv().is_none());

    let msg = expect_panic(|| {
        app.handle_error(anyhow::anyhow!("again"));
    });
    assert_eq!(msg, "error channel already closed");
}

#[test]
fn test_open_channel_reports_empty() {
    let (app, _stderr) = new_app(&[], &[]);
    assert_eq!(app.errors().try_recv().unwrap_err(), TryRecvError::Empty);
}

#[test]
fn test_exactly_one_observer_receives_the_error() {
    let (app, _stderr) = new_app(&[], &[]);
    let app = Arc::new(app);

    let observers: Vec<_> = (0..6)
        .map(|_| {
            let errors = app.errors();
            thread::spawn(move || errors.recv().map(|e| e.to_string()))
        })
        .collect();

    thread::sleep(Duration::from_millis(20));
    app.handle_error(anyhow::anyhow!("disk full"));

    let results: Vec<Option<String>> = observers.into_iter().map(|h| h.join().unwrap()).collect();
    let delivered: Vec<&String> = results.iter().flatten().collect();
    assert_eq!(delivered, vec!["disk full"]);
    assert_eq!(results.iter().filter(|r| r.is_none()).count(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_observer() {
    let (app, _stderr) = new_app(&[], &[]);
    let app = Arc::new(app);

    let observer = {
        let errors = app.errors();
        tokio::spawn(async move { errors.recv_async().await })
    };

    tokio::time::sleep(Duration::from_millis(10)).await;
    app.handle_error(anyhow::anyhow!("shutdown requested"));

    let err = tokio::time::timeout(Duration::from_secs(1), observer)
        .await
        .expect("observer should wake")
        .unwrap()
        .expect("error should be delivered");
    assert_eq!(err.to_string(), "shutdown requested");
    assert!(app.errors().recv_async().await.is_none());
}
