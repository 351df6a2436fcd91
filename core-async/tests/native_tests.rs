//! Integration tests for core-async on the tokio runtime.
//!
//! Timer-driven cases run with a paused clock so they are deterministic.

use core_async::{sync, task, time, Debouncer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_task_spawn() {
    let handle = task::spawn(async { 42 });
    assert_eq!(handle.await.unwrap(), 42);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_success_and_failure() {
    let ok = time::timeout(time::Duration::from_millis(100), async {
        time::sleep(time::Duration::from_millis(10)).await;
        42
    })
    .await;
    assert_eq!(ok.unwrap(), 42);

    let late = time::timeout(time::Duration::from_millis(10), async {
        time::sleep(time::Duration::from_millis(100)).await;
        42
    })
    .await;
    assert!(late.is_err());
}

#[tokio::test]
async fn test_watch_channel_keeps_latest_value() {
    let (tx, mut rx) = sync::watch::channel(0);

    task::spawn(async move {
        for i in 1..=5 {
            tx.send_replace(i);
            task::yield_now().await;
        }
    });

    let mut last_value = 0;
    while rx.changed().await.is_ok() {
        last_value = *rx.borrow_and_update();
        if last_value >= 5 {
            break;
        }
    }

    assert_eq!(last_value, 5);
}

#[tokio::test]
async fn test_broadcast_channel_has_no_replay() {
    let (tx, mut early) = sync::broadcast::channel(8);
    tx.send(1).unwrap();

    let mut late = tx.subscribe();
    tx.send(2).unwrap();

    assert_eq!(early.recv().await.unwrap(), 1);
    assert_eq!(early.recv().await.unwrap(), 2);
    assert_eq!(late.recv().await.unwrap(), 2);
}

#[tokio::test]
async fn test_cancellation_token_wakes_waiters() {
    let token = sync::CancellationToken::new();
    let child = token.child_token();

    let handle = task::spawn(async move {
        child.cancelled().await;
        "cancelled"
    });

    token.cancel();
    assert_eq!(handle.await.unwrap(), "cancelled");
}

#[tokio::test(start_paused = true)]
async fn test_debouncer_runs_only_latest() {
    let fired = Arc::new(AtomicUsize::new(0));
    let mut debouncer = Debouncer::new(time::Duration::from_millis(500));

    for value in 1..=3 {
        let fired = Arc::clone(&fired);
        debouncer.schedule(async move {
            fired.store(value, Ordering::SeqCst);
        });
        time::sleep(time::Duration::from_millis(100)).await;
    }

    assert_eq!(fired.load(Ordering::SeqCst), 0);

    time::sleep(time::Duration::from_millis(500)).await;
    task::yield_now().await;
    assert_eq!(fired.load(Ordering::SeqCst), 3);
    assert!(!debouncer.is_pending());
}

#[test]
fn test_block_on_outside_runtime() {
    assert!(!core_async::runtime::in_runtime());
    let value = core_async::runtime::block_on(async { 7 }).unwrap();
    assert_eq!(value, 7);
}
