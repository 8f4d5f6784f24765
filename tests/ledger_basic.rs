use std::sync::Arc;

use majordomo_bot::ledger::Ledger;
use serenity::model::id::UserId;

#[tokio::test]
async fn read_unknown_is_zero_and_creates_nothing() {
    let ledger = Ledger::new();
    assert_eq!(ledger.read(UserId::new(1)).await, 0);
    assert_eq!(ledger.accounts().await, 0);
    // Reading twice still creates nothing.
    assert_eq!(ledger.read(UserId::new(1)).await, 0);
    assert_eq!(ledger.accounts().await, 0);
}

#[tokio::test]
async fn increment_returns_the_new_balance() {
    let ledger = Ledger::new();
    assert_eq!(ledger.increment(UserId::new(1), 1).await, 1);
    assert_eq!(ledger.increment(UserId::new(1), 1).await, 2);
    assert_eq!(ledger.increment(UserId::new(1), 5).await, 7);
    assert_eq!(ledger.read(UserId::new(1)).await, 7);
    assert_eq!(ledger.accounts().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_same_user_increments_lose_nothing() {
    let ledger = Arc::new(Ledger::new());
    let mut handles = Vec::new();
    for _ in 0..16 {
        let ledger = ledger.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..50 {
                ledger.increment(UserId::new(7), 1).await;
            }
        }));
    }
    for handle in handles {
        handle.await.expect("increment task panicked");
    }
    assert_eq!(ledger.read(UserId::new(7)).await, 16 * 50);
}

#[tokio::test]
async fn top_orders_by_balance_then_id() {
    let ledger = Ledger::new();
    ledger.increment(UserId::new(3), 5).await;
    ledger.increment(UserId::new(1), 9).await;
    ledger.increment(UserId::new(2), 5).await;
    assert_eq!(ledger.top(10).await, vec![(1, 9), (2, 5), (3, 5)]);
    assert_eq!(ledger.top(1).await, vec![(1, 9)]);
}

#[tokio::test]
async fn snapshot_round_trips_through_disk() {
    let path = std::env::temp_dir().join(format!("majordomo-ledger-{}.json", std::process::id()));
    let ledger = Ledger::new();
    ledger.increment(UserId::new(10), 3).await;
    ledger.increment(UserId::new(11), 1).await;
    ledger.save_to(&path).await.expect("save failed");

    let restored = Ledger::load_from(&path).expect("load failed");
    assert_eq!(restored.read(UserId::new(10)).await, 3);
    assert_eq!(restored.read(UserId::new(11)).await, 1);
    assert_eq!(restored.accounts().await, 2);
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn missing_snapshot_file_yields_an_empty_ledger() {
    let path = std::env::temp_dir().join("majordomo-ledger-definitely-missing.json");
    let _ = std::fs::remove_file(&path);
    let ledger = Ledger::load_from(&path).expect("missing file should not error");
    assert_eq!(ledger.accounts().await, 0);
}

#[test]
fn corrupt_snapshot_file_is_an_error() {
    let path = std::env::temp_dir().join(format!("majordomo-ledger-bad-{}.json", std::process::id()));
    std::fs::write(&path, "{ not json").expect("write");
    assert!(Ledger::load_from(&path).is_err());
    let _ = std::fs::remove_file(&path);
}
