//! Unit tests for `WsManager` and the event relay.
//!
//! These exercise the connection manager directly, without performing any
//! HTTP upgrades.

use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::ws::Message;
use baba_api::notifications::EventRelay;
use baba_api::ws::WsManager;
use baba_events::{event_types, DomainEvent, EventBus};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: new manager starts with zero connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_manager_has_zero_connections() {
    let manager = WsManager::new();

    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: add() and remove() track connections per user
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_and_remove_track_per_user_counts() {
    let manager = WsManager::new();

    let _a = manager.add("conn-1".to_string(), 1).await;
    let _b = manager.add("conn-2".to_string(), 1).await;
    let _c = manager.add("conn-3".to_string(), 2).await;

    assert_eq!(manager.connection_count().await, 3);
    assert_eq!(manager.user_connection_count(1).await, 2);

    manager.remove("conn-1").await;
    manager.remove("nonexistent").await;

    assert_eq!(manager.connection_count().await, 2);
    assert_eq!(manager.user_connection_count(1).await, 1);
}

// ---------------------------------------------------------------------------
// Test: send_to_user() only reaches that user's connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_user_targets_one_user() {
    let manager = WsManager::new();

    let mut mine = manager.add("conn-1".to_string(), 7).await;
    let mut other = manager.add("conn-2".to_string(), 8).await;

    let sent = manager
        .send_to_user(7, Message::Text("hello".to_string().into()))
        .await;
    assert_eq!(sent, 1);

    match mine.try_recv() {
        Ok(Message::Text(text)) => assert_eq!(text.as_str(), "hello"),
        other => panic!("Expected text message, got: {other:?}"),
    }
    assert!(other.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: shutdown_all() sends Close and clears all connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();

    let mut rx1 = manager.add("conn-1".to_string(), 1).await;
    let mut rx2 = manager.add("conn-2".to_string(), 2).await;

    manager.shutdown_all().await;

    assert_eq!(manager.connection_count().await, 0);
    assert_matches!(rx1.try_recv(), Ok(Message::Close(_)));
    assert_matches!(rx2.try_recv(), Ok(Message::Close(_)));
}

// ---------------------------------------------------------------------------
// Test: the relay pushes serialized events to the event's user
// ---------------------------------------------------------------------------

#[tokio::test]
async fn relay_delivers_event_json_to_owner() {
    let manager = Arc::new(WsManager::new());
    let mut rx = manager.add("conn-1".to_string(), 5).await;
    let relay = EventRelay::new(Arc::clone(&manager));

    let event = DomainEvent::new(event_types::SPOONS_CHANGED, 5)
        .with_payload(json!({ "balance": 42 }));
    assert_eq!(relay.deliver(&event).await, 1);

    let Ok(Message::Text(text)) = rx.try_recv() else {
        panic!("Expected a text frame");
    };
    let json: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
    assert_eq!(json["event_type"], "spoons.changed");
    assert_eq!(json["payload"]["balance"], 42);
}

#[tokio::test]
async fn relay_skips_users_without_connections() {
    let manager = Arc::new(WsManager::new());
    let relay = EventRelay::new(manager);

    let event = DomainEvent::new(event_types::YARD_CHANGED, 99);
    assert_eq!(relay.deliver(&event).await, 0);
}

// ---------------------------------------------------------------------------
// Test: the relay stops once every bus sender is dropped
// ---------------------------------------------------------------------------

#[tokio::test]
async fn relay_run_forwards_until_bus_closes() {
    let manager = Arc::new(WsManager::new());
    let mut rx = manager.add("conn-1".to_string(), 3).await;

    let bus = EventBus::new(16);
    let handle = tokio::spawn(EventRelay::new(Arc::clone(&manager)).run(bus.subscribe()));

    bus.publish(DomainEvent::new(event_types::HISTORY_READ, 3));
    drop(bus);

    handle.await.unwrap();
    assert_matches!(rx.try_recv(), Ok(Message::Text(_)));
}
