//! Event bus to WebSocket relay.

use std::sync::Arc;

use axum::extract::ws::Message;
use baba_events::DomainEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Forwards domain events to their owner's live connections.
///
/// Delivery is best effort: a user with no open connection simply misses the
/// push and resynchronises by polling the yard and history endpoints.
pub struct EventRelay {
    ws_manager: Arc<WsManager>,
}

impl EventRelay {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the relay loop.
    ///
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](baba_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    self.deliver(&event).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event relay lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, event relay shutting down");
                    break;
                }
            }
        }
    }

    /// Serialize one event and hand it to the owner's connections.
    pub async fn deliver(&self, event: &DomainEvent) -> usize {
        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, event_type = %event.event_type, "Failed to serialize event");
                return 0;
            }
        };

        let delivered = self
            .ws_manager
            .send_to_user(event.user_id, Message::Text(json.into()))
            .await;

        tracing::trace!(
            user_id = event.user_id,
            event_type = %event.event_type,
            delivered,
            "Event relayed"
        );
        delivered
    }
}
