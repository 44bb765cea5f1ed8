//! Yard engine.
//!
//! Composes repository calls into single-transaction units of work and
//! publishes the resulting events once the transaction has committed:
//!
//! - [`ledger`] -- spoon awards and debits, balance reconciliation.
//! - [`marketplace`] -- buying goodies into the inventory store.
//! - [`placement`] -- moving goodies between the inventory and the board.
//! - [`visits`] -- the visit simulator pass.

pub mod ledger;
pub mod marketplace;
pub mod placement;
pub mod visits;

use baba_core::types::DbId;
use baba_events::{event_types, DomainEvent, EventBus};
use serde_json::json;

/// Publish a balance change.
pub(crate) fn publish_balance(events: &EventBus, user_id: DbId, award: &ledger::Award) {
    events.publish(
        DomainEvent::new(event_types::SPOONS_CHANGED, user_id).with_payload(json!({
            "balance": award.balance,
            "amount": award.transaction.amount,
            "action": award.transaction.action_type,
        })),
    );
}

/// Publish a board change for one slot.
pub(crate) fn publish_yard_changed(events: &EventBus, user_id: DbId, slot_id: &str) {
    events.publish(
        DomainEvent::new(event_types::YARD_CHANGED, user_id)
            .with_payload(json!({ "slot_id": slot_id })),
    );
}

/// Publish an inventory change.
pub(crate) fn publish_inventory_changed(events: &EventBus, user_id: DbId) {
    events.publish(DomainEvent::new(event_types::INVENTORY_CHANGED, user_id));
}
