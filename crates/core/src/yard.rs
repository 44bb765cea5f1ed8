//! Yard placement board: fixed slots and the rules for moving goodies
//! between the inventory store and the board.
//!
//! The board has one food slot and five toy slots. Every state transition
//! (place, replace, return) is decided here; the repository layer
//! only persists the resulting plan.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::ItemCategory;
use crate::error::CoreError;
use crate::rarity::Rarity;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// Which category of goodie a slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Food,
    Toy,
}

impl SlotKind {
    pub fn accepts(self, category: ItemCategory) -> bool {
        matches!(
            (self, category),
            (SlotKind::Food, ItemCategory::Food) | (SlotKind::Toy, ItemCategory::Toy)
        )
    }
}

/// A fixed position on the yard. Coordinates are percentages of the yard
/// image and only matter to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YardSlot {
    pub id: &'static str,
    pub kind: SlotKind,
    pub x: i32,
    pub y: i32,
}

pub const FOOD_SLOT_ID: &str = "food1";

pub const YARD_SLOTS: [YardSlot; 6] = [
    YardSlot {
        id: FOOD_SLOT_ID,
        kind: SlotKind::Food,
        x: 50,
        y: 72,
    },
    YardSlot {
        id: "toy1",
        kind: SlotKind::Toy,
        x: 18,
        y: 60,
    },
    YardSlot {
        id: "toy2",
        kind: SlotKind::Toy,
        x: 34,
        y: 48,
    },
    YardSlot {
        id: "toy3",
        kind: SlotKind::Toy,
        x: 66,
        y: 48,
    },
    YardSlot {
        id: "toy4",
        kind: SlotKind::Toy,
        x: 82,
        y: 60,
    },
    YardSlot {
        id: "toy5",
        kind: SlotKind::Toy,
        x: 50,
        y: 38,
    },
];

/// Look up a slot by id.
pub fn find_slot(slot_id: &str) -> Result<&'static YardSlot, CoreError> {
    YARD_SLOTS
        .iter()
        .find(|s| s.id == slot_id)
        .ok_or_else(|| CoreError::Validation(format!("Unknown yard slot '{slot_id}'")))
}

/// Ids of every slot of one kind, in board order.
pub fn slot_ids(kind: SlotKind) -> Vec<&'static str> {
    YARD_SLOTS
        .iter()
        .filter(|s| s.kind == kind)
        .map(|s| s.id)
        .collect()
}

/// Number of distinct toy slots among the given occupied slot ids.
pub fn occupied_toy_slots<'a>(slot_ids: impl IntoIterator<Item = &'a str>) -> usize {
    slot_ids
        .into_iter()
        .filter(|id| matches!(find_slot(id), Ok(slot) if slot.kind == SlotKind::Toy))
        .collect::<HashSet<_>>()
        .len()
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// What happens to an item when it leaves the board without being consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Removal {
    /// Toys and accessories go back to the inventory store.
    ReturnToInventory,
    /// Food is destroyed; partially eaten food is never restored.
    Discard,
}

pub fn removal_for(category: ItemCategory) -> Removal {
    match category {
        ItemCategory::Food => Removal::Discard,
        ItemCategory::Toy | ItemCategory::Accessory => Removal::ReturnToInventory,
    }
}

/// The decided outcome of a place request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPlan {
    pub slot: &'static YardSlot,
    /// Visit capacity for food placements, `None` for toys.
    pub max_visits: Option<i32>,
    /// Set when an existing occupant is being replaced.
    pub displaced: Option<Removal>,
}

/// Decide whether an inventory item may be placed into a slot.
///
/// `occupant` is the category of whatever currently sits in the slot.
/// Placing onto an occupied slot requires `replace = true`.
pub fn plan_placement(
    slot_id: &str,
    category: ItemCategory,
    rarity: Rarity,
    occupant: Option<ItemCategory>,
    replace: bool,
) -> Result<PlacementPlan, CoreError> {
    let slot = find_slot(slot_id)?;

    if !slot.kind.accepts(category) {
        return Err(CoreError::Validation(format!(
            "A {category} item cannot be placed in slot '{}'",
            slot.id
        )));
    }

    let displaced = match occupant {
        Some(_) if !replace => {
            return Err(CoreError::Conflict(format!(
                "Slot '{}' is occupied; confirm replacement to continue",
                slot.id
            )));
        }
        Some(existing) => Some(removal_for(existing)),
        None => None,
    };

    let max_visits = (slot.kind == SlotKind::Food).then(|| rarity.visit_capacity());

    Ok(PlacementPlan {
        slot,
        max_visits,
        displaced,
    })
}

/// Identity for a placement, unique even when the same food goodie is
/// placed repeatedly.
pub fn placement_key(goodie_id: DbId, placed_at: Timestamp) -> String {
    format!("{goodie_id}-{}", placed_at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn board_has_one_food_and_five_toy_slots() {
        let food = YARD_SLOTS.iter().filter(|s| s.kind == SlotKind::Food).count();
        let toys = YARD_SLOTS.iter().filter(|s| s.kind == SlotKind::Toy).count();
        assert_eq!((food, toys), (1, 5));
    }

    #[test]
    fn slot_ids_by_kind() {
        assert_eq!(slot_ids(SlotKind::Food), vec!["food1"]);
        assert_eq!(
            slot_ids(SlotKind::Toy),
            vec!["toy1", "toy2", "toy3", "toy4", "toy5"]
        );
    }

    #[test]
    fn unknown_slot_is_rejected() {
        assert_matches!(find_slot("toy9"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn food_into_food_slot_gets_capacity() {
        let plan = plan_placement("food1", ItemCategory::Food, Rarity::Rare, None, false).unwrap();
        assert_eq!(plan.slot.id, "food1");
        assert_eq!(plan.max_visits, Some(5));
        assert_eq!(plan.displaced, None);
    }

    #[test]
    fn toy_into_toy_slot_has_no_capacity() {
        let plan = plan_placement("toy3", ItemCategory::Toy, Rarity::Epic, None, false).unwrap();
        assert_eq!(plan.max_visits, None);
    }

    #[test]
    fn category_must_match_slot_kind() {
        assert_matches!(
            plan_placement("food1", ItemCategory::Toy, Rarity::Common, None, false),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            plan_placement("toy1", ItemCategory::Food, Rarity::Common, None, false),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn accessories_fit_no_slot() {
        for slot in YARD_SLOTS {
            assert!(plan_placement(slot.id, ItemCategory::Accessory, Rarity::Common, None, true)
                .is_err());
        }
    }

    #[test]
    fn occupied_slot_requires_confirmation() {
        assert_matches!(
            plan_placement("toy1", ItemCategory::Toy, Rarity::Common, Some(ItemCategory::Toy), false),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn replacing_toy_returns_it_to_inventory() {
        let plan =
            plan_placement("toy1", ItemCategory::Toy, Rarity::Common, Some(ItemCategory::Toy), true)
                .unwrap();
        assert_eq!(plan.displaced, Some(Removal::ReturnToInventory));
    }

    #[test]
    fn replacing_food_discards_it() {
        let plan = plan_placement(
            "food1",
            ItemCategory::Food,
            Rarity::Legendary,
            Some(ItemCategory::Food),
            true,
        )
        .unwrap();
        assert_eq!(plan.displaced, Some(Removal::Discard));
        assert_eq!(plan.max_visits, Some(20));
    }

    #[test]
    fn placement_keys_differ_by_time() {
        let a = chrono::Utc.timestamp_millis_opt(1_000).unwrap();
        let b = chrono::Utc.timestamp_millis_opt(2_000).unwrap();
        assert_eq!(placement_key(7, a), "7-1000");
        assert_ne!(placement_key(7, a), placement_key(7, b));
    }

    #[test]
    fn toy_slot_count_ignores_food_unknown_and_duplicates() {
        let count = occupied_toy_slots(["food1", "toy1", "toy1", "toy4", "bogus"]);
        assert_eq!(count, 2);
    }
}
