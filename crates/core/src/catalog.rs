//! Goodie categories for the marketplace catalog and the inventory store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What kind of goodie an item is. Determines which yard slots accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Food,
    Toy,
    Accessory,
}

impl ItemCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemCategory::Food => "food",
            ItemCategory::Toy => "toy",
            ItemCategory::Accessory => "accessory",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "food" => Ok(ItemCategory::Food),
            "toy" => Ok(ItemCategory::Toy),
            "accessory" => Ok(ItemCategory::Accessory),
            other => Err(CoreError::Validation(format!(
                "Invalid category '{other}'. Must be one of: food, toy, accessory"
            ))),
        }
    }

    /// Only food is consumable, so only food may be owned more than once.
    pub fn allows_duplicates(self) -> bool {
        matches!(self, ItemCategory::Food)
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reject a purchase of a non-duplicable goodie the user already owns.
///
/// `owned` counts both inventory units and yard placements.
pub fn validate_purchase_ownership(
    category: ItemCategory,
    goodie_name: &str,
    owned: i64,
) -> Result<(), CoreError> {
    if owned > 0 && !category.allows_duplicates() {
        return Err(CoreError::Conflict(format!(
            "You already own '{goodie_name}'; only food can be bought more than once"
        )));
    }
    Ok(())
}
