//! Rarity tiers and the tables keyed on them.
//!
//! Two tables live here and must stay consistent with each other:
//!
//! - **Visit capacity**: how many cat visits a placed food item supports.
//! - **Visit reward**: base spoon reward for a visit by a cat of that tier,
//!   scaled by the cat's own reward multiplier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Rarity tier shared by goodies and cats, ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Every tier, in ascending order.
pub const ALL_RARITIES: [Rarity; 5] = [
    Rarity::Common,
    Rarity::Uncommon,
    Rarity::Rare,
    Rarity::Epic,
    Rarity::Legendary,
];

impl Rarity {
    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    /// Parse a stored rarity value.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        ALL_RARITIES
            .into_iter()
            .find(|r| r.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid rarity '{value}'. Must be one of: common, uncommon, rare, epic, legendary"
                ))
            })
    }

    /// Zero-based position in [`ALL_RARITIES`].
    pub fn tier(self) -> usize {
        self as usize
    }

    /// Number of cat visits a food item of this rarity supports once placed.
    pub fn visit_capacity(self) -> i32 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 3,
            Rarity::Rare => 5,
            Rarity::Epic => 10,
            Rarity::Legendary => 20,
        }
    }

    /// Base spoon reward for one visit by a cat of this rarity.
    pub fn visit_reward(self) -> i64 {
        match self {
            Rarity::Common => 5,
            Rarity::Uncommon => 10,
            Rarity::Rare => 15,
            Rarity::Epic => 25,
            Rarity::Legendary => 40,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
