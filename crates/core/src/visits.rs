//! Cat visit simulation rules.
//!
//! A placed food item attracts cats. Each check rolls against a probability
//! that grows with the number of toys in the yard; on success a cat of the
//! food's rarity tier is chosen and a spoon reward is computed.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::rarity::{Rarity, ALL_RARITIES};
use crate::types::DbId;

/// Chance of a visit with an empty toy board.
pub const BASE_VISIT_CHANCE: f64 = 0.4;

/// Extra chance contributed by each distinct occupied toy slot.
pub const PER_TOY_BONUS: f64 = 0.1;

/// Upper bound on the visit chance regardless of toys.
pub const MAX_VISIT_CHANCE: f64 = 0.9;

/// Default interval between visit checks, in seconds.
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 30;

/// Probability that a food placement attracts a cat on one check.
pub fn visit_probability(toy_count: usize) -> f64 {
    (BASE_VISIT_CHANCE + PER_TOY_BONUS * toy_count as f64).min(MAX_VISIT_CHANCE)
}

/// Whether a uniform roll in `[0, 1)` lands under the visit probability.
pub fn visit_occurs(probability: f64, roll: f64) -> bool {
    roll < probability
}

/// The subset of a catalog cat needed to simulate a visit.
#[derive(Debug, Clone, PartialEq)]
pub struct CatProfile {
    pub id: DbId,
    pub rarity: Rarity,
    pub reward_multiplier: f64,
}

/// Cats allowed to visit food of the given rarity.
///
/// Cats of the same tier are preferred. If the catalog has none, the nearest
/// lower tier with cats is used, then the nearest higher tier.
pub fn eligible_cats(food_rarity: Rarity, cats: &[CatProfile]) -> Vec<&CatProfile> {
    let tier = food_rarity.tier();
    let lower = ALL_RARITIES[..=tier].iter().rev();
    let higher = ALL_RARITIES[tier + 1..].iter();

    lower
        .chain(higher)
        .map(|rarity| cats.iter().filter(|c| c.rarity == *rarity).collect::<Vec<_>>())
        .find(|matching| !matching.is_empty())
        .unwrap_or_default()
}

/// Spoons awarded for a visit by this cat. Never less than one.
pub fn visit_reward(cat: &CatProfile) -> i64 {
    let scaled = cat.rarity.visit_reward() as f64 * cat.reward_multiplier;
    (scaled.round() as i64).max(1)
}

/// A successful visit roll.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitRoll {
    pub cat_id: DbId,
    pub reward: i64,
}

/// Roll one visit check for a food placement.
///
/// Returns `None` when no cat shows up, either because the roll failed or
/// because the catalog has no cats at all.
pub fn roll_visit<R: Rng + ?Sized>(
    food_rarity: Rarity,
    toy_count: usize,
    cats: &[CatProfile],
    rng: &mut R,
) -> Option<VisitRoll> {
    let probability = visit_probability(toy_count);
    if !visit_occurs(probability, rng.random::<f64>()) {
        return None;
    }

    let eligible = eligible_cats(food_rarity, cats);
    let cat = eligible.choose(rng)?;

    Some(VisitRoll {
        cat_id: cat.id,
        reward: visit_reward(cat),
    })
}
