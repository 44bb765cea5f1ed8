//! Spoon-point ledger rules.
//!
//! Every balance change is paired with exactly one append-only transaction
//! whose amount equals the change. Earning actions have fixed amounts;
//! cat visits and marketplace purchases carry their own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Kind of ledger entry, stored as `spoon_transactions.action_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpoonAction {
    RecipeSave,
    RecipeGenerate,
    MealPlanSent,
    DailyVisit,
    CatVisit,
    MarketplacePurchase,
}

const ALL_ACTIONS: [SpoonAction; 6] = [
    SpoonAction::RecipeSave,
    SpoonAction::RecipeGenerate,
    SpoonAction::MealPlanSent,
    SpoonAction::DailyVisit,
    SpoonAction::CatVisit,
    SpoonAction::MarketplacePurchase,
];

impl SpoonAction {
    pub fn as_str(self) -> &'static str {
        match self {
            SpoonAction::RecipeSave => "recipe_save",
            SpoonAction::RecipeGenerate => "recipe_generate",
            SpoonAction::MealPlanSent => "meal_plan_sent",
            SpoonAction::DailyVisit => "daily_visit",
            SpoonAction::CatVisit => "cat_visit",
            SpoonAction::MarketplacePurchase => "marketplace_purchase",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        ALL_ACTIONS
            .into_iter()
            .find(|a| a.as_str() == value)
            .ok_or_else(|| CoreError::Validation(format!("Unknown spoon action '{value}'")))
    }

    /// Amount for actions whose value does not depend on context.
    pub fn fixed_points(self) -> Option<i64> {
        match self {
            SpoonAction::RecipeSave => Some(10),
            SpoonAction::RecipeGenerate => Some(5),
            SpoonAction::MealPlanSent => Some(20),
            SpoonAction::DailyVisit => Some(2),
            SpoonAction::CatVisit | SpoonAction::MarketplacePurchase => None,
        }
    }

    /// Short human-readable description stored alongside the transaction.
    pub fn describe(self) -> &'static str {
        match self {
            SpoonAction::RecipeSave => "Saved a recipe",
            SpoonAction::RecipeGenerate => "Generated a recipe",
            SpoonAction::MealPlanSent => "Sent a meal plan",
            SpoonAction::DailyVisit => "Daily visit",
            SpoonAction::CatVisit => "A cat visited your yard",
            SpoonAction::MarketplacePurchase => "Marketplace purchase",
        }
    }
}

impl fmt::Display for SpoonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the signed amount for an action.
///
/// - Fixed-amount actions ignore `amount` and use their table value.
/// - `cat_visit` requires a positive reward.
/// - `marketplace_purchase` requires a positive cost and debits it.
pub fn resolve_amount(action: SpoonAction, amount: Option<i64>) -> Result<i64, CoreError> {
    if let Some(points) = action.fixed_points() {
        return Ok(points);
    }
    match (action, amount) {
        (SpoonAction::CatVisit, Some(reward)) if reward > 0 => Ok(reward),
        (SpoonAction::MarketplacePurchase, Some(cost)) if cost > 0 => Ok(-cost),
        (SpoonAction::MarketplacePurchase, Some(0)) => Ok(0),
        _ => Err(CoreError::Validation(format!(
            "Action '{action}' requires a positive amount"
        ))),
    }
}

/// Validate that an action can be awarded directly by a client.
///
/// Only fixed-amount earning actions are client-awardable; visit rewards and
/// purchases are applied by the server as side effects.
pub fn validate_client_award(action: SpoonAction) -> Result<i64, CoreError> {
    action.fixed_points().ok_or_else(|| {
        CoreError::Validation(format!("Action '{action}' cannot be awarded directly"))
    })
}

/// Apply a signed amount to a balance.
///
/// Fails without side effects when the result would go negative.
pub fn apply(balance: i64, amount: i64) -> Result<i64, CoreError> {
    let next = balance + amount;
    if next < 0 {
        return Err(CoreError::InsufficientSpoons {
            balance,
            required: -amount,
        });
    }
    Ok(next)
}

/// Idempotency key for a marketplace purchase.
pub fn purchase_key(goodie_id: DbId, at: Timestamp) -> String {
    format!("purchase-{goodie_id}-{}", at.timestamp_millis())
}

/// Idempotency key for a cat-visit reward.
pub fn cat_visit_key(visit_id: DbId) -> String {
    format!("cat-visit-{visit_id}")
}

/// Outcome of comparing a stored balance against its transaction log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub balance: i64,
    pub ledger_total: i64,
    pub consistent: bool,
}

/// Check that the balance equals the sum of all recorded amounts.
pub fn reconcile(balance: i64, ledger_total: i64) -> Reconciliation {
    Reconciliation {
        balance,
        ledger_total,
        consistent: balance == ledger_total,
    }
}
