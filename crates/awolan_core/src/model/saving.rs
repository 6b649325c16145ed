//! Saving-goal record.

use serde::{Deserialize, Serialize};

/// A savings goal with a maturity date and a pinned flag.
///
/// Amounts are free-form strings as entered. `progress` is derived once at
/// creation and never recomputed afterwards, so later edits to persisted data
/// do not move the bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingGoal {
    pub purpose: String,
    pub amount: String,
    pub goal_amount: String,
    pub maturity_date: String,
    pub pinned: bool,
    pub progress: f64,
}

impl SavingGoal {
    /// Builds a goal, deriving `progress = amount / goal_amount`.
    ///
    /// # Invariants
    /// - A non-numeric amount or a zero goal yields progress `0.0`, never an
    ///   error and never a non-finite value.
    pub fn new(
        purpose: impl Into<String>,
        amount: impl Into<String>,
        goal_amount: impl Into<String>,
        maturity_date: impl Into<String>,
        pinned: bool,
    ) -> Self {
        let amount = amount.into();
        let goal_amount = goal_amount.into();
        let progress = compute_progress(&amount, &goal_amount);
        Self {
            purpose: purpose.into(),
            amount,
            goal_amount,
            maturity_date: maturity_date.into(),
            pinned,
            progress,
        }
    }
}

fn compute_progress(amount: &str, goal_amount: &str) -> f64 {
    let amount = amount.trim().parse::<f64>().unwrap_or(f64::NAN);
    let goal = goal_amount.trim().parse::<f64>().unwrap_or(f64::NAN);
    let ratio = amount / goal;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}
