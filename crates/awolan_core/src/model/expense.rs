//! Expense record.

use serde::{Deserialize, Serialize};

/// A logged expense row.
///
/// Expenses are session-only: the list lives in the expenses controller and is
/// never written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub name: String,
    pub amount: String,
    pub category: String,
    pub place: String,
}

impl Expense {
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        place: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            category: category.into(),
            place: place.into(),
        }
    }
}
