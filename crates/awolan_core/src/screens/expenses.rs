//! Expenses screen, a session-only log.
//!
//! # Responsibility
//! - Keep the expense rows entered during this app session.
//!
//! # Invariants
//! - The list is never persisted; a restart always starts empty.
//! - Only `name` is required; the other fields are stored verbatim.

use crate::model::{require, Expense, FormResult};
use log::{info, warn};

/// Add-form payload for a new expense row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewExpenseRequest {
    pub name: String,
    pub amount: String,
    pub category: String,
    pub place: String,
}

#[derive(Default)]
pub struct ExpensesScreen {
    expenses: Vec<Expense>,
}

impl ExpensesScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends one expense row.
    pub fn add_expense(&mut self, request: &NewExpenseRequest) -> FormResult<()> {
        require("name", &request.name)?;
        self.expenses.push(Expense::new(
            request.name.clone(),
            request.amount.clone(),
            request.category.clone(),
            request.place.clone(),
        ));
        info!(
            "event=add_expense module=screens status=ok expenses={}",
            self.expenses.len()
        );
        Ok(())
    }

    /// Removes the row at `index`. Out-of-range indexes are ignored.
    pub fn delete_expense(&mut self, index: usize) {
        if index >= self.expenses.len() {
            warn!(
                "event=delete_expense module=screens status=ignored reason=index_out_of_range index={index} len={}",
                self.expenses.len()
            );
            return;
        }
        self.expenses.remove(index);
        info!(
            "event=delete_expense module=screens status=ok index={index} expenses={}",
            self.expenses.len()
        );
    }

    pub fn rows(&self) -> &[Expense] {
        &self.expenses
    }
}
