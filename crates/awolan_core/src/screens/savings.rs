//! Savings screen operations.
//!
//! # Responsibility
//! - Validate the add-goal form, append through the data state and schedule
//!   the maturity reminder.
//! - Pin handling and the pinned-first display projection.
//!
//! # Invariants
//! - All of purpose, amount, goal amount and maturity date are required.
//! - Progress is derived once at submission and stored with the goal.
//! - Mutating operations index the authoritative unsorted list; display
//!   rows carry their source index so the two can never drift apart.

use crate::model::{parse_entity_date, require, FormResult, SavingGoal};
use crate::reminder::{schedule_saving_reminder, ReminderScheduler};
use crate::state::DataState;
use log::{info, warn};

/// Add-form payload for a new saving goal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewSavingRequest {
    pub purpose: String,
    pub amount: String,
    pub goal_amount: String,
    pub maturity_date: String,
    pub pinned: bool,
}

/// One row of the pinned-first savings list.
///
/// `index` points into the authoritative list and is the handle for
/// delete/pin operations on the row.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingRow {
    pub index: usize,
    pub goal: SavingGoal,
}

/// Validates and appends a new goal, then schedules the maturity reminder.
pub fn submit_saving(
    data: &mut DataState,
    scheduler: &dyn ReminderScheduler,
    request: &NewSavingRequest,
) -> FormResult<()> {
    let purpose = require("purpose", &request.purpose)?.to_string();
    require("amount", &request.amount)?;
    require("goal amount", &request.goal_amount)?;
    require("maturity date", &request.maturity_date)?;

    let goal = SavingGoal::new(
        purpose.clone(),
        request.amount.clone(),
        request.goal_amount.clone(),
        request.maturity_date.clone(),
        request.pinned,
    );
    let mut savings = data.savings().to_vec();
    savings.push(goal);
    data.set_savings(savings);

    match parse_entity_date(&request.maturity_date) {
        Some(maturity) => {
            schedule_saving_reminder(scheduler, &purpose, maturity);
        }
        None => warn!(
            "event=submit_saving module=screens status=reminder_skipped reason=unparseable_date"
        ),
    }
    info!(
        "event=submit_saving module=screens status=ok savings={}",
        data.savings().len()
    );
    Ok(())
}

/// Flips the pinned flag of the goal at `index`.
pub fn toggle_pin(data: &mut DataState, index: usize) {
    let mut savings = data.savings().to_vec();
    let Some(goal) = savings.get_mut(index) else {
        warn!(
            "event=toggle_pin module=screens status=ignored reason=index_out_of_range index={index} len={}",
            data.savings().len()
        );
        return;
    };
    goal.pinned = !goal.pinned;
    data.set_savings(savings);
}

/// Pins the goal at `index` and unpins every other goal.
pub fn pin_only(data: &mut DataState, index: usize) {
    if index >= data.savings().len() {
        warn!(
            "event=pin_only module=screens status=ignored reason=index_out_of_range index={index} len={}",
            data.savings().len()
        );
        return;
    }
    let mut savings = data.savings().to_vec();
    for (i, goal) in savings.iter_mut().enumerate() {
        goal.pinned = i == index;
    }
    data.set_savings(savings);
}

/// Removes the goal at `index`. Out-of-range indexes are ignored.
pub fn delete_saving(data: &mut DataState, index: usize) {
    let mut savings = data.savings().to_vec();
    if index >= savings.len() {
        warn!(
            "event=delete_saving module=screens status=ignored reason=index_out_of_range index={index} len={}",
            savings.len()
        );
        return;
    }
    savings.remove(index);
    data.set_savings(savings);
    info!(
        "event=delete_saving module=screens status=ok index={index} savings={}",
        data.savings().len()
    );
}

/// Pinned goals first, original order preserved within each group.
pub fn sorted_rows(data: &DataState) -> Vec<SavingRow> {
    let mut rows: Vec<SavingRow> = data
        .savings()
        .iter()
        .enumerate()
        .map(|(index, goal)| SavingRow {
            index,
            goal: goal.clone(),
        })
        .collect();
    rows.sort_by_key(|row| !row.goal.pinned);
    rows
}

#[cfg(test)]
mod tests {
    use super::{
        delete_saving, pin_only, sorted_rows, submit_saving, toggle_pin, NewSavingRequest,
    };
    use crate::model::FormError;
    use crate::reminder::LogScheduler;
    use crate::state::DataState;
    use crate::store::KvStore;
    use std::sync::Arc;

    fn data() -> DataState {
        DataState::restore(Arc::new(KvStore::open_in_memory().expect("store should open")))
    }

    fn request(purpose: &str, pinned: bool) -> NewSavingRequest {
        NewSavingRequest {
            purpose: purpose.to_string(),
            amount: "1000".to_string(),
            goal_amount: "5000".to_string(),
            maturity_date: "2026-12-01".to_string(),
            pinned,
        }
    }

    #[test]
    fn submit_derives_progress_at_creation() {
        let mut data = data();
        submit_saving(&mut data, &LogScheduler, &request("Trip", false))
            .expect("submit should pass");

        assert_eq!(data.savings().len(), 1);
        assert!((data.savings()[0].progress - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn every_field_is_required() {
        let mut data = data();
        let mut missing_amount = request("Trip", false);
        missing_amount.amount = String::new();
        assert_eq!(
            submit_saving(&mut data, &LogScheduler, &missing_amount),
            Err(FormError::MissingField("amount"))
        );

        let mut missing_goal = request("Trip", false);
        missing_goal.goal_amount = " ".to_string();
        assert_eq!(
            submit_saving(&mut data, &LogScheduler, &missing_goal),
            Err(FormError::MissingField("goal amount"))
        );

        let mut missing_date = request("Trip", false);
        missing_date.maturity_date = String::new();
        assert_eq!(
            submit_saving(&mut data, &LogScheduler, &missing_date),
            Err(FormError::MissingField("maturity date"))
        );
        assert!(data.savings().is_empty());
    }

    #[test]
    fn rows_sort_pinned_first_and_keep_source_indexes() {
        let mut data = data();
        submit_saving(&mut data, &LogScheduler, &request("a", false)).unwrap();
        submit_saving(&mut data, &LogScheduler, &request("b", true)).unwrap();
        submit_saving(&mut data, &LogScheduler, &request("c", false)).unwrap();

        let rows = sorted_rows(&data);
        let order: Vec<(usize, &str)> = rows
            .iter()
            .map(|row| (row.index, row.goal.purpose.as_str()))
            .collect();
        assert_eq!(order, vec![(1, "b"), (0, "a"), (2, "c")]);

        // Deleting through the row's source index removes the right goal.
        delete_saving(&mut data, rows[0].index);
        let purposes: Vec<&str> = data.savings().iter().map(|g| g.purpose.as_str()).collect();
        assert_eq!(purposes, vec!["a", "c"]);
    }

    #[test]
    fn toggle_and_exclusive_pin() {
        let mut data = data();
        submit_saving(&mut data, &LogScheduler, &request("a", true)).unwrap();
        submit_saving(&mut data, &LogScheduler, &request("b", false)).unwrap();
        submit_saving(&mut data, &LogScheduler, &request("c", false)).unwrap();

        toggle_pin(&mut data, 1);
        assert!(data.savings()[0].pinned);
        assert!(data.savings()[1].pinned);

        pin_only(&mut data, 2);
        let pins: Vec<bool> = data.savings().iter().map(|g| g.pinned).collect();
        assert_eq!(pins, vec![false, false, true]);

        toggle_pin(&mut data, 7);
        assert_eq!(
            data.savings().iter().filter(|g| g.pinned).count(),
            1,
            "out-of-range toggle must change nothing"
        );
    }
}
