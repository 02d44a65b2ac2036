// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Checks applied to user input before anything is dispatched. The store
//! itself accepts whatever it is given.

use crate::models::{NewTransaction, Transaction, TxType};
use crate::store::State;
use crate::utils::{is_valid_time, month_key};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

pub const NOTES_MAX_CHARS: usize = 200;
/// Largest accepted amount; keeps month and category sums far from `Decimal::MAX`.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;
pub const AMOUNT_MAX_DECIMALS: u32 = 2;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Please fill all required fields ({0} is missing)")]
    MissingField(&'static str),
    #[error("Enter a valid amount (must be greater than zero)")]
    NonPositiveAmount,
    #[error("Amount must not exceed {}", MAX_AMOUNT)]
    AmountTooLarge,
    #[error("Amount may have at most {} decimal places", AMOUNT_MAX_DECIMALS)]
    TooManyDecimals,
    #[error("Month {0} is locked")]
    MonthLocked(String),
    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("Notes are limited to {} characters", NOTES_MAX_CHARS)]
    NotesTooLong,
    #[error("Transaction '{0}' not found")]
    UnknownTransaction(String),
}

/// Raw form input for a transaction.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub tx_type: TxType,
    pub amount: Decimal,
    pub category: String,
    pub subcategory: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub notes: String,
}

pub fn can_mutate(state: &State, date: NaiveDate) -> bool {
    !state.is_month_locked(date)
}

fn ensure_unlocked(state: &State, date: NaiveDate) -> Result<(), ValidationError> {
    if can_mutate(state, date) {
        Ok(())
    } else {
        Err(ValidationError::MonthLocked(month_key(date)))
    }
}

pub fn ensure_valid_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(ValidationError::AmountTooLarge);
    }
    if amount.normalize().scale() > AMOUNT_MAX_DECIMALS {
        return Err(ValidationError::TooManyDecimals);
    }
    Ok(())
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub fn validate_new_transaction(
    state: &State,
    input: TransactionInput,
) -> Result<NewTransaction, ValidationError> {
    let category = input.category.trim().to_string();
    if category.is_empty() {
        return Err(ValidationError::MissingField("category"));
    }
    let date = input.date.ok_or(ValidationError::MissingField("date"))?;
    ensure_valid_amount(input.amount)?;

    let notes = input.notes.trim().to_string();
    if notes.chars().count() > NOTES_MAX_CHARS {
        return Err(ValidationError::NotesTooLong);
    }
    let time = non_blank(input.time);
    if let Some(t) = &time {
        if !is_valid_time(t) {
            return Err(ValidationError::InvalidTime(t.clone()));
        }
    }
    // Subcategories only exist for food expenses.
    let subcategory = if input.tx_type == TxType::Expense && category == "Food" {
        non_blank(input.subcategory)
    } else {
        None
    };
    ensure_unlocked(state, date)?;

    Ok(NewTransaction {
        tx_type: input.tx_type,
        amount: input.amount,
        category,
        subcategory,
        date,
        time,
        notes,
    })
}

/// The record must exist and neither its stored nor its new month may be locked.
pub fn validate_update(state: &State, updated: &Transaction) -> Result<(), ValidationError> {
    let current = state
        .find_transaction(&updated.id)
        .ok_or_else(|| ValidationError::UnknownTransaction(updated.id.clone()))?;
    ensure_unlocked(state, current.date)?;
    ensure_unlocked(state, updated.date)?;
    if updated.category.trim().is_empty() {
        return Err(ValidationError::MissingField("category"));
    }
    ensure_valid_amount(updated.amount)?;
    if updated.notes.chars().count() > NOTES_MAX_CHARS {
        return Err(ValidationError::NotesTooLong);
    }
    if let Some(t) = &updated.time {
        if !is_valid_time(t) {
            return Err(ValidationError::InvalidTime(t.clone()));
        }
    }
    Ok(())
}

pub fn validate_delete(state: &State, id: &str) -> Result<(), ValidationError> {
    let current = state
        .find_transaction(id)
        .ok_or_else(|| ValidationError::UnknownTransaction(id.to_string()))?;
    ensure_unlocked(state, current.date)
}

/// Budget limits and fixed expenses share the same shape of input.
pub fn validate_category_amount(category: &str, amount: Decimal) -> Result<String, ValidationError> {
    let category = category.trim();
    if category.is_empty() {
        return Err(ValidationError::MissingField("category"));
    }
    ensure_valid_amount(amount)?;
    Ok(category.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Action, reduce};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(amount: i64, day: NaiveDate) -> TransactionInput {
        TransactionInput {
            tx_type: TxType::Expense,
            amount: Decimal::from(amount),
            category: "Food".into(),
            subcategory: Some("Tea".into()),
            date: Some(day),
            time: Some("08:30".into()),
            notes: "  chai  ".into(),
        }
    }

    fn locked(months: &[&str]) -> State {
        months.iter().fold(State::default(), |s, m| {
            reduce(&s, Action::LockMonth(m.to_string()))
        })
    }

    #[test]
    fn every_day_of_a_locked_month_is_rejected() {
        let state = locked(&["2024-02", "2023-12"]);
        for (y, m) in [(2024, 2), (2023, 12)] {
            let mut day = date(y, m, 1);
            while chrono::Datelike::month(&day) == m {
                assert!(!can_mutate(&state, day));
                assert_eq!(
                    validate_new_transaction(&state, input(10, day)),
                    Err(ValidationError::MonthLocked(month_key(day)))
                );
                day = day.succ_opt().unwrap();
            }
        }
        assert!(can_mutate(&state, date(2024, 3, 1)));
        assert!(can_mutate(&state, date(2023, 2, 10)));
    }

    #[test]
    fn accepted_input_is_normalised() {
        let new = validate_new_transaction(&State::default(), input(12, date(2024, 5, 2))).unwrap();
        assert_eq!(new.notes, "chai");
        assert_eq!(new.subcategory.as_deref(), Some("Tea"));

        let mut salary = input(5000, date(2024, 5, 1));
        salary.tx_type = TxType::Income;
        salary.category = "Salary".into();
        let new = validate_new_transaction(&State::default(), salary).unwrap();
        assert_eq!(new.subcategory, None);
    }

    #[test]
    fn rejects_bad_fields() {
        let state = State::default();
        let day = date(2024, 5, 2);
        assert_eq!(
            validate_new_transaction(&state, input(0, day)),
            Err(ValidationError::NonPositiveAmount)
        );
        let mut no_cat = input(5, day);
        no_cat.category = "  ".into();
        assert_eq!(
            validate_new_transaction(&state, no_cat),
            Err(ValidationError::MissingField("category"))
        );
        let mut no_date = input(5, day);
        no_date.date = None;
        assert_eq!(
            validate_new_transaction(&state, no_date),
            Err(ValidationError::MissingField("date"))
        );
        let mut late = input(5, day);
        late.time = Some("25:00".into());
        assert!(matches!(
            validate_new_transaction(&state, late),
            Err(ValidationError::InvalidTime(_))
        ));
        let mut long = input(5, day);
        long.notes = "x".repeat(NOTES_MAX_CHARS + 1);
        assert_eq!(
            validate_new_transaction(&state, long),
            Err(ValidationError::NotesTooLong)
        );
    }

    #[test]
    fn amounts_are_bounded_in_size_and_precision() {
        assert_eq!(ensure_valid_amount(Decimal::new(1250, 2)), Ok(()));
        assert_eq!(ensure_valid_amount(Decimal::new(12500, 3)), Ok(()));
        assert_eq!(ensure_valid_amount(Decimal::from(MAX_AMOUNT)), Ok(()));
        assert_eq!(
            ensure_valid_amount(Decimal::MAX),
            Err(ValidationError::AmountTooLarge)
        );
        assert_eq!(
            ensure_valid_amount(Decimal::new(1, 27)),
            Err(ValidationError::TooManyDecimals)
        );
        assert_eq!(
            validate_category_amount("Food", Decimal::new(1, 27)),
            Err(ValidationError::TooManyDecimals)
        );
        let mut huge = input(1, date(2024, 5, 2));
        huge.amount = Decimal::MAX;
        assert_eq!(
            validate_new_transaction(&State::default(), huge),
            Err(ValidationError::AmountTooLarge)
        );
    }

    #[test]
    fn edits_cannot_move_into_or_out_of_locked_month() {
        let open = State::default();
        let new = validate_new_transaction(&open, input(10, date(2024, 1, 20))).unwrap();
        let state = reduce(&open, Action::AddTransaction(new));
        let state = reduce(&state, Action::LockMonth("2024-02".into()));
        let mut tx = state.transactions[0].clone();

        tx.date = date(2024, 2, 3);
        assert!(validate_update(&state, &tx).is_err());

        let state = reduce(&state, Action::LockMonth("2024-01".into()));
        let tx = state.transactions[0].clone();
        assert!(validate_update(&state, &tx).is_err());
        assert!(validate_delete(&state, &tx.id).is_err());
        assert_eq!(
            validate_delete(&state, "missing"),
            Err(ValidationError::UnknownTransaction("missing".into()))
        );
    }
}
