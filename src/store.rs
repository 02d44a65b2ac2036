// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Application state, the closed set of actions that mutate it, and the
//! container that pairs each transition with a write of the touched slices.

use crate::db::{Slice, Storage, load_slice, save_slice};
use crate::models::{AppSettings, Budget, FixedExpense, NewTransaction, Transaction};
use crate::utils::month_key;
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct State {
    pub transactions: Vec<Transaction>,
    pub fixed_expenses: Vec<FixedExpense>,
    pub budgets: Vec<Budget>,
    pub settings: AppSettings,
    pub locked_months: BTreeSet<String>, // YYYY-MM
}

impl State {
    pub fn is_month_locked(&self, date: NaiveDate) -> bool {
        self.locked_months.contains(&month_key(date))
    }

    pub fn is_transaction_locked(&self, tx: &Transaction) -> bool {
        self.is_month_locked(tx.date)
    }

    pub fn find_transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn budget_for(&self, category: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.category == category)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddTransaction(NewTransaction),
    UpdateTransaction(Transaction),
    DeleteTransaction(String),
    AddFixedExpense { category: String, amount: Decimal },
    DeleteFixedExpense(String),
    SetBudget(Budget),
    DeleteBudget(String),
    UpdateSettings(AppSettings),
    LockMonth(String),
    UnlockMonth(String),
    ResetAll,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddTransaction(_) => "AddTransaction",
            Action::UpdateTransaction(_) => "UpdateTransaction",
            Action::DeleteTransaction(_) => "DeleteTransaction",
            Action::AddFixedExpense { .. } => "AddFixedExpense",
            Action::DeleteFixedExpense(_) => "DeleteFixedExpense",
            Action::SetBudget(_) => "SetBudget",
            Action::DeleteBudget(_) => "DeleteBudget",
            Action::UpdateSettings(_) => "UpdateSettings",
            Action::LockMonth(_) => "LockMonth",
            Action::UnlockMonth(_) => "UnlockMonth",
            Action::ResetAll => "ResetAll",
        }
    }

    /// Slices whose contents this action can change.
    pub fn slices(&self) -> &'static [Slice] {
        match self {
            Action::AddTransaction(_)
            | Action::UpdateTransaction(_)
            | Action::DeleteTransaction(_) => &[Slice::Transactions],
            Action::AddFixedExpense { .. } | Action::DeleteFixedExpense(_) => {
                &[Slice::FixedExpenses]
            }
            Action::SetBudget(_) | Action::DeleteBudget(_) => &[Slice::Budgets],
            Action::UpdateSettings(_) => &[Slice::Settings],
            Action::LockMonth(_) | Action::UnlockMonth(_) => &[Slice::LockedMonths],
            Action::ResetAll => &Slice::ALL,
        }
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Compute the next state. Never fails; ids that match nothing are no-ops.
pub fn reduce(state: &State, action: Action) -> State {
    let mut next = state.clone();
    match action {
        Action::AddTransaction(new) => next.transactions.push(new.with_id(new_id())),
        Action::UpdateTransaction(tx) => {
            if let Some(slot) = next.transactions.iter_mut().find(|t| t.id == tx.id) {
                *slot = tx;
            }
        }
        Action::DeleteTransaction(id) => next.transactions.retain(|t| t.id != id),
        Action::AddFixedExpense { category, amount } => next.fixed_expenses.push(FixedExpense {
            id: new_id(),
            category,
            amount,
        }),
        Action::DeleteFixedExpense(id) => next.fixed_expenses.retain(|f| f.id != id),
        Action::SetBudget(budget) => {
            match next
                .budgets
                .iter_mut()
                .find(|b| b.category == budget.category)
            {
                Some(slot) => *slot = budget,
                None => next.budgets.push(budget),
            }
        }
        Action::DeleteBudget(category) => next.budgets.retain(|b| b.category != category),
        Action::UpdateSettings(settings) => next.settings = settings,
        Action::LockMonth(month) => {
            next.locked_months.insert(month);
        }
        Action::UnlockMonth(month) => {
            next.locked_months.remove(&month);
        }
        Action::ResetAll => next = State::default(),
    }
    next
}

/// Owns the in-memory state for the lifetime of the process and mirrors it to storage.
pub struct Store<S: Storage> {
    state: State,
    storage: S,
}

impl<S: Storage> Store<S> {
    /// Build the initial state from whatever the storage holds.
    pub fn open(storage: S) -> Self {
        let state = State {
            transactions: load_slice(&storage, Slice::Transactions, Vec::new()),
            fixed_expenses: load_slice(&storage, Slice::FixedExpenses, Vec::new()),
            budgets: load_slice(&storage, Slice::Budgets, Vec::new()),
            settings: load_slice(&storage, Slice::Settings, AppSettings::default()),
            locked_months: load_slice::<Vec<String>>(&storage, Slice::LockedMonths, Vec::new())
                .into_iter()
                .collect(),
        };
        debug!(
            "loaded {} transactions, {} fixed expenses, {} budgets, {} locked months",
            state.transactions.len(),
            state.fixed_expenses.len(),
            state.budgets.len(),
            state.locked_months.len()
        );
        Self { state, storage }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!("dispatch {}", action.name());
        let reset = matches!(action, Action::ResetAll);
        let slices = action.slices();
        self.state = reduce(&self.state, action);
        if reset {
            let keys: Vec<&str> = Slice::ALL.iter().map(|s| s.key()).collect();
            if let Err(e) = self.storage.clear(&keys) {
                warn!("failed to clear storage: {}", e);
            }
            return;
        }
        for slice in slices {
            self.persist(*slice);
        }
    }

    /// Dispatch `AddTransaction` and return the id it was given.
    pub fn add_transaction(&mut self, new: NewTransaction) -> String {
        self.dispatch(Action::AddTransaction(new));
        self.state
            .transactions
            .last()
            .map(|t| t.id.clone())
            .unwrap_or_default()
    }

    pub fn add_fixed_expense(&mut self, category: String, amount: Decimal) -> String {
        self.dispatch(Action::AddFixedExpense { category, amount });
        self.state
            .fixed_expenses
            .last()
            .map(|f| f.id.clone())
            .unwrap_or_default()
    }

    /// Write one slice. Failures are logged and otherwise ignored.
    pub fn persist(&self, slice: Slice) {
        let res = match slice {
            Slice::Transactions => save_slice(&self.storage, slice, &self.state.transactions),
            Slice::FixedExpenses => save_slice(&self.storage, slice, &self.state.fixed_expenses),
            Slice::Budgets => save_slice(&self.storage, slice, &self.state.budgets),
            Slice::Settings => save_slice(&self.storage, slice, &self.state.settings),
            Slice::LockedMonths => save_slice(&self.storage, slice, &self.state.locked_months),
        };
        if let Err(e) = res {
            warn!("failed to persist '{}': {}", slice.key(), e);
        }
    }
}
