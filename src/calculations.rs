// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month-scoped aggregation over the transaction list. Everything here is
//! recomputed on demand from the store's state. Sums saturate at
//! `Decimal::MAX` instead of overflowing.

use crate::models::{Budget, FixedExpense, Transaction, TxType};
use crate::store::State;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Transactions dated within the calendar month of `reference`.
pub fn month_transactions(transactions: &[Transaction], reference: NaiveDate) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.date.year() == reference.year() && t.date.month() == reference.month())
        .cloned()
        .collect()
}

pub fn total_by_type(transactions: &[Transaction], tx_type: TxType) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.tx_type == tx_type)
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
}

/// Summed expense amounts keyed by category. Income never appears.
pub fn expenses_by_category(transactions: &[Transaction]) -> BTreeMap<String, Decimal> {
    let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.tx_type == TxType::Expense) {
        let slot = agg.entry(t.category.clone()).or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(t.amount);
    }
    agg
}

pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

pub fn fixed_total(fixed: &[FixedExpense]) -> Decimal {
    fixed
        .iter()
        .fold(Decimal::ZERO, |acc, f| acc.saturating_add(f.amount))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub label: String,
    pub income: Decimal,
    pub transaction_expenses: Decimal,
    pub fixed_expenses: Decimal,
    /// Transaction expenses plus every fixed expense.
    pub expenses: Decimal,
    pub balance: Decimal,
    pub savings: Decimal,
    pub over_budget: bool,
}

impl MonthSummary {
    pub fn compute(state: &State, reference: NaiveDate) -> Self {
        let month = month_transactions(&state.transactions, reference);
        let income = total_by_type(&month, TxType::Income);
        let transaction_expenses = total_by_type(&month, TxType::Expense);
        let fixed = fixed_total(&state.fixed_expenses);
        let expenses = transaction_expenses.saturating_add(fixed);
        let balance = income.saturating_sub(expenses);
        Self {
            label: month_label(reference),
            income,
            transaction_expenses,
            fixed_expenses: fixed,
            expenses,
            balance,
            savings: balance.max(Decimal::ZERO),
            over_budget: balance < Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    /// Share of the limit used, capped at 100.
    pub percent: Decimal,
    pub over: bool,
}

pub fn budget_status(
    budgets: &[Budget],
    spent_by_category: &BTreeMap<String, Decimal>,
) -> Vec<BudgetStatus> {
    let hundred = Decimal::from(100);
    budgets
        .iter()
        .map(|b| {
            let spent = spent_by_category
                .get(&b.category)
                .copied()
                .unwrap_or(Decimal::ZERO);
            // A ratio too large to represent is past the cap anyway.
            let percent = if b.limit > Decimal::ZERO {
                spent
                    .checked_div(b.limit)
                    .and_then(|r| r.checked_mul(hundred))
                    .map_or(hundred, |p| p.min(hundred))
            } else {
                Decimal::ZERO
            };
            BudgetStatus {
                category: b.category.clone(),
                limit: b.limit,
                spent,
                percent,
                over: spent > b.limit,
            }
        })
        .collect()
}

/// Newest first by date; ties keep insertion order.
pub fn recent_transactions(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub category: Option<String>,
    pub tx_type: Option<TxType>,
    pub search: Option<String>,
    pub month: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        if let Some(cat) = &self.category {
            if &t.category != cat {
                return false;
            }
        }
        if let Some(ty) = self.tx_type {
            if t.tx_type != ty {
                return false;
            }
        }
        if let Some(month) = self.month {
            if t.date.year() != month.year() || t.date.month() != month.month() {
                return false;
            }
        }
        if let Some(q) = self.search.as_deref().filter(|q| !q.is_empty()) {
            let q = q.to_lowercase();
            if !t.category.to_lowercase().contains(&q) && !t.notes.to_lowercase().contains(&q) {
                return false;
            }
        }
        true
    }
}

/// Matching transactions, newest first.
pub fn filter_transactions(transactions: &[Transaction], filter: &TransactionFilter) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(tx_type: TxType, category: &str, amount: i64, date: (i32, u32, u32)) -> Transaction {
        Transaction {
            id: format!("{}-{}-{}", category, date.1, date.2),
            tx_type,
            amount: Decimal::from(amount),
            category: category.into(),
            subcategory: None,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            time: None,
            notes: String::new(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(TxType::Income, "Salary", 1000, (2024, 3, 1)),
            tx(TxType::Expense, "Food", 200, (2024, 3, 5)),
            tx(TxType::Expense, "Transport", 50, (2024, 4, 1)),
        ]
    }

    fn march() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 17).unwrap()
    }

    #[test]
    fn march_scenario() {
        let all = sample();
        let month = month_transactions(&all, march());
        assert_eq!(month, all[..2].to_vec());
        assert_eq!(total_by_type(&month, TxType::Income), Decimal::from(1000));
        let by_cat = expenses_by_category(&month);
        assert_eq!(by_cat.len(), 1);
        assert_eq!(by_cat["Food"], Decimal::from(200));
    }

    #[test]
    fn month_filter_is_idempotent_and_inclusive() {
        let mut all = sample();
        all.push(tx(TxType::Expense, "Rent", 10, (2024, 3, 31)));
        all.push(tx(TxType::Expense, "Rent", 10, (2023, 3, 15)));
        let once = month_transactions(&all, march());
        assert_eq!(once.len(), 3);
        assert_eq!(month_transactions(&once, march()), once);
    }

    #[test]
    fn sums_are_zero_when_nothing_matches() {
        assert_eq!(total_by_type(&[], TxType::Expense), Decimal::ZERO);
        let incomes = vec![tx(TxType::Income, "Salary", 5, (2024, 1, 1))];
        assert_eq!(total_by_type(&incomes, TxType::Expense), Decimal::ZERO);
        assert!(expenses_by_category(&incomes).is_empty());
    }

    #[test]
    fn category_totals_sum_to_expense_total() {
        let mut all = sample();
        all.push(tx(TxType::Expense, "Food", 35, (2024, 4, 2)));
        let by_cat = expenses_by_category(&all);
        let total: Decimal = by_cat.values().copied().sum();
        assert_eq!(total, total_by_type(&all, TxType::Expense));
        assert_eq!(by_cat["Food"], Decimal::from(235));
    }

    #[test]
    fn label_is_month_and_year() {
        assert_eq!(month_label(march()), "March 2024");
    }

    #[test]
    fn summary_adds_fixed_expenses_every_month() {
        let state = State {
            transactions: sample(),
            fixed_expenses: vec![FixedExpense {
                id: "f1".into(),
                category: "Rent".into(),
                amount: Decimal::from(900),
            }],
            ..State::default()
        };
        let s = MonthSummary::compute(&state, march());
        assert_eq!(s.expenses, Decimal::from(1100));
        assert_eq!(s.balance, Decimal::from(-100));
        assert_eq!(s.savings, Decimal::ZERO);
        assert!(s.over_budget);

        let april = MonthSummary::compute(&state, NaiveDate::from_ymd_opt(2024, 4, 9).unwrap());
        assert_eq!(april.fixed_expenses, Decimal::from(900));
        assert_eq!(april.expenses, Decimal::from(950));
    }

    #[test]
    fn budget_percent_caps_at_hundred() {
        let budgets = vec![
            Budget { category: "Food".into(), limit: Decimal::from(100) },
            Budget { category: "Medical".into(), limit: Decimal::from(40) },
        ];
        let mut spent = BTreeMap::new();
        spent.insert("Food".to_string(), Decimal::from(150));
        let status = budget_status(&budgets, &spent);
        assert_eq!(status[0].percent, Decimal::from(100));
        assert!(status[0].over);
        assert_eq!(status[1].spent, Decimal::ZERO);
        assert!(!status[1].over);
    }

    #[test]
    fn tiny_limit_does_not_overflow_percent() {
        let budgets = vec![Budget {
            category: "Food".into(),
            limit: Decimal::new(1, 27),
        }];
        let mut spent = BTreeMap::new();
        spent.insert("Food".to_string(), Decimal::ONE);
        let status = budget_status(&budgets, &spent);
        assert_eq!(status[0].percent, Decimal::from(100));
        assert!(status[0].over);
    }

    #[test]
    fn huge_amounts_saturate_instead_of_panicking() {
        let big = |day| {
            let mut t = tx(TxType::Income, "Salary", 0, (2024, 3, day));
            t.amount = Decimal::MAX;
            t
        };
        let mut txs = vec![big(1), big(2)];
        let mut food = tx(TxType::Expense, "Food", 0, (2024, 3, 3));
        food.amount = Decimal::MAX;
        txs.push(food.clone());
        txs.push(food);
        assert_eq!(total_by_type(&txs, TxType::Income), Decimal::MAX);
        assert_eq!(expenses_by_category(&txs)["Food"], Decimal::MAX);

        let state = State {
            transactions: txs,
            fixed_expenses: vec![FixedExpense {
                id: "f1".into(),
                category: "Rent".into(),
                amount: Decimal::MAX,
            }],
            ..State::default()
        };
        let s = MonthSummary::compute(&state, march());
        assert_eq!(s.expenses, Decimal::MAX);
        assert_eq!(s.balance, Decimal::ZERO);
        assert!(!s.over_budget);
    }

    #[test]
    fn search_matches_category_or_notes() {
        let mut all = sample();
        all[2].notes = "Metro card top-up".into();
        let f = TransactionFilter {
            search: Some("METRO".into()),
            ..Default::default()
        };
        let hits = filter_transactions(&all, &f);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].category, "Transport");

        let f = TransactionFilter {
            tx_type: Some(TxType::Expense),
            ..Default::default()
        };
        let hits = filter_transactions(&all, &f);
        assert_eq!(hits[0].date, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn recent_is_newest_first() {
        let recent = recent_transactions(&sample(), 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].category, "Transport");
        assert_eq!(recent[1].category, "Food");
    }
}
