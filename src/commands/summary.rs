// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calculations::{
    BudgetStatus, MonthSummary, budget_status, expenses_by_category, month_transactions,
    recent_transactions,
};
use crate::db::Storage;
use crate::store::{State, Store};
use crate::utils::{fmt_money, maybe_print_json, month_start, pretty_table, today};
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

const RECENT_COUNT: usize = 5;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub summary: MonthSummary,
    pub by_category: BTreeMap<String, Decimal>,
    pub budgets: Vec<BudgetStatus>,
    pub recent: Vec<RecentRow>,
}

#[derive(Debug, Serialize)]
pub struct RecentRow {
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub amount: Decimal,
    pub notes: String,
}

pub fn dashboard(state: &State, reference: NaiveDate) -> Dashboard {
    let month = month_transactions(&state.transactions, reference);
    let by_category = expenses_by_category(&month);
    Dashboard {
        summary: MonthSummary::compute(state, reference),
        budgets: budget_status(&state.budgets, &by_category),
        recent: recent_transactions(&month, RECENT_COUNT)
            .into_iter()
            .map(|t| RecentRow {
                date: t.date.to_string(),
                r#type: t.tx_type.to_string(),
                category: t.category,
                amount: t.amount,
                notes: t.notes,
            })
            .collect(),
        by_category,
    }
}

pub fn handle<S: Storage>(store: &Store<S>, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let reference = match m.get_one::<String>("month") {
        Some(month) => month_start(month)?,
        None => today(),
    };
    let state = store.state();
    let board = dashboard(state, reference);
    if maybe_print_json(json_flag, jsonl_flag, &board)? {
        return Ok(());
    }

    let sym = state.settings.currency_symbol.as_str();
    let s = &board.summary;
    println!("{}", s.label);
    let balance_note = if s.over_budget { "Over budget!" } else { "" };
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Balance", "Savings", ""],
            vec![vec![
                fmt_money(&s.income, sym),
                fmt_money(&s.expenses, sym),
                fmt_money(&s.balance, sym),
                fmt_money(&s.savings, sym),
                balance_note.to_string(),
            ]],
        )
    );

    let mut cats: Vec<(&String, &Decimal)> = board.by_category.iter().collect();
    cats.sort_by(|a, b| b.1.cmp(a.1));
    let rows = cats
        .into_iter()
        .map(|(c, amt)| vec![c.clone(), fmt_money(amt, sym)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], rows));

    if board.budgets.is_empty() {
        println!("No budgets set. Use `spendwise budget set` to add category budgets.");
    } else {
        let rows = board
            .budgets
            .iter()
            .map(|b| {
                vec![
                    if b.over { "OVER".into() } else { "ok".into() },
                    b.category.clone(),
                    format!("{} / {}", fmt_money(&b.spent, sym), fmt_money(&b.limit, sym)),
                    format!("{:.0}%", b.percent),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["", "Budget", "Spent / Limit", "Used"], rows));
    }

    let rows = board
        .recent
        .iter()
        .map(|r| {
            vec![
                r.date.clone(),
                r.r#type.clone(),
                r.category.clone(),
                fmt_money(&r.amount, sym),
                r.notes.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Type", "Category", "Amount", "Notes"], rows)
    );
    Ok(())
}
