// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calculations::{TransactionFilter, filter_transactions};
use crate::db::Storage;
use crate::models::{FOOD_SUBCATEGORIES, TxType, suggested_categories};
use crate::store::{Action, Store};
use crate::utils::{
    arg, fmt_money, maybe_print_json, month_start, parse_date, parse_decimal, pretty_table, today,
};
use crate::validation::{
    TransactionInput, validate_delete, validate_new_transaction, validate_update,
};
use anyhow::Result;
use log::info;
use serde::Serialize;

pub fn handle<S: Storage>(store: &mut Store<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: Storage>(store: &mut Store<S>, sub: &clap::ArgMatches) -> Result<()> {
    let tx_type: TxType = arg(sub, "type")?.parse()?;
    let amount = parse_decimal(arg(sub, "amount")?)?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let input = TransactionInput {
        tx_type,
        amount,
        category: arg(sub, "category")?.to_string(),
        subcategory: sub.get_one::<String>("subcategory").cloned(),
        date: Some(date),
        time: sub.get_one::<String>("time").cloned(),
        notes: sub.get_one::<String>("notes").cloned().unwrap_or_default(),
    };
    let new = validate_new_transaction(store.state(), input)?;
    if !suggested_categories(tx_type).contains(&new.category.as_str()) {
        info!("'{}' is not a suggested {} category", new.category, tx_type);
    }
    if let Some(sub) = new.subcategory.as_deref().filter(|s| !FOOD_SUBCATEGORIES.contains(s)) {
        info!("'{}' is not a suggested food subcategory", sub);
    }
    let (category, when) = (new.category.clone(), new.date);
    let id = store.add_transaction(new);
    println!(
        "{} added: {} {} on {} (id {})",
        if tx_type == TxType::Income { "Income" } else { "Expense" },
        fmt_money(&amount, &store.state().settings.currency_symbol),
        category,
        when,
        id
    );
    Ok(())
}

fn edit<S: Storage>(store: &mut Store<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id")?;
    let mut tx = store
        .state()
        .find_transaction(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Transaction '{}' not found", id))?;

    if let Some(t) = sub.get_one::<String>("type") {
        tx.tx_type = t.parse()?;
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        tx.amount = parse_decimal(a)?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        tx.category = c.trim().to_string();
    }
    if let Some(s) = sub.get_one::<String>("subcategory") {
        tx.subcategory = Some(s.trim().to_string()).filter(|s| !s.is_empty());
    }
    if let Some(d) = sub.get_one::<String>("date") {
        tx.date = parse_date(d)?;
    }
    if let Some(t) = sub.get_one::<String>("time") {
        tx.time = Some(t.trim().to_string());
    }
    if sub.get_flag("clear-time") {
        tx.time = None;
    }
    if let Some(n) = sub.get_one::<String>("notes") {
        tx.notes = n.trim().to_string();
    }
    if !(tx.tx_type == TxType::Expense && tx.category == "Food") {
        tx.subcategory = None;
    }

    validate_update(store.state(), &tx)?;
    store.dispatch(Action::UpdateTransaction(tx));
    println!("Updated transaction {}", id);
    Ok(())
}

fn remove<S: Storage>(store: &mut Store<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id")?.to_string();
    validate_delete(store.state(), &id)?;
    store.dispatch(Action::DeleteTransaction(id.clone()));
    println!("Deleted transaction {}", id);
    Ok(())
}

fn list<S: Storage>(store: &Store<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.time.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    r.subcategory.clone(),
                    r.amount.clone(),
                    r.notes.clone(),
                    if r.locked { "locked".into() } else { String::new() },
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Time", "Type", "Category", "Sub", "Amount", "Notes", "", "Id"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub time: String,
    pub r#type: String,
    pub category: String,
    pub subcategory: String,
    pub amount: String,
    pub notes: String,
    pub locked: bool,
}

pub fn query_rows<S: Storage>(
    store: &Store<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let state = store.state();
    let filter = TransactionFilter {
        category: sub.get_one::<String>("category").cloned(),
        tx_type: sub
            .get_one::<String>("type")
            .map(|t| t.parse::<TxType>())
            .transpose()?,
        search: sub.get_one::<String>("search").cloned(),
        month: sub
            .get_one::<String>("month")
            .map(|m| month_start(m))
            .transpose()?,
    };
    let mut matched = filter_transactions(&state.transactions, &filter);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        matched.truncate(*limit);
    }
    Ok(matched
        .into_iter()
        .map(|t| TransactionRow {
            locked: state.is_transaction_locked(&t),
            amount: t.amount.to_string(),
            date: t.date.to_string(),
            time: t.time.unwrap_or_default(),
            r#type: t.tx_type.to_string(),
            category: t.category,
            subcategory: t.subcategory.unwrap_or_default(),
            notes: t.notes,
            id: t.id,
        })
        .collect())
}
