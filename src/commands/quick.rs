// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Storage;
use crate::models::TxType;
use crate::store::Store;
use crate::utils::{arg, fmt_money, parse_decimal};
use crate::validation::{TransactionInput, validate_new_transaction};
use anyhow::Result;
use chrono::NaiveDateTime;

pub struct QuickItem {
    pub key: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub subcategory: Option<&'static str>,
}

pub static QUICK_ITEMS: [QuickItem; 7] = [
    QuickItem { key: "tea", label: "Tea", category: "Food", subcategory: Some("Tea") },
    QuickItem { key: "coffee", label: "Coffee", category: "Food", subcategory: Some("Coffee") },
    QuickItem { key: "snacks", label: "Snacks", category: "Food", subcategory: Some("Snacks") },
    QuickItem { key: "lunch", label: "Lunch", category: "Food", subcategory: Some("Lunch") },
    QuickItem { key: "dinner", label: "Dinner", category: "Food", subcategory: Some("Dinner") },
    QuickItem { key: "transport", label: "Transport", category: "Transport", subcategory: None },
    QuickItem { key: "shopping", label: "Shopping", category: "Shopping", subcategory: None },
];

pub fn find_item(key: &str) -> Option<&'static QuickItem> {
    let key = key.trim().to_lowercase();
    QUICK_ITEMS.iter().find(|i| i.key == key)
}

pub fn handle<S: Storage>(store: &mut Store<S>, m: &clap::ArgMatches) -> Result<()> {
    let now = chrono::Local::now().naive_local();
    quick_add(store, m, now)
}

/// Add the preset expense stamped with `now`.
pub fn quick_add<S: Storage>(
    store: &mut Store<S>,
    m: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    let key = arg(m, "item")?;
    let item = find_item(key).ok_or_else(|| {
        let known: Vec<&str> = QUICK_ITEMS.iter().map(|i| i.key).collect();
        anyhow::anyhow!("Unknown quick item '{}' (use {})", key, known.join("|"))
    })?;
    let amount = parse_decimal(arg(m, "amount")?)?;
    let input = TransactionInput {
        tx_type: TxType::Expense,
        amount,
        category: item.category.to_string(),
        subcategory: item.subcategory.map(str::to_string),
        date: Some(now.date()),
        time: Some(now.format("%H:%M").to_string()),
        notes: format!("Quick add: {}", item.label),
    };
    let new = validate_new_transaction(store.state(), input)?;
    store.add_transaction(new);
    println!(
        "{} - {} added!",
        item.label,
        fmt_money(&amount, &store.state().settings.currency_symbol)
    );
    Ok(())
}
