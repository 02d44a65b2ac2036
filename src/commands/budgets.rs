// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calculations::{budget_status, expenses_by_category, month_transactions};
use crate::db::Storage;
use crate::models::Budget;
use crate::store::{Action, Store};
use crate::utils::{
    arg, fmt_money, maybe_print_json, month_start, parse_decimal, pretty_table, today,
};
use crate::validation::validate_category_amount;
use anyhow::Result;

pub fn handle<S: Storage>(store: &mut Store<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn set<S: Storage>(store: &mut Store<S>, sub: &clap::ArgMatches) -> Result<()> {
    let limit = parse_decimal(arg(sub, "limit")?)?;
    let category = validate_category_amount(arg(sub, "category")?, limit)?;
    store.dispatch(Action::SetBudget(Budget {
        category: category.clone(),
        limit,
    }));
    println!(
        "Budget set for {} = {}",
        category,
        fmt_money(&limit, &store.state().settings.currency_symbol)
    );
    Ok(())
}

fn remove<S: Storage>(store: &mut Store<S>, sub: &clap::ArgMatches) -> Result<()> {
    let category = arg(sub, "category")?.trim().to_string();
    if store.state().budget_for(&category).is_none() {
        return Err(anyhow::anyhow!("No budget for '{}'", category));
    }
    store.dispatch(Action::DeleteBudget(category.clone()));
    println!("Removed budget for {}", category);
    Ok(())
}

fn list<S: Storage>(store: &Store<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let reference = match sub.get_one::<String>("month") {
        Some(month) => month_start(month)?,
        None => today(),
    };
    let state = store.state();
    let month = month_transactions(&state.transactions, reference);
    let status = budget_status(&state.budgets, &expenses_by_category(&month));
    if !maybe_print_json(json_flag, jsonl_flag, &status)? {
        let sym = state.settings.currency_symbol.as_str();
        let rows = status
            .iter()
            .map(|b| {
                vec![
                    b.category.clone(),
                    fmt_money(&b.limit, sym),
                    fmt_money(&b.spent, sym),
                    if b.over { "over".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Limit", "Spent", ""], rows)
        );
    }
    Ok(())
}
