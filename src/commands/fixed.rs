// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calculations::fixed_total;
use crate::db::Storage;
use crate::store::{Action, Store};
use crate::utils::{arg, fmt_money, maybe_print_json, parse_decimal, pretty_table};
use crate::validation::validate_category_amount;
use anyhow::Result;

pub fn handle<S: Storage>(store: &mut Store<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let amount = parse_decimal(arg(sub, "amount")?)?;
            let category = validate_category_amount(arg(sub, "category")?, amount)?;
            let id = store.add_fixed_expense(category.clone(), amount);
            println!("Fixed expense added: {} (id {})", category, id);
        }
        Some(("rm", sub)) => {
            let id = arg(sub, "id")?.to_string();
            if !store.state().fixed_expenses.iter().any(|f| f.id == id) {
                return Err(anyhow::anyhow!("Fixed expense '{}' not found", id));
            }
            store.dispatch(Action::DeleteFixedExpense(id.clone()));
            println!("Removed fixed expense {}", id);
        }
        Some(("list", sub)) => {
            let state = store.state();
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            if !maybe_print_json(json_flag, jsonl_flag, &state.fixed_expenses)? {
                let sym = state.settings.currency_symbol.as_str();
                let mut rows: Vec<Vec<String>> = state
                    .fixed_expenses
                    .iter()
                    .map(|f| vec![f.category.clone(), fmt_money(&f.amount, sym), f.id.clone()])
                    .collect();
                rows.push(vec![
                    "Total / month".into(),
                    fmt_money(&fixed_total(&state.fixed_expenses), sym),
                    String::new(),
                ]);
                println!("{}", pretty_table(&["Category", "Amount", "Id"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
