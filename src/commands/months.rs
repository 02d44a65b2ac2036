// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Storage;
use crate::store::{Action, Store};
use crate::utils::{arg, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;

pub fn handle<S: Storage>(store: &mut Store<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("lock", sub)) => {
            let month = parse_month(arg(sub, "month")?)?;
            store.dispatch(Action::LockMonth(month.clone()));
            println!("Locked {}", month);
        }
        Some(("unlock", sub)) => {
            let month = parse_month(arg(sub, "month")?)?;
            if !store.state().locked_months.contains(&month) {
                println!("{} was not locked", month);
                return Ok(());
            }
            store.dispatch(Action::UnlockMonth(month.clone()));
            println!("Unlocked {}", month);
        }
        Some(("list", sub)) => {
            let months: Vec<&String> = store.state().locked_months.iter().collect();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &months)? {
                let rows = months.into_iter().map(|m| vec![m.clone()]).collect();
                println!("{}", pretty_table(&["Locked month"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
