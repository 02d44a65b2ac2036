// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Storage;
use crate::models::AppSettings;
use crate::store::{Action, Store};
use crate::utils::{arg, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<S: Storage>(store: &mut Store<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = &store.state().settings;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), s)? {
                println!(
                    "{}",
                    pretty_table(
                        &["Currency", "Symbol"],
                        vec![vec![s.currency.clone(), s.currency_symbol.clone()]],
                    )
                );
            }
        }
        Some(("currency", sub)) => {
            let settings = AppSettings::from_choice(arg(sub, "choice")?);
            println!(
                "Currency set to {} {}",
                settings.currency_symbol, settings.currency
            );
            store.dispatch(Action::UpdateSettings(settings));
        }
        _ => {}
    }
    Ok(())
}
