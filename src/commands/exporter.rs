// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Storage;
use crate::export::{default_filename, write_csv};
use crate::store::Store;
use crate::utils::today;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;

pub fn handle<S: Storage>(store: &Store<S>, m: &clap::ArgMatches) -> Result<()> {
    let out = match m.get_one::<String>("out") {
        Some(path) => path.clone(),
        None => default_filename(today()),
    };
    let state = store.state();
    let file = File::create(&out).with_context(|| format!("Create {}", out))?;
    write_csv(
        BufWriter::new(file),
        &state.transactions,
        &state.settings.currency_symbol,
    )?;
    println!(
        "Exported {} transactions to {}",
        state.transactions.len(),
        out
    );
    Ok(())
}
