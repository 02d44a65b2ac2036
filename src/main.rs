// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use spendwise::db::{self, SqliteStorage};
use spendwise::store::Store;
use spendwise::{cli, commands};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = match matches.get_one::<String>("db") {
        Some(p) => PathBuf::from(p),
        None => db::db_path()?,
    };
    let mut store = Store::open(SqliteStorage::open(&path)?);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Data file at {}", path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut store, sub)?,
        Some(("quick", sub)) => commands::quick::handle(&mut store, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&store, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut store, sub)?,
        Some(("fixed", sub)) => commands::fixed::handle(&mut store, sub)?,
        Some(("month", sub)) => commands::months::handle(&mut store, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("reset", sub)) => commands::reset::handle(&mut store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
