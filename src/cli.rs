// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn tx_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("type")
            .long("type")
            .short('t')
            .required(required)
            .value_parser(["income", "expense"])
            .help("income or expense"),
    )
    .arg(
        Arg::new("amount")
            .long("amount")
            .short('a')
            .required(required)
            .allow_hyphen_values(true),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .short('c')
            .required(required),
    )
    .arg(Arg::new("subcategory").long("subcategory").short('s'))
    .arg(
        Arg::new("date")
            .long("date")
            .short('d')
            .help("YYYY-MM-DD, defaults to today"),
    )
    .arg(Arg::new("time").long("time").help("HH:MM"))
    .arg(Arg::new("notes").long("notes").short('n'))
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .version(crate_version!())
        .about("Personal expense and income tracker")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("SPENDWISE_DB")
                .help("Path to the data file (defaults to the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the data file and print its location"))
        .subcommand(
            Command::new("tx")
                .about("Record, edit and list transactions")
                .subcommand(tx_fields(Command::new("add").about("Add a transaction"), true))
                .subcommand(
                    tx_fields(
                        Command::new("edit").about("Replace fields of a transaction"),
                        false,
                    )
                    .arg(Arg::new("id").required(true))
                    .arg(
                        Arg::new("clear-time")
                            .long("clear-time")
                            .action(ArgAction::SetTrue)
                            .conflicts_with("time"),
                    ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("category").long("category").short('c'))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .short('t')
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("search").long("search").short('q'))
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("quick")
                .about("Quick-add a common expense dated now")
                .arg(
                    Arg::new("item")
                        .required(true)
                        .help("tea, coffee, snacks, lunch, dinner, transport or shopping"),
                )
                .arg(Arg::new("amount").long("amount").short('a').required(true)),
        )
        .subcommand(json_flags(
            Command::new("summary")
                .about("Monthly dashboard")
                .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to this month")),
        ))
        .subcommand(
            Command::new("budget")
                .about("Per-category spending limits")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("limit").required(true)),
                )
                .subcommand(Command::new("rm").arg(Arg::new("category").required(true)))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("month").long("month").help("YYYY-MM")),
                )),
        )
        .subcommand(
            Command::new("fixed")
                .about("Recurring monthly expenses")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("month")
                .about("Lock months against edits")
                .subcommand(Command::new("lock").arg(Arg::new("month").required(true)))
                .subcommand(Command::new("unlock").arg(Arg::new("month").required(true)))
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("settings")
                .about("Display currency")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("currency").arg(
                        Arg::new("choice")
                            .required(true)
                            .help("Symbol or code: ₹/INR, $/USD, €/EUR, £/GBP"),
                    ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export all transactions as CSV")
                .arg(Arg::new("out").long("out").short('o')),
        )
        .subcommand(
            Command::new("reset").about("Erase all data").arg(
                Arg::new("yes")
                    .long("yes")
                    .action(ArgAction::SetTrue)
                    .help("Confirm the reset"),
            ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }
}
