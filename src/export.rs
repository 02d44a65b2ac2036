// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use anyhow::Result;
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

pub const CSV_HEADER: [&str; 7] = [
    "Date",
    "Time",
    "Type",
    "Category",
    "Subcategory",
    "Amount",
    "Notes",
];

pub fn default_filename(today: NaiveDate) -> String {
    format!("spendwise-export-{}.csv", today.format("%Y-%m-%d"))
}

/// Notes are always quoted; every other column is written as-is.
fn quote_notes(notes: &str) -> String {
    format!("\"{}\"", notes.replace('"', "\"\""))
}

/// Write transactions oldest first. Rows sharing a date keep their stored order.
/// Lines are joined with `\n`; the last one has no terminator.
pub fn write_csv<W: Write>(
    mut out: W,
    transactions: &[Transaction],
    currency_symbol: &str,
) -> Result<()> {
    let mut rows: Vec<&Transaction> = transactions.iter().collect();
    rows.sort_by_key(|t| t.date);

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for t in rows {
        wtr.write_record([
            t.date.format("%d/%m/%Y").to_string(),
            t.time.clone().unwrap_or_default(),
            t.tx_type.to_string(),
            t.category.clone(),
            t.subcategory.clone().unwrap_or_default(),
            format!("{}{}", currency_symbol, t.amount.normalize()),
            quote_notes(&t.notes),
        ])?;
    }
    let mut buf = wtr.into_inner().map_err(|e| e.into_error())?;
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    out.write_all(&buf)?;
    out.flush()?;
    Ok(())
}

pub fn render_csv(transactions: &[Transaction], currency_symbol: &str) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, transactions, currency_symbol)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TxType;
    use rust_decimal::Decimal;

    fn tx(date: (i32, u32, u32), amount: Decimal, notes: &str) -> Transaction {
        Transaction {
            id: notes.into(),
            tx_type: TxType::Expense,
            amount,
            category: "Food".into(),
            subcategory: Some("Lunch".into()),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            time: Some("13:05".into()),
            notes: notes.into(),
        }
    }

    #[test]
    fn rows_sorted_and_notes_escaped() {
        let txs = vec![
            tx((2024, 3, 9), Decimal::new(1250, 2), r#"said "hi""#),
            tx((2024, 3, 1), Decimal::from(200), ""),
        ];
        let csv = render_csv(&txs, "₹").unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Date,Time,Type,Category,Subcategory,Amount,Notes");
        assert_eq!(lines[1], r#"01/03/2024,13:05,expense,Food,Lunch,₹200,"""#);
        assert_eq!(lines[2], r#"09/03/2024,13:05,expense,Food,Lunch,₹12.5,"said ""hi""""#);
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn empty_export_is_just_the_header() {
        let csv = render_csv(&[], "$").unwrap();
        assert_eq!(csv, "Date,Time,Type,Category,Subcategory,Amount,Notes");
    }

    #[test]
    fn filename_carries_date() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
        assert_eq!(default_filename(d), "spendwise-export-2026-01-07.csv");
    }
}
