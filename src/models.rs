// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid type '{}', expected income|expense",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    pub amount: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>, // HH:MM
    #[serde(default)]
    pub notes: String,
}

/// Transaction fields minus the id, as carried by `Action::AddTransaction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub tx_type: TxType,
    pub amount: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl NewTransaction {
    pub fn with_id(self, id: String) -> Transaction {
        Transaction {
            id,
            tx_type: self.tx_type,
            amount: self.amount,
            category: self.category,
            subcategory: self.subcategory,
            date: self.date,
            time: self.time,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: String,
    pub category: String,
    pub amount: Decimal, // charged every month
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub limit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub currency: String,
    #[serde(rename = "currencySymbol")]
    pub currency_symbol: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl AppSettings {
    /// Resolve a currency by symbol or ISO code. Unknown symbols fall back to INR.
    pub fn from_choice(choice: &str) -> Self {
        let choice = choice.trim();
        if let Some((sym, code)) = CURRENCY_PRESETS
            .iter()
            .find(|(sym, code)| *sym == choice || code.eq_ignore_ascii_case(choice))
        {
            return Self {
                currency: code.to_string(),
                currency_symbol: sym.to_string(),
            };
        }
        Self {
            currency: "INR".to_string(),
            currency_symbol: choice.to_string(),
        }
    }
}

pub const CURRENCY_PRESETS: [(&str, &str); 4] =
    [("₹", "INR"), ("$", "USD"), ("€", "EUR"), ("£", "GBP")];

pub const EXPENSE_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Rent",
    "Utilities",
    "Shopping",
    "Entertainment",
    "Medical",
    "Others",
];

pub const INCOME_CATEGORIES: [&str; 4] = ["Salary", "Freelance", "Bonus", "Others"];

pub const FOOD_SUBCATEGORIES: [&str; 5] = ["Tea", "Coffee", "Snacks", "Lunch", "Dinner"];

pub fn suggested_categories(tx_type: TxType) -> &'static [&'static str] {
    match tx_type {
        TxType::Income => &INCOME_CATEGORIES,
        TxType::Expense => &EXPENSE_CATEGORIES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_choice_by_symbol_or_code() {
        let s = AppSettings::from_choice("$");
        assert_eq!(s.currency, "USD");
        let s = AppSettings::from_choice("gbp");
        assert_eq!(s.currency_symbol, "£");
        let s = AppSettings::from_choice("¥");
        assert_eq!(s.currency, "INR");
        assert_eq!(s.currency_symbol, "¥");
    }

    #[test]
    fn settings_blob_uses_camel_case_symbol() {
        let json = serde_json::to_string(&AppSettings::default()).unwrap();
        assert_eq!(json, r#"{"currency":"INR","currencySymbol":"₹"}"#);
    }

    #[test]
    fn transaction_type_serializes_lowercase() {
        let json = serde_json::to_value(TxType::Expense).unwrap();
        assert_eq!(json, serde_json::json!("expense"));
        assert_eq!("Income".parse::<TxType>().unwrap(), TxType::Income);
        assert!("transfer".parse::<TxType>().is_err());
    }
}
