use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a statement row moves money, assigned by the parser that read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "expense")]
    Expense,
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "transfer")]
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
            TransactionType::Transfer => "transfer",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Normalized output of statement parsers (issuer-agnostic)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTransaction {
    pub usage_date: NaiveDate,
    /// Amount exactly as printed on the statement ("3,670" -> 3670). Never negative.
    pub amount: u64,
    /// Display label; cleansed for formats that carry transaction codes.
    pub description: String,
    #[serde(rename = "type")]
    pub txn_type: TransactionType,
    /// Dedup key over (usage_date, amount, raw description), see [`crate::hash`].
    pub hash_key: String,
    /// Only set by the card statement parser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_holder: Option<String>,
}

impl NormalizedTransaction {
    pub fn is_expense(&self) -> bool {
        self.txn_type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.txn_type == TransactionType::Income
    }

    pub fn is_transfer(&self) -> bool {
        self.txn_type == TransactionType::Transfer
    }
}
