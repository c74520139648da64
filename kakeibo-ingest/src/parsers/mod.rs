//! Issuer-specific statement parsers.
//!
//! Each parser assumes its own fixed layout; picking the layout for a file is
//! the caller's job (see [`crate::import`]).

pub mod card_statement;
pub mod debit_bank;
pub mod sumishin_sbi;

pub use card_statement::CardStatementParser;
pub use debit_bank::DebitBankParser;
pub use sumishin_sbi::SumishinSbiParser;

use serde::{Deserialize, Serialize};

use crate::types::NormalizedTransaction;

/// Turns the decoded text of one statement export into normalized rows.
///
/// Rows without a usable date or amount are dropped; parsing never fails.
pub trait StatementParser: Send + Sync {
    fn format(&self) -> StatementFormat;
    fn parse(&self, content: &str) -> Vec<NormalizedTransaction>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementFormat {
    SumishinSbi,
    DebitBank,
    CardStatement,
}

pub const ALL_FORMATS: &[StatementFormat] = &[
    StatementFormat::SumishinSbi,
    StatementFormat::DebitBank,
    StatementFormat::CardStatement,
];

impl StatementFormat {
    pub fn key(&self) -> &'static str {
        match self {
            Self::SumishinSbi => "sumishin_sbi",
            Self::DebitBank => "debit_bank",
            Self::CardStatement => "card_statement",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SumishinSbi => "SBI Sumishin Net Bank",
            Self::DebitBank => "Bank account with debit card",
            Self::CardStatement => "Credit card statement",
        }
    }

    pub fn from_key(key: &str) -> Option<StatementFormat> {
        ALL_FORMATS.iter().find(|f| f.key() == key).copied()
    }
}

impl std::fmt::Display for StatementFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.key())
    }
}
