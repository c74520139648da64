//! SBI Sumishin Net Bank account statement (CSV)
//!
//! Layout:
//!   "日付","内容","出金金額(円)","入金金額(円)","残高(円)","メモ"
//!   "2024/1/15","ハイブリッド預金","10,000","","120,000",""
//!
//! Descriptions are kept as-is. Moves to or from the linked brokerage
//! ("hybrid deposit") are transfers rather than income or spend.

use chrono_tz::Tz;
use tracing::{debug, info};

use crate::fields::{first_cell, non_empty, parse_amount, parse_slash_date, reader};
use crate::hash::{DEFAULT_TIMEZONE, hash_key_in};
use crate::parsers::{StatementFormat, StatementParser};
use crate::types::{NormalizedTransaction, TransactionType};

pub const HEADER_TOKEN: &str = "日付";

pub const DEFAULT_TRANSFER_KEYWORDS: &[&str] = &["ハイブリッド預金"];

const COL_DATE: usize = 0;
const COL_DESCRIPTION: usize = 1;
const COL_WITHDRAWAL: usize = 2;
const COL_DEPOSIT: usize = 3;

#[derive(Debug, Clone)]
pub struct SumishinSbiParser {
    transfer_keywords: Vec<String>,
    timezone: Tz,
}

impl Default for SumishinSbiParser {
    fn default() -> Self {
        Self::new(
            DEFAULT_TRANSFER_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            DEFAULT_TIMEZONE,
        )
    }
}

impl SumishinSbiParser {
    pub fn new(transfer_keywords: Vec<String>, timezone: Tz) -> Self {
        Self {
            transfer_keywords,
            timezone,
        }
    }

    fn is_transfer(&self, raw_description: &str) -> bool {
        self.transfer_keywords
            .iter()
            .any(|k| !k.is_empty() && raw_description.contains(k.as_str()))
    }
}

impl StatementParser for SumishinSbiParser {
    fn format(&self) -> StatementFormat {
        StatementFormat::SumishinSbi
    }

    fn parse(&self, content: &str) -> Vec<NormalizedTransaction> {
        let mut rdr = reader(content);
        let mut out = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let Ok(record) = result else {
                debug!(row = idx, "unreadable record skipped");
                continue;
            };
            if first_cell(&record) == HEADER_TOKEN {
                continue;
            }

            let Some(date) = record.get(COL_DATE).and_then(parse_slash_date) else {
                debug!(row = idx, "no usable date");
                continue;
            };
            let raw_description = record.get(COL_DESCRIPTION).unwrap_or("");

            // Deposit wins when both columns are filled.
            let (amount_cell, base_type) = match (
                non_empty(record.get(COL_DEPOSIT)),
                non_empty(record.get(COL_WITHDRAWAL)),
            ) {
                (Some(dep), _) => (dep, TransactionType::Income),
                (None, Some(wd)) => (wd, TransactionType::Expense),
                (None, None) => {
                    debug!(row = idx, "neither deposit nor withdrawal present");
                    continue;
                }
            };
            let Some(amount) = parse_amount(amount_cell) else {
                debug!(row = idx, cell = amount_cell, "non-numeric amount");
                continue;
            };

            let txn_type = if self.is_transfer(raw_description) {
                TransactionType::Transfer
            } else {
                base_type
            };

            out.push(NormalizedTransaction {
                usage_date: date,
                amount,
                description: raw_description.to_string(),
                txn_type,
                hash_key: hash_key_in(&self.timezone, date, amount, raw_description),
                card_holder: None,
            });
        }

        info!(format = %self.format(), rows = out.len(), "parsed statement");
        out
    }
}
