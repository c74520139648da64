//! Bank account with an attached Visa debit card (CSV)
//!
//! Layout:
//!   取引日,出金額,入金額,摘要,残高,メモ,ラベル
//!   2024/2/3,"1,280",,V123456 AMAZON.CO.JP,"98,720",,
//!
//! Debit purchases carry a leading transaction code that is cleansed away for
//! display. Cash withdrawals and wallet top-ups are transfers: the money stays
//! with the account holder.

use chrono_tz::Tz;
use tracing::{debug, info};

use crate::cleanse::cleanse_description;
use crate::fields::{first_cell, non_empty, parse_amount, parse_slash_date, reader};
use crate::hash::{DEFAULT_TIMEZONE, hash_key_in};
use crate::parsers::{StatementFormat, StatementParser};
use crate::types::{NormalizedTransaction, TransactionType};

pub const HEADER_TOKEN: &str = "取引日";

/// Cash machine withdrawals and PayPay wallet charges.
pub const DEFAULT_TRANSFER_MARKERS: &[&str] = &["ATM", "ＰａｙＰａｙ(ﾁｬｰｼﾞ)"];

const COL_DATE: usize = 0;
const COL_WITHDRAWAL: usize = 1;
const COL_DEPOSIT: usize = 2;
const COL_DESCRIPTION: usize = 3;

#[derive(Debug, Clone)]
pub struct DebitBankParser {
    transfer_markers: Vec<String>,
    timezone: Tz,
}

impl Default for DebitBankParser {
    fn default() -> Self {
        Self::new(
            DEFAULT_TRANSFER_MARKERS.iter().map(|m| m.to_string()).collect(),
            DEFAULT_TIMEZONE,
        )
    }
}

impl DebitBankParser {
    pub fn new(transfer_markers: Vec<String>, timezone: Tz) -> Self {
        Self {
            transfer_markers,
            timezone,
        }
    }

    fn is_transfer(&self, raw_description: &str) -> bool {
        self.transfer_markers
            .iter()
            .any(|m| !m.is_empty() && raw_description.contains(m.as_str()))
    }
}

impl StatementParser for DebitBankParser {
    fn format(&self) -> StatementFormat {
        StatementFormat::DebitBank
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

            let (amount_cell, is_deposit) = match (
                non_empty(record.get(COL_DEPOSIT)),
                non_empty(record.get(COL_WITHDRAWAL)),
            ) {
                (Some(dep), _) => (dep, true),
                (None, Some(wd)) => (wd, false),
                (None, None) => {
                    debug!(row = idx, "neither deposit nor withdrawal present");
                    continue;
                }
            };
            let Some(amount) = parse_amount(amount_cell) else {
                debug!(row = idx, cell = amount_cell, "non-numeric amount");
                continue;
            };

            let txn_type = if is_deposit {
                TransactionType::Income
            } else if self.is_transfer(raw_description) {
                TransactionType::Transfer
            } else {
                TransactionType::Expense
            };

            out.push(NormalizedTransaction {
                usage_date: date,
                amount,
                description: cleanse_description(raw_description),
                txn_type,
                hash_key: hash_key_in(&self.timezone, date, amount, raw_description),
                card_holder: None,
            });
        }

        info!(format = %self.format(), rows = out.len(), "parsed statement");
        out
    }
}
