//! Family credit card statement (CSV, one section per card holder)
//!
//! Layout:
//!   山田　太郎　様,,,,,
//!   2024/1/5,セブン－イレブン,"1,200",１回払い,,
//!   2024/1/9,ＪＲ東日本モバイルＳｕｉｃａ,"3,000",１回払い,,
//!   ,,,,,"4,200"
//!   山田　花子　様,,,,,
//!   ...
//!
//! There is no global header. Every purchase is an expense and belongs to the
//! holder named by the section it sits in.

use chrono_tz::Tz;
use csv::StringRecord;
use tracing::{debug, info};

use crate::fields::{first_cell, is_blank, parse_amount, parse_slash_date, reader};
use crate::hash::{DEFAULT_TIMEZONE, hash_key_in};
use crate::parsers::{StatementFormat, StatementParser};
use crate::types::{NormalizedTransaction, TransactionType};

pub const DEFAULT_HOLDER_SUFFIX: &str = "様";

const COL_DATE: usize = 0;
const COL_DESCRIPTION: usize = 1;
const COL_AMOUNT: usize = 2;

#[derive(Debug, Clone)]
pub struct CardStatementParser {
    holder_suffix: String,
    timezone: Tz,
}

impl Default for CardStatementParser {
    fn default() -> Self {
        Self::new(DEFAULT_HOLDER_SUFFIX, DEFAULT_TIMEZONE)
    }
}

/// Accumulator threaded through the rows of one parse call.
#[derive(Debug, Default)]
struct SectionFold {
    current_holder: Option<String>,
    rows: Vec<NormalizedTransaction>,
}

impl CardStatementParser {
    pub fn new(holder_suffix: impl Into<String>, timezone: Tz) -> Self {
        Self {
            holder_suffix: holder_suffix.into(),
            timezone,
        }
    }

    /// Holder name from a section header cell, e.g. `山田　太郎　様` -> `山田　太郎`.
    pub fn holder_name(&self, cell: &str) -> Option<String> {
        let cell = cell.trim();
        if self.holder_suffix.is_empty() || parse_slash_date(cell).is_some() {
            return None;
        }
        let name = cell.strip_suffix(self.holder_suffix.as_str())?.trim();
        if name.is_empty() {
            return None;
        }
        Some(name.to_string())
    }

    fn step(&self, mut acc: SectionFold, idx: usize, record: &StringRecord) -> SectionFold {
        if is_blank(record) {
            return acc;
        }
        let lead = first_cell(record);
        if lead.is_empty() {
            // Section subtotal.
            return acc;
        }
        if let Some(holder) = self.holder_name(lead) {
            debug!(row = idx, holder = %holder, "card section");
            acc.current_holder = Some(holder);
            return acc;
        }

        let Some(date) = parse_slash_date(lead) else {
            debug!(row = idx, cell = lead, "not a holder or transaction row");
            return acc;
        };
        let raw_description = record.get(COL_DESCRIPTION).unwrap_or("");
        let Some(amount) = record.get(COL_AMOUNT).and_then(parse_amount) else {
            debug!(row = idx, "non-numeric amount");
            return acc;
        };

        acc.rows.push(NormalizedTransaction {
            usage_date: date,
            amount,
            description: raw_description.to_string(),
            txn_type: TransactionType::Expense,
            hash_key: hash_key_in(&self.timezone, date, amount, raw_description),
            card_holder: acc.current_holder.clone(),
        });
        acc
    }
}

impl StatementParser for CardStatementParser {
    fn format(&self) -> StatementFormat {
        StatementFormat::CardStatement
    }

    fn parse(&self, content: &str) -> Vec<NormalizedTransaction> {
        let mut rdr = reader(content);
        let folded = rdr
            .records()
            .enumerate()
            .fold(SectionFold::default(), |acc, (idx, result)| match result {
                Ok(record) => self.step(acc, idx, &record),
                Err(_) => {
                    debug!(row = idx, "unreadable record skipped");
                    acc
                }
            });

        info!(format = %self.format(), rows = folded.rows.len(), "parsed statement");
        folded.rows
    }
}
