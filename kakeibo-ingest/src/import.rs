//! Glue between raw statement files and the parsers: decoding, layout
//! sniffing, and skipping rows whose dedup key is already stored.

use std::collections::HashSet;

use encoding_rs::SHIFT_JIS;
use tracing::{debug, info};

use crate::config::ParserConfig;
use crate::error::{IngestError, Result};
use crate::fields::{first_cell, is_blank, parse_slash_date, reader};
use crate::parsers::{StatementFormat, card_statement, debit_bank, sumishin_sbi};
use crate::types::NormalizedTransaction;

/// How many leading records are inspected when looking for a card holder row.
const SNIFF_DEPTH: usize = 10;

/// Decode statement bytes into text.
///
/// Japanese banks export Shift_JIS by default and UTF-8 (often with a BOM)
/// on request.
pub fn decode_statement(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }
    let (decoded, _, had_errors) = SHIFT_JIS.decode(bytes);
    if had_errors {
        debug!("statement is neither UTF-8 nor clean Shift_JIS; decoded lossily");
    }
    decoded.into_owned()
}

impl StatementFormat {
    /// Guess the layout from the first rows, using the default holder suffix.
    pub fn sniff(content: &str) -> Option<StatementFormat> {
        Self::sniff_with(content, card_statement::DEFAULT_HOLDER_SUFFIX)
    }

    pub fn sniff_with(content: &str, holder_suffix: &str) -> Option<StatementFormat> {
        let mut rdr = reader(content);
        let leading: Vec<String> = rdr
            .records()
            .filter_map(|r| r.ok())
            .filter(|r| !is_blank(r))
            .take(SNIFF_DEPTH)
            .map(|r| first_cell(&r).to_string())
            .collect();

        match leading.first().map(String::as_str) {
            Some(sumishin_sbi::HEADER_TOKEN) => return Some(StatementFormat::SumishinSbi),
            Some(debit_bank::HEADER_TOKEN) => return Some(StatementFormat::DebitBank),
            _ => {}
        }

        let has_holder_row = !holder_suffix.is_empty()
            && leading.iter().any(|cell| {
                cell.ends_with(holder_suffix)
                    && cell.len() > holder_suffix.len()
                    && parse_slash_date(cell).is_none()
            });
        has_holder_row.then_some(StatementFormat::CardStatement)
    }
}

/// Result of importing one statement against the keys already stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportBatch {
    pub format: StatementFormat,
    /// Rows to hand to storage, in statement order.
    pub fresh: Vec<NormalizedTransaction>,
    /// Rows whose key was already stored or appeared earlier in this batch.
    pub skipped: Vec<NormalizedTransaction>,
}

impl ImportBatch {
    pub fn parsed_count(&self) -> usize {
        self.fresh.len() + self.skipped.len()
    }
}

/// Parse `content` and split the rows into fresh and already-seen.
///
/// `format` overrides sniffing. Zero parsed rows is an error here, because
/// for the person importing the file it always means something went wrong.
pub fn import_statement(
    content: &str,
    format: Option<StatementFormat>,
    config: &ParserConfig,
    seen: &HashSet<String>,
) -> Result<ImportBatch> {
    let format = match format {
        Some(f) => f,
        None => StatementFormat::sniff_with(content, &config.holder_suffix).ok_or_else(|| {
            IngestError::UnknownFormat(describe_first_line(content))
        })?,
    };

    let parsed = config.parser_for(format).parse(content);
    if parsed.is_empty() {
        return Err(IngestError::NoTransactions);
    }

    let mut batch_keys: HashSet<String> = HashSet::new();
    let (fresh, skipped): (Vec<_>, Vec<_>) = parsed
        .into_iter()
        .partition(|txn| !seen.contains(&txn.hash_key) && batch_keys.insert(txn.hash_key.clone()));

    info!(
        format = %format,
        fresh = fresh.len(),
        skipped = skipped.len(),
        "imported statement"
    );
    Ok(ImportBatch {
        format,
        fresh,
        skipped,
    })
}

fn describe_first_line(content: &str) -> String {
    let line = content
        .trim_start_matches('\u{feff}')
        .lines()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("");
    let mut shown: String = line.chars().take(40).collect();
    if line.chars().count() > 40 {
        shown.push('…');
    }
    format!("first line {shown:?}")
}
