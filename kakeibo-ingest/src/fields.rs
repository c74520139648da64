//! Cell-level helpers shared by the statement parsers.

use chrono::NaiveDate;
use csv::StringRecord;

/// Parse `YYYY/M/D` (four-digit year, one or two digit month and day).
pub fn parse_slash_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().split('/');
    let (y, m, d) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    if y.len() != 4 || !(1..=2).contains(&m.len()) || !(1..=2).contains(&d.len()) {
        return None;
    }
    if ![y, m, d].iter().all(|p| p.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
}

/// Parse a statement amount: thousands separators stripped, digits only.
pub fn parse_amount(raw: &str) -> Option<u64> {
    let s = raw.trim().replace(',', "");
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// A cell counts as present when it has anything besides whitespace.
pub fn non_empty(cell: Option<&str>) -> Option<&str> {
    cell.filter(|c| !c.trim().is_empty())
}

/// First cell with surrounding whitespace and a stray byte-order mark removed.
pub fn first_cell(record: &StringRecord) -> &str {
    record
        .get(0)
        .unwrap_or("")
        .trim_start_matches('\u{feff}')
        .trim()
}

pub fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|c| c.trim().is_empty())
}

/// Reader settings shared by every layout: no header handling, ragged rows allowed.
pub fn reader(content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes())
}
