//! Strip debit-network transaction codes from descriptions.
//!
//! Debit rows arrive as `V123456 AMAZON.CO.JP`: a capital letter, exactly six
//! digits, a separator, then the merchant. Only that leading shape is removed.

use regex::Regex;
use std::sync::LazyLock;

static CODE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^[A-Z][0-9]{6}[ \t\u{3000}]+(\S.*)$").expect("valid code prefix regex")
});

/// Return the label after a leading transaction code, or the trimmed input
/// when no code is followed by text.
pub fn cleanse_description(raw: &str) -> String {
    let trimmed = raw.trim();
    match CODE_PREFIX.captures(trimmed) {
        Some(caps) => caps[1].trim().to_string(),
        None => trimmed.to_string(),
    }
}
