//! Content-derived dedup keys.
//!
//! `sha256("{instant}|{amount}|{raw_description}")` where `instant` is local
//! midnight of the usage date in the statement timezone, rendered in UTC as
//! `YYYY-MM-DDTHH:MM:SS.sssZ`. Existing stored keys depend on this exact
//! layout, so it must not change.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use sha2::{Digest, Sha256};

/// Timezone statements are written in unless configured otherwise.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;

/// Dedup key in the default statement timezone.
pub fn hash_key(date: NaiveDate, amount: u64, raw_description: &str) -> String {
    hash_key_in(&DEFAULT_TIMEZONE, date, amount, raw_description)
}

/// Dedup key with an explicit statement timezone.
///
/// `raw_description` must be the untouched cell value, never the cleansed label.
pub fn hash_key_in(tz: &Tz, date: NaiveDate, amount: u64, raw_description: &str) -> String {
    let canonical = format!(
        "{}|{}|{}",
        local_midnight_instant(tz, date),
        amount,
        raw_description
    );
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

fn local_midnight_instant(tz: &Tz, date: NaiveDate) -> String {
    let instant: DateTime<Utc> = (0..24)
        .filter_map(|h| NaiveTime::from_hms_opt(h, 0, 0))
        .find_map(|t| tz.from_local_datetime(&date.and_time(t)).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN).and_utc());
    instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_midnight_tokyo_is_previous_day_in_utc() {
        assert_eq!(
            local_midnight_instant(&DEFAULT_TIMEZONE, d(2024, 1, 15)),
            "2024-01-14T15:00:00.000Z"
        );
    }

    #[test]
    fn test_known_digest() {
        // sha256("2024-01-14T15:00:00.000Z|3670|AMAZON")
        let mut hasher = Sha256::new();
        hasher.update(b"2024-01-14T15:00:00.000Z|3670|AMAZON");
        let expected = hex::encode(hasher.finalize());
        assert_eq!(hash_key(d(2024, 1, 15), 3670, "AMAZON"), expected);
        assert_eq!(expected.len(), 64);
    }

    #[test]
    fn test_hash_is_stable() {
        let a = hash_key(d(2024, 3, 1), 1200, "セブン－イレブン");
        let b = hash_key(d(2024, 3, 1), 1200, "セブン－イレブン");
        assert_eq!(a, b);
    }

    #[test]
    fn test_each_field_changes_the_key() {
        let base = hash_key(d(2024, 3, 1), 1200, "LAWSON");
        assert_ne!(base, hash_key(d(2024, 3, 2), 1200, "LAWSON"));
        assert_ne!(base, hash_key(d(2024, 3, 1), 1201, "LAWSON"));
        assert_ne!(base, hash_key(d(2024, 3, 1), 1200, "LAWSON "));
    }

    #[test]
    fn test_timezone_is_part_of_the_key() {
        let tokyo = hash_key_in(&chrono_tz::Asia::Tokyo, d(2024, 3, 1), 1200, "LAWSON");
        let utc = hash_key_in(&chrono_tz::UTC, d(2024, 3, 1), 1200, "LAWSON");
        assert_ne!(tokyo, utc);
    }

    #[test]
    fn test_dst_gap_uses_first_valid_hour() {
        // Santiago skips 00:00 -> 01:00 on 2023-09-03.
        let tz = chrono_tz::America::Santiago;
        assert_eq!(local_midnight_instant(&tz, d(2023, 9, 3)), "2023-09-03T04:00:00.000Z");
    }
}
