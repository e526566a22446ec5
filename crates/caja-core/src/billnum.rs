//! # Bill Numbers
//!
//! Composes the sequential-looking bill number written on every invoice:
//! a `YYYYMMDD` date stamp followed by a zero-padded 3-digit random suffix,
//! e.g. `20260807042`.
//!
//! The suffix is random, not a counter: two sales in the same day can
//! collide and the store does not enforce uniqueness on the number column.
//! The record UUID, not this number, is what relates bills and sales.

use chrono::{NaiveDate, Utc};
use rand::Rng;

/// Composes a bill number from its parts. Deterministic, used by tests.
pub fn compose(date: NaiveDate, suffix: u16) -> String {
    format!("{}{:03}", date.format("%Y%m%d"), suffix % 1000)
}

/// Generates a bill number for the current date with a random suffix.
pub fn generate() -> String {
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);
    compose(Utc::now().date_naive(), suffix)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_format() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(compose(date, 42), "20260807042");
        assert_eq!(compose(date, 0), "20260807000");
        assert_eq!(compose(date, 999), "20260807999");
    }

    #[test]
    fn test_suffix_wraps_into_three_digits() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        assert_eq!(compose(date, 1042), "20260102042");
    }

    #[test]
    fn test_generate_shape() {
        let number = generate();
        assert_eq!(number.len(), 11);
        assert!(number.chars().all(|c| c.is_ascii_digit()));
        assert!(number.starts_with(&Utc::now().format("%Y%m%d").to_string()));
    }
}
