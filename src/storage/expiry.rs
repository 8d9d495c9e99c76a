//! Expiry Policy
//!
//! Records carry an absolute expiry instant computed when they are added.
//! Staleness is discovered lazily: there is no background sweeper, so a record
//! is only purged when an operation touches its category.
//!
//! ## Lazy vs. Sweeping Counts
//!
//! `Categories` reports how many records each category holds. Two policies are
//! supported:
//!
//! 1. **Lazy** (default): counts are taken as stored, under a shared lock.
//!    A stale record that nobody has touched yet is still counted.
//! 2. **Sweep**: every category is purged of stale records first, under the
//!    exclusive lock, so counts only include live records.

use std::fmt;
use std::str::FromStr;

/// When a stored record stops being visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Never expires
    Never,
    /// Stale from this instant (in clock seconds) onwards
    At(i64),
}

impl Expiry {
    /// Computes the expiry for a record added at `now` with `ttl` seconds to live.
    ///
    /// A `ttl` of zero or less never expires.
    pub fn from_ttl(ttl: i64, now: i64) -> Self {
        if ttl > 0 {
            Expiry::At(now.saturating_add(ttl))
        } else {
            Expiry::Never
        }
    }

    /// Checks if the record is stale at `now`.
    #[inline]
    pub fn is_stale(&self, now: i64) -> bool {
        match self {
            Expiry::Never => false,
            Expiry::At(at) => now >= *at,
        }
    }

    /// Returns the seconds left before expiry, or 0 for a record that never expires.
    ///
    /// Only meaningful for records that are not stale.
    pub fn remaining(&self, now: i64) -> i64 {
        match self {
            Expiry::Never => 0,
            Expiry::At(at) => at.saturating_sub(now).max(0),
        }
    }
}

/// How `Categories` treats stale records it has not yet purged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountMode {
    /// Report raw counts without cleaning
    #[default]
    Lazy,
    /// Purge stale records in every category before counting
    Sweep,
}

impl fmt::Display for CountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountMode::Lazy => write!(f, "lazy"),
            CountMode::Sweep => write!(f, "sweep"),
        }
    }
}

impl FromStr for CountMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lazy" => Ok(CountMode::Lazy),
            "sweep" => Ok(CountMode::Sweep),
            other => Err(format!("unknown count mode '{}' (expected lazy or sweep)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_ttl_never_expires() {
        assert_eq!(Expiry::from_ttl(0, 100), Expiry::Never);
        assert_eq!(Expiry::from_ttl(-5, 100), Expiry::Never);
        assert!(!Expiry::Never.is_stale(i64::MAX));
        assert_eq!(Expiry::Never.remaining(100), 0);
    }

    #[test]
    fn test_stale_at_expiry_instant() {
        let expiry = Expiry::from_ttl(5, 100);
        assert_eq!(expiry, Expiry::At(105));

        assert!(!expiry.is_stale(104));
        assert!(expiry.is_stale(105));
        assert!(expiry.is_stale(106));
    }

    #[test]
    fn test_remaining_counts_down() {
        let expiry = Expiry::from_ttl(5, 100);

        assert_eq!(expiry.remaining(100), 5);
        assert_eq!(expiry.remaining(102), 3);
        assert_eq!(expiry.remaining(104), 1);
        assert_eq!(expiry.remaining(200), 0);
    }

    #[test]
    fn test_huge_ttl_saturates() {
        assert_eq!(Expiry::from_ttl(i64::MAX, 10), Expiry::At(i64::MAX));
        assert_eq!(Expiry::At(i64::MAX).remaining(-10), i64::MAX);
    }

    #[test]
    fn test_count_mode_parse() {
        assert_eq!("lazy".parse::<CountMode>(), Ok(CountMode::Lazy));
        assert_eq!("SWEEP".parse::<CountMode>(), Ok(CountMode::Sweep));
        assert!("eager".parse::<CountMode>().is_err());
        assert_eq!(CountMode::Sweep.to_string(), "sweep");
    }
}
