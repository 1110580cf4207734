//! # Time Utilities
//!
//! Wall-clock helpers built on chrono. Transaction deadlines are unix seconds, which is
//! what router contracts compare against `block.timestamp`.

use chrono::Utc;

/// Current unix time in whole seconds.
pub fn now_unix_secs() -> u64 {
    // Clocks before 1970 are treated as the epoch
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

/// Deadline `minutes` from now, in unix seconds.
///
/// ```rust
/// use lib_utils::time::{get_deadline_timestamp, now_unix_secs};
///
/// let before = now_unix_secs();
/// let deadline = get_deadline_timestamp(20);
/// assert!(deadline >= before + 20 * 60);
/// ```
pub fn get_deadline_timestamp(minutes: u64) -> u64 {
    now_unix_secs().saturating_add(minutes.saturating_mul(60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_minutes_is_now() {
        let before = now_unix_secs();
        let deadline = get_deadline_timestamp(0);
        let after = now_unix_secs();
        assert!(deadline >= before && deadline <= after);
    }

    proptest! {
        #[test]
        fn deadline_is_now_plus_sixty_per_minute(minutes in 0u64..1_000_000) {
            let before = now_unix_secs();
            let deadline = get_deadline_timestamp(minutes);
            let after = now_unix_secs();
            prop_assert!(deadline >= before + 60 * minutes);
            prop_assert!(deadline <= after + 60 * minutes);
        }
    }
}
