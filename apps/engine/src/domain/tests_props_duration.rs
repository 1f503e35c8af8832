//! Property tests for the duration codec (pure domain, no DB).
//!
//! Properties tested:
//! - parse(format(x)) == x for every non-negative second-granularity duration
//! - formatting never emits zero-valued segments
//! - parsing is insensitive to surrounding whitespace

use proptest::prelude::*;
use time::Duration;

use crate::domain::duration::{format_duration, parse_duration};
use crate::domain::test_fixtures;

proptest! {
    #![proptest_config(test_fixtures::proptest_config())]

    /// Property: round-trip law over the full useful range.
    #[test]
    fn prop_format_then_parse_round_trips(secs in 0i64..=10 * 365 * 86_400) {
        let duration = Duration::seconds(secs);
        let formatted = format_duration(duration);
        let parsed = parse_duration(&formatted).unwrap();
        prop_assert_eq!(parsed, duration, "round-trip failed via {}", formatted);
    }

    /// Property: formatted output never contains a zero-valued segment
    /// (except the canonical "0s" for zero itself).
    #[test]
    fn prop_format_omits_zero_segments(secs in 1i64..=10 * 365 * 86_400) {
        let formatted = format_duration(Duration::seconds(secs));
        let mut digits = String::new();
        for c in formatted.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else {
                prop_assert_ne!(
                    digits.trim_start_matches('0'),
                    "",
                    "{} contains a zero-valued segment", &formatted
                );
                digits.clear();
            }
        }
    }

    /// Property: leading/trailing whitespace is ignored.
    #[test]
    fn prop_parse_trims_whitespace(secs in 1i64..=86_400) {
        let formatted = format_duration(Duration::seconds(secs));
        let padded = format!("  {formatted}\t");
        prop_assert_eq!(
            parse_duration(&padded).unwrap(),
            Duration::seconds(secs)
        );
    }
}
