//! Human-readable duration codec used for all configurable timeouts.
//!
//! Accepted form: one or more `<integer><unit>` segments, units `d h m s` in
//! strictly descending order, each at most once ("2d5h" is valid, "5h2d" and
//! "2d2d" are not). Formatting omits zero-valued units; a zero duration
//! formats as `"0s"`. `parse_duration(format_duration(x)) == x` holds for
//! every non-negative duration at one-second granularity.

use time::Duration;

use crate::errors::domain::{DomainError, ValidationKind};

const UNITS: [(char, i64); 4] = [('d', 86_400), ('h', 3_600), ('m', 60), ('s', 1)];

fn bad(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::BadDuration, detail)
}

pub fn parse_duration(input: &str) -> Result<Duration, DomainError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(bad("duration is empty; expected segments like \"1d2h30m\""));
    }

    let mut total: i64 = 0;
    let mut last_unit: Option<usize> = None;
    let mut chars = s.chars().peekable();

    while chars.peek().is_some() {
        let mut digits = String::new();
        while let Some(c) = chars.peek() {
            if c.is_ascii_digit() {
                digits.push(*c);
                chars.next();
            } else {
                break;
            }
        }
        if digits.is_empty() {
            return Err(bad(format!(
                "expected a number in \"{s}\"; segments are <number><unit> with units d, h, m, s"
            )));
        }
        let value: i64 = digits
            .parse()
            .map_err(|_| bad(format!("number \"{digits}\" is too large")))?;

        let unit = match chars.next() {
            Some(c) => c,
            None => return Err(bad(format!("missing unit after \"{digits}\" in \"{s}\""))),
        };
        let idx = UNITS
            .iter()
            .position(|(u, _)| *u == unit)
            .ok_or_else(|| bad(format!("unknown unit '{unit}' in \"{s}\"; use d, h, m or s")))?;

        if let Some(last) = last_unit {
            if idx <= last {
                return Err(bad(format!(
                    "units in \"{s}\" must be in descending order (d, h, m, s), each at most once"
                )));
            }
        }
        last_unit = Some(idx);

        total = value
            .checked_mul(UNITS[idx].1)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(|| bad(format!("duration \"{s}\" overflows")))?;
    }

    Ok(Duration::seconds(total))
}

pub fn format_duration(duration: Duration) -> String {
    let mut secs = duration.whole_seconds();
    if secs <= 0 {
        return "0s".to_string();
    }

    let mut out = String::new();
    for (unit, unit_secs) in UNITS {
        let value = secs / unit_secs;
        if value > 0 {
            out.push_str(&value.to_string());
            out.push(unit);
            secs -= value * unit_secs;
        }
    }
    out
}
