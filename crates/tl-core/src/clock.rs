//! Running clock that turns compact log timestamps into elapsed durations.
//!
//! Timestamps in the log mark the *end* of an activity and are written in a
//! 24-hour shorthand:
//!
//! | Token  | Meaning |
//! |--------|---------|
//! | `2140` | 21:40 |
//! | `940`  | 9:40 |
//! | `50`   | :50 of the hour currently on the clock |
//!
//! The clock is never reset between days. The first entry of a day therefore
//! measures the overnight gap since the last entry of the previous day.

use thiserror::Error;

/// Reasons a timestamp token cannot be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("expected 2 to 4 digits, got {len}")]
    Length { len: usize },

    #[error("contains a non-digit character")]
    NotDigits,

    #[error("hour {hour} is past 23")]
    Hour { hour: u32 },

    #[error("minute {minute} is past 59")]
    Minute { minute: u32 },
}

/// Hours since midnight of the last decoded timestamp.
///
/// Always in `[0, 24)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DurationClock {
    hours: f64,
}

impl DurationClock {
    pub const fn new() -> Self {
        Self { hours: 0.0 }
    }

    /// Current clock reading in fractional hours.
    pub const fn hours(self) -> f64 {
        self.hours
    }

    /// Decodes `token`, advances the clock, and returns the hours elapsed.
    ///
    /// A reading earlier than the current one is taken to be past midnight,
    /// so the result is never negative. The clock is left untouched when the
    /// token is rejected.
    pub fn decode(&mut self, token: &str) -> Result<f64, TimestampError> {
        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimestampError::NotDigits);
        }

        let (hour, minute) = match token.len() {
            2 => (self.current_hour(), digits(token)),
            3 => (digits(&token[..1]), digits(&token[1..])),
            4 => (digits(&token[..2]), digits(&token[2..])),
            len => return Err(TimestampError::Length { len }),
        };
        if hour > 23 {
            return Err(TimestampError::Hour { hour });
        }
        if minute > 59 {
            return Err(TimestampError::Minute { minute });
        }

        let next = f64::from(hour) + f64::from(minute) / 60.0;
        let mut duration = next - self.hours;
        if duration < 0.0 {
            duration += 24.0;
        }
        self.hours = next;
        Ok(duration)
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clock is kept within [0, 24)"
    )]
    fn current_hour(self) -> u32 {
        self.hours.trunc() as u32
    }
}

/// Parses an all-digit slice of at most two characters.
fn digits(s: &str) -> u32 {
    s.bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn four_digit_tokens_read_hour_and_minute() {
        let mut clock = DurationClock::new();
        approx(clock.decode("0700").unwrap(), 7.0);
        approx(clock.decode("1730").unwrap(), 10.5);
        approx(clock.hours(), 17.5);
    }

    #[test]
    fn three_digit_tokens_read_single_digit_hour() {
        let mut clock = DurationClock::new();
        approx(clock.decode("930").unwrap(), 9.5);
        approx(clock.decode("945").unwrap(), 0.25);
    }

    #[test]
    fn two_digit_tokens_reuse_hour_on_clock() {
        let mut clock = DurationClock::new();
        clock.decode("930").unwrap();
        approx(clock.decode("50").unwrap(), 1.0 / 3.0);
        approx(clock.hours(), 9.0 + 50.0 / 60.0);
    }

    #[test]
    fn two_digit_tokens_follow_the_clock_not_the_literal_token() {
        let mut clock = DurationClock::new();
        clock.decode("1015").unwrap();
        clock.decode("40").unwrap();
        // Still in hour 10, even though the last token carried no hour.
        approx(clock.decode("55").unwrap(), 0.25);
        approx(clock.hours(), 10.0 + 55.0 / 60.0);
    }

    #[test]
    fn earlier_reading_crosses_midnight() {
        let mut clock = DurationClock::new();
        clock.decode("2330").unwrap();
        approx(clock.decode("015").unwrap(), 0.75);
        approx(clock.hours(), 0.25);
    }

    #[test]
    fn overnight_gap_spans_to_next_morning() {
        let mut clock = DurationClock::new();
        clock.decode("2300").unwrap();
        approx(clock.decode("700").unwrap(), 8.0);
    }

    #[test]
    fn same_reading_is_zero_duration() {
        let mut clock = DurationClock::new();
        clock.decode("1200").unwrap();
        approx(clock.decode("1200").unwrap(), 0.0);
    }

    #[test]
    fn minute_shorthand_before_any_hour_uses_midnight() {
        let mut clock = DurationClock::new();
        approx(clock.decode("30").unwrap(), 0.5);
    }

    #[test]
    fn rejects_bad_lengths() {
        let mut clock = DurationClock::new();
        assert_eq!(clock.decode("5"), Err(TimestampError::Length { len: 1 }));
        assert_eq!(
            clock.decode("12345"),
            Err(TimestampError::Length { len: 5 })
        );
        assert_eq!(clock.decode(""), Err(TimestampError::Length { len: 0 }));
    }

    #[test]
    fn rejects_non_digits() {
        let mut clock = DurationClock::new();
        assert_eq!(clock.decode("9:30"), Err(TimestampError::NotDigits));
        assert_eq!(clock.decode("noon"), Err(TimestampError::NotDigits));
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let mut clock = DurationClock::new();
        assert_eq!(clock.decode("2400"), Err(TimestampError::Hour { hour: 24 }));
        assert_eq!(
            clock.decode("960"),
            Err(TimestampError::Minute { minute: 60 })
        );
    }

    #[test]
    fn rejected_token_leaves_clock_unchanged() {
        let mut clock = DurationClock::new();
        clock.decode("800").unwrap();
        assert!(clock.decode("99").is_err());
        approx(clock.hours(), 8.0);
    }

    #[test]
    fn clock_stays_within_a_day() {
        let mut clock = DurationClock::new();
        for token in ["2359", "000", "1230", "59", "2300", "15"] {
            let duration = clock.decode(token).unwrap();
            assert!((0.0..24.0).contains(&duration));
            assert!((0.0..24.0).contains(&clock.hours()));
        }
    }
}
