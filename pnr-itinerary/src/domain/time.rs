//! PNR time and date handling.
//!
//! GDS segment lines carry times as bare `HHMM` tokens (arrival optionally
//! suffixed `+N` when the flight crosses midnight) and dates as `DDMMM`
//! tokens with no year. This module provides the parsers for both, plus the
//! year-less [`PartialDate`] that the year inferencer later completes.

use chrono::{NaiveDate, NaiveTime};
use std::fmt;

/// Error returned when parsing an invalid time token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Error returned when parsing an invalid date token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date: {reason}")]
pub struct DateError {
    reason: &'static str,
}

impl DateError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Month tokens as they appear in GDS dates, in calendar order.
const MONTH_TOKENS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Loosest day-in-month bounds (February admits 29; leap validity is checked
/// when a concrete year is attached).
const MONTH_MAX_DAY: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Parse a bare `HHMM` time token.
///
/// # Examples
///
/// ```
/// use pnr_itinerary::domain::parse_hhmm;
///
/// assert!(parse_hhmm("0000").is_ok());
/// assert!(parse_hhmm("2359").is_ok());
/// assert!(parse_hhmm("1125").is_ok());
///
/// assert!(parse_hhmm("11:25").is_err());
/// assert!(parse_hhmm("125").is_err());
/// assert!(parse_hhmm("2500").is_err());
/// ```
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, TimeError> {
    let bytes = s.as_bytes();

    if bytes.len() != 4 {
        return Err(TimeError::new("expected HHMM format"));
    }

    let hour = parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    if hour > 23 {
        return Err(TimeError::new("hour must be 0-23"));
    }

    let minute =
        parse_two_digits(&bytes[2..4]).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))
}

/// Parse an arrival time token: `HHMM` or `HHMM+N`.
///
/// The `+N` suffix is the crossed-midnight marker; the returned offset is the
/// number of calendar days the arrival rolls past the departure date.
///
/// # Examples
///
/// ```
/// use pnr_itinerary::domain::parse_arrival_hhmm;
/// use chrono::NaiveTime;
///
/// let (t, days) = parse_arrival_hhmm("0435+1").unwrap();
/// assert_eq!(t, NaiveTime::from_hms_opt(4, 35, 0).unwrap());
/// assert_eq!(days, 1);
///
/// let (_, days) = parse_arrival_hhmm("1530").unwrap();
/// assert_eq!(days, 0);
/// ```
pub fn parse_arrival_hhmm(s: &str) -> Result<(NaiveTime, u32), TimeError> {
    match s.split_once('+') {
        None => Ok((parse_hhmm(s)?, 0)),
        Some((time, offset)) => {
            let time = parse_hhmm(time)?;
            match offset.as_bytes() {
                [digit] if digit.is_ascii_digit() => Ok((time, (digit - b'0') as u32)),
                _ => Err(TimeError::new("day offset must be a single digit")),
            }
        }
    }
}

/// A day-plus-month date without a year, as carried by GDS segment lines.
///
/// Neither supported grammar ever includes a year; the year inferencer
/// attaches one later. Both grammars are day-first (`15FEB` is 15 February).
///
/// # Examples
///
/// ```
/// use pnr_itinerary::domain::PartialDate;
///
/// let d = PartialDate::parse("15FEB").unwrap();
/// assert_eq!(d.day(), 15);
/// assert_eq!(d.month(), 2);
/// assert_eq!(d.to_string(), "15FEB");
///
/// // 29 February is accepted; leap validity is checked at year attachment
/// assert!(PartialDate::parse("29FEB").is_ok());
/// assert!(PartialDate::parse("30FEB").is_err());
/// assert!(PartialDate::parse("15XXX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartialDate {
    day: u8,
    month: u8,
}

impl PartialDate {
    /// Parse a `DDMMM` date token, e.g. `15FEB`.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let bytes = s.as_bytes();

        if bytes.len() != 5 {
            return Err(DateError::new("expected DDMMM format"));
        }

        let day =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| DateError::new("invalid day digits"))?;

        let token = &s[2..5];
        let month = MONTH_TOKENS
            .iter()
            .position(|m| m.eq_ignore_ascii_case(token))
            .ok_or_else(|| DateError::new("unknown month token"))?;

        if day == 0 || day as u8 > MONTH_MAX_DAY[month] {
            return Err(DateError::new("day out of range for month"));
        }

        Ok(PartialDate {
            day: day as u8,
            month: month as u8 + 1,
        })
    }

    /// Returns the day of month (1-31).
    pub fn day(&self) -> u32 {
        self.day as u32
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u32 {
        self.month as u32
    }

    /// Attach a year, producing a concrete calendar date.
    ///
    /// Returns `None` only for 29 February in a non-leap year.
    pub fn with_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month(), self.day())
    }
}

impl fmt::Debug for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PartialDate({self})")
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}{}",
            self.day,
            MONTH_TOKENS[self.month as usize - 1]
        )
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time_token()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}{:02}", hour, minute)
        }
    }

    proptest! {
        /// Any valid HHMM token parses
        #[test]
        fn valid_hhmm_parses(s in valid_time_token()) {
            prop_assert!(parse_hhmm(&s).is_ok());
        }

        /// Invalid hour is rejected
        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60) {
            let s = format!("{:02}{:02}", hour, minute);
            prop_assert!(parse_hhmm(&s).is_err());
        }

        /// Invalid minute is rejected
        #[test]
        fn invalid_minute_rejected(hour in 0u32..24, minute in 60u32..100) {
            let s = format!("{:02}{:02}", hour, minute);
            prop_assert!(parse_hhmm(&s).is_err());
        }

        /// Arrival offset roundtrips for single digits
        #[test]
        fn arrival_offset_roundtrip(s in valid_time_token(), days in 1u32..10) {
            let token = format!("{}+{}", s, days);
            let (time, parsed_days) = parse_arrival_hhmm(&token).unwrap();
            prop_assert_eq!(parsed_days, days);
            prop_assert_eq!(time, parse_hhmm(&s).unwrap());
        }

        /// Any in-range day/month pair parses and roundtrips through Display
        #[test]
        fn date_display_roundtrip(month in 0usize..12, day in 1u32..=28) {
            let token = format!("{:02}{}", day, MONTH_TOKENS[month]);
            let parsed = PartialDate::parse(&token).unwrap();
            prop_assert_eq!(parsed.to_string(), token);
        }

        /// with_year never panics and agrees with chrono's validity rules
        #[test]
        fn with_year_matches_chrono(month in 1u32..=12, day in 1u32..=31, year in 2000i32..2100) {
            let token = format!("{:02}{}", day, MONTH_TOKENS[month as usize - 1]);
            if let Ok(d) = PartialDate::parse(&token) {
                prop_assert_eq!(
                    d.with_year(year),
                    NaiveDate::from_ymd_opt(year, month, day)
                );
            }
        }
    }
}
