//! Token helpers shared by the two segment grammars.

use crate::domain::{
    BookingClass, CarrierCode, IataCode, PartialDate, SegmentStatus, parse_arrival_hhmm,
    parse_hhmm,
};
use chrono::NaiveTime;

/// Strip the leading element number (1-2 digits) from a token list.
/// Returns the remaining tokens, or `None` if the line does not start with
/// an element number.
pub(super) fn strip_element_number<'a, 'b>(tokens: &'b [&'a str]) -> Option<&'b [&'a str]> {
    let first = tokens.first()?;
    let is_number =
        (1..=2).contains(&first.len()) && first.bytes().all(|b| b.is_ascii_digit());
    is_number.then(|| &tokens[1..])
}

/// Split a flight-number token into number and optional glued class letter:
/// `921Y` -> (921, Some(Y)), `1921` -> (1921, None).
pub(super) fn split_flight_token(token: &str) -> Option<(u16, Option<BookingClass>)> {
    let digits_end = token
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(token.len());
    if !(1..=4).contains(&digits_end) {
        return None;
    }

    let number: u16 = token[..digits_end].parse().ok()?;
    let rest = &token[digits_end..];
    match rest.len() {
        0 => Some((number, None)),
        1 => {
            let class = rest.chars().next().and_then(BookingClass::new)?;
            Some((number, Some(class)))
        }
        _ => None,
    }
}

/// Split a merged carrier+flight token (`TK1921`, `J254Y`) into its parts.
pub(super) fn split_merged_flight(
    token: &str,
) -> Option<(CarrierCode, u16, Option<BookingClass>)> {
    for prefix_len in [2usize, 3] {
        if token.len() <= prefix_len {
            continue;
        }
        let Ok(carrier) = CarrierCode::parse(&token[..prefix_len]) else {
            continue;
        };
        if let Some((number, class)) = split_flight_token(&token[prefix_len..]) {
            return Some((carrier, number, class));
        }
    }
    None
}

/// Whether a token is a `DDMMM` date.
pub(super) fn is_date_token(token: &str) -> bool {
    PartialDate::parse(token).is_ok()
}

/// Find the first date token at or after `start`, returning its index and
/// parsed value.
pub(super) fn find_date(tokens: &[&str], start: usize) -> Option<(usize, PartialDate)> {
    tokens
        .iter()
        .enumerate()
        .skip(start)
        .find_map(|(i, t)| PartialDate::parse(t).ok().map(|d| (i, d)))
}

/// A route token is a merged 6-letter city pair, optionally with a glued
/// `*STATUS` suffix (`ALAIST*SS1`). Returns origin, destination, and the
/// glued status if any.
pub(super) fn split_route(token: &str) -> Option<(IataCode, IataCode, Option<SegmentStatus>)> {
    let bytes = token.as_bytes();
    if bytes.len() < 6 || !bytes[..6].iter().all(|b| b.is_ascii_uppercase()) {
        return None;
    }

    let origin = IataCode::parse(&token[..3]).ok()?;
    let destination = IataCode::parse(&token[3..6]).ok()?;

    let status = match &token[6..] {
        "" => None,
        // A bare trailing `*` is a codeshare display marker, not a status
        "*" => None,
        rest => {
            let glued = rest.strip_prefix('*')?;
            Some(status_token(glued)?)
        }
    };

    Some((origin, destination, status))
}

/// Find the first route token at or after `start`.
pub(super) fn find_route(
    tokens: &[&str],
    start: usize,
) -> Option<(usize, IataCode, IataCode, Option<SegmentStatus>)> {
    tokens
        .iter()
        .enumerate()
        .skip(start)
        .find_map(|(i, t)| split_route(t).map(|(o, d, s)| (i, o, d, s)))
}

/// Parse a status token, requiring the trailing party count so that bare
/// 2-letter words (carrier codes, free text) are not misread as statuses.
pub(super) fn status_token(token: &str) -> Option<SegmentStatus> {
    if token.len() < 3 {
        return None;
    }
    SegmentStatus::parse(token)
}

/// Find the first status token at or after `start`.
pub(super) fn find_status(tokens: &[&str], start: usize) -> Option<SegmentStatus> {
    tokens.iter().skip(start).find_map(|t| status_token(t))
}

/// Find the departure and arrival time tokens at or after `start`: the first
/// bare `HHMM`, then the next `HHMM` or `HHMM+N`.
pub(super) fn find_times(tokens: &[&str], start: usize) -> Option<(NaiveTime, NaiveTime, u32)> {
    let mut iter = tokens.iter().skip(start);
    let departure = iter.find_map(|t| parse_hhmm(t).ok())?;
    let (arrival, offset) = iter.find_map(|t| parse_arrival_hhmm(t).ok())?;
    Some((departure, arrival, offset))
}
