//! Sabre-style segment grammar.
//!
//! Sabre display lines are token-delimited with the booking class glued to
//! the flight number and slash-prefixed trailers at the end of the line:
//!
//! ```text
//! 1 KC 921Y 15FEB 1 NQZFRA SS1  1125  1530  /DCKC /E
//! 1 TK 353Y 15MAR 7 ALAIST*SS1 0950 1410 /DCTK /E
//! ```
//!
//! The `/DCXX` trailer names the direct-connect (operating) carrier, which is
//! how codeshare segments are annotated on the line itself.

use crate::domain::{CarrierCode, FlightDesignator, Segment, SegmentStatus, carrier_name};

use super::common::{
    find_date, find_route, find_status, find_times, split_flight_token, strip_element_number,
};
use super::{FormatTag, ParseError, SegmentGrammar};

pub struct SabreGrammar;

impl SabreGrammar {
    /// Operating-carrier annotation from a `/DCXX` trailer, rendered as the
    /// carrier's display name when known.
    fn direct_connect(tokens: &[&str]) -> Option<String> {
        let code = tokens
            .iter()
            .find_map(|t| t.strip_prefix("/DC"))
            .and_then(|c| CarrierCode::parse(c).ok())?;
        Some(
            carrier_name(code)
                .map(str::to_string)
                .unwrap_or_else(|| code.as_str().to_string()),
        )
    }
}

impl SegmentGrammar for SabreGrammar {
    fn tag(&self) -> FormatTag {
        FormatTag::SabreStyle
    }

    fn matches(&self, line: &str) -> bool {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(rest) = strip_element_number(&tokens) else {
            return false;
        };
        if find_date(rest, 0).is_none() {
            return false;
        }

        // Decisive anchors: a slash trailer, or a separate carrier token
        // followed by a flight number with a glued class letter.
        let has_trailer = rest.iter().any(|t| t.starts_with('/'));
        let has_glued_class = rest.len() >= 2
            && CarrierCode::parse(rest[0]).is_ok()
            && matches!(split_flight_token(rest[1]), Some((_, Some(_))));
        has_trailer || has_glued_class
    }

    fn parse_line(&self, line_no: usize, line: &str) -> Result<Option<Segment>, ParseError> {
        let malformed = |field| ParseError::MalformedSegment {
            line: line_no,
            field,
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(rest) = strip_element_number(&tokens) else {
            return Ok(None);
        };
        // Not segment-shaped unless a carrier token follows the element number
        let Some(carrier) = rest.first().and_then(|t| CarrierCode::parse(t).ok()) else {
            return Ok(None);
        };

        // Remark lines (SSR, OSI, TKT) also open with a short letter token;
        // only a digit-bearing flight number commits the line to a segment.
        let Some((number, class)) = rest.get(1).and_then(|t| split_flight_token(t)) else {
            return Ok(None);
        };

        let (date_idx, date) = find_date(rest, 2).ok_or(malformed("date"))?;

        let (route_idx, origin, destination, glued_status) =
            find_route(rest, date_idx + 1).ok_or(malformed("route"))?;

        let status = glued_status
            .or_else(|| find_status(rest, route_idx + 1))
            .unwrap_or_default();

        let (departure, arrival, arrival_day_offset) =
            find_times(rest, date_idx + 1).ok_or(malformed("times"))?;

        Ok(Some(Segment {
            line_no,
            flight: FlightDesignator::new(carrier, number),
            operated_by: Self::direct_connect(rest),
            date,
            origin,
            destination,
            departure,
            arrival,
            arrival_day_offset,
            status,
            class,
        }))
    }
}
