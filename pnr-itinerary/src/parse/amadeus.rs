//! Amadeus-style segment grammar.
//!
//! Amadeus cryptic air segments carry a separate one-letter class token, a
//! day-of-week digit after the date, and trailing equipment/meal columns:
//!
//! ```text
//! 1 TK 351 C 15MAR 7 ALAIST HK1 0635 1035 333 E 0 M SEE RTSVC
//! 2 TK1921 C 15MAR 7 ISTGVA HK1 1225 1340 32Q E 0 M SEE RTSVC
//! ```
//!
//! The carrier and flight number may be merged into one token or split in
//! two. Codeshare segments are annotated by an `OPERATED BY <NAME>`
//! continuation line under the segment line.

use crate::domain::{CarrierCode, FlightDesignator, Segment};

use super::common::{
    find_date, find_route, find_status, find_times, split_flight_token, split_merged_flight,
    strip_element_number,
};
use super::{FormatTag, ParseError, SegmentGrammar};

pub struct AmadeusGrammar;

impl SegmentGrammar for AmadeusGrammar {
    fn tag(&self) -> FormatTag {
        FormatTag::AmadeusStyle
    }

    fn matches(&self, line: &str) -> bool {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(rest) = strip_element_number(&tokens) else {
            return false;
        };
        let Some((date_idx, _)) = find_date(rest, 0) else {
            return false;
        };

        // Slash trailers belong to the Sabre grammar
        if rest.iter().any(|t| t.starts_with('/')) {
            return false;
        }

        // Decisive anchors: a status token with party count after the date,
        // plus either a merged carrier+flight token or a standalone class
        // letter before it.
        if find_status(rest, date_idx + 1).is_none() {
            return false;
        }
        let merged = rest
            .first()
            .is_some_and(|t| split_merged_flight(t).is_some());
        let split_class = rest[..date_idx]
            .iter()
            .any(|t| t.len() == 1 && t.bytes().all(|b| b.is_ascii_uppercase()));
        merged || split_class
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
        let Some(&first) = rest.first() else {
            return Ok(None);
        };

        // Carrier and flight number, merged (`TK1921`) or split (`TK 351`)
        let (carrier, number, mut class, cursor) = if let Some((carrier, number, class)) =
            split_merged_flight(first)
        {
            (carrier, number, class, 1)
        } else if let Ok(carrier) = CarrierCode::parse(first) {
            // Remark lines (SSR, OSI, TKT) also open with a short letter
            // token; without a digit-bearing flight number after it this is
            // not a segment.
            let Some((number, class)) = rest.get(1).and_then(|t| split_flight_token(t)) else {
                return Ok(None);
            };
            (carrier, number, class, 2)
        } else {
            return Ok(None);
        };

        // Standalone class letter between the flight number and the date
        if class.is_none() {
            class = rest.get(cursor).and_then(|t| {
                let mut chars = t.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => crate::domain::BookingClass::new(c),
                    _ => None,
                }
            });
        }

        let (date_idx, date) = find_date(rest, cursor).ok_or(malformed("date"))?;

        let (route_idx, origin, destination, glued_status) =
            find_route(rest, date_idx + 1).ok_or(malformed("route"))?;

        let status = glued_status
            .or_else(|| find_status(rest, route_idx + 1))
            .unwrap_or_default();

        let (departure, arrival, arrival_day_offset) =
            find_times(rest, route_idx + 1).ok_or(malformed("times"))?;

        Ok(Some(Segment {
            line_no,
            flight: FlightDesignator::new(carrier, number),
            operated_by: None,
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

    /// `OPERATED BY <NAME>` lines annotate the previous segment with its
    /// operating carrier.
    fn attach_continuation(&self, segment: &mut Segment, line: &str) -> bool {
        let Some(name) = line.strip_prefix("OPERATED BY") else {
            return false;
        };
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        segment.operated_by = Some(name.to_string());
        true
    }
}
