//! Year inference.
//!
//! GDS dates carry only day and month. Itineraries are chronological, so the
//! missing years are recovered with a monotonic-forward rule: the first
//! segment takes the smallest year that keeps its date at or after the
//! anchor, and every later segment takes the smallest year that keeps its
//! date at or after the previous segment's resolved departure date. A date
//! that appears to go backwards within a year (December followed by January)
//! therefore rolls into the next year.

use chrono::{Datelike, NaiveDate};

use crate::domain::{DatedSegment, PartialDate, Segment};

use super::ParseError;

/// How many years forward to search for a valid assignment. Only 29 February
/// can skip years, and a leap year always occurs within this window.
const YEAR_SEARCH_WINDOW: i32 = 8;

/// Attach years to a sequence of segments.
///
/// `anchor` is the reference date the first segment may not precede
/// (normally "today"; pinned explicitly when the caller knows the travel
/// year).
///
/// # Errors
///
/// [`ParseError::AmbiguousYear`] if no consistent non-decreasing assignment
/// exists for some segment.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pnr_itinerary::parse::{FormatTag, assign_years, parse_segments};
///
/// let text = "1 KC 921Y 15FEB 1 NQZFRA SS1 1125 1530 /DCKC /E\n";
/// let segments = parse_segments(text, FormatTag::SabreStyle).unwrap();
///
/// // Anchored after 15 February, the date rolls into the next year
/// let anchor = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
/// let dated = assign_years(segments, anchor).unwrap();
/// assert_eq!(
///     dated[0].departure_date(),
///     NaiveDate::from_ymd_opt(2027, 2, 15).unwrap()
/// );
/// ```
pub fn assign_years(
    segments: Vec<Segment>,
    anchor: NaiveDate,
) -> Result<Vec<DatedSegment>, ParseError> {
    let mut dated = Vec::with_capacity(segments.len());
    let mut floor = anchor;

    for segment in segments {
        let date = smallest_on_or_after(segment.date, floor)
            .ok_or(ParseError::AmbiguousYear {
                line: segment.line_no,
            })?;
        floor = date;
        dated.push(DatedSegment::new(segment, date));
    }

    Ok(dated)
}

/// The smallest concrete date for `date` that is on or after `floor`.
fn smallest_on_or_after(date: PartialDate, floor: NaiveDate) -> Option<NaiveDate> {
    (floor.year()..floor.year() + YEAR_SEARCH_WINDOW)
        .filter_map(|year| date.with_year(year))
        .find(|d| *d >= floor)
}
