//! Flight segment types.
//!
//! A [`Segment`] is one flight leg exactly as extracted from a PNR line:
//! its date still lacks a year. A [`DatedSegment`] is produced by the year
//! inferencer once concrete calendar dates are known.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

use super::{FlightDesignator, IataCode, PartialDate};

/// Booking action/status code of a segment.
///
/// GDS status codes are two letters followed by a party count (`HK1`, `SS2`).
/// The common codes get their own variants; anything else is kept verbatim so
/// no information is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStatus {
    /// `HK` / `TK` / `RR` - holds confirmed
    Confirmed,
    /// `SS` - sold, awaiting confirmation
    Sold,
    /// `HL` / `HN` - waitlisted or on request
    Waitlisted,
    /// `UN` / `UC` / `NO` - unable to confirm
    Unable,
    /// Any other two-letter code, kept as-is
    Other([u8; 2]),
}

impl SegmentStatus {
    /// Interpret a status token such as `HK1` or `SS`. The trailing party
    /// count is ignored. Returns `None` if the token does not start with two
    /// uppercase letters.
    pub fn parse(token: &str) -> Option<Self> {
        let bytes = token.as_bytes();
        if bytes.len() < 2 || !bytes[0].is_ascii_uppercase() || !bytes[1].is_ascii_uppercase() {
            return None;
        }
        if bytes.len() > 2 && !bytes[2..].iter().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(match &token[..2] {
            "HK" | "TK" | "RR" => SegmentStatus::Confirmed,
            "SS" => SegmentStatus::Sold,
            "HL" | "HN" => SegmentStatus::Waitlisted,
            "UN" | "UC" | "NO" => SegmentStatus::Unable,
            _ => SegmentStatus::Other([bytes[0], bytes[1]]),
        })
    }
}

impl Default for SegmentStatus {
    /// A segment line with no status token is treated as confirmed.
    fn default() -> Self {
        SegmentStatus::Confirmed
    }
}

/// A single-letter reservation booking designator (RBD), e.g. `Y`, `C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingClass(char);

impl BookingClass {
    /// Wrap an RBD letter. Returns `None` for anything but A-Z.
    pub fn new(letter: char) -> Option<Self> {
        letter.is_ascii_uppercase().then_some(BookingClass(letter))
    }

    /// Returns the RBD letter.
    pub fn letter(&self) -> char {
        self.0
    }
}

impl fmt::Display for BookingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One flight leg as parsed from a segment line.
///
/// The date has no year yet. Segments are produced in source order and that
/// order is itinerary order; nothing downstream may reorder them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 1-based line number in the raw input, for error reporting.
    pub line_no: usize,
    /// Marketing carrier and flight number.
    pub flight: FlightDesignator,
    /// Operating-carrier annotation for codeshare segments, if present.
    pub operated_by: Option<String>,
    /// Departure date (no year).
    pub date: PartialDate,
    /// Origin airport.
    pub origin: IataCode,
    /// Destination airport.
    pub destination: IataCode,
    /// Local departure time.
    pub departure: NaiveTime,
    /// Local arrival time.
    pub arrival: NaiveTime,
    /// Whole days the arrival rolls past the departure date (the `+N`
    /// marker); 0 for same-day arrivals.
    pub arrival_day_offset: u32,
    /// Booking status; defaults to confirmed when the line carries none.
    pub status: SegmentStatus,
    /// Booking class letter, if present on the line.
    pub class: Option<BookingClass>,
}

/// A segment with concrete calendar dates attached by the year inferencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedSegment {
    segment: Segment,
    departure_date: NaiveDate,
    arrival_date: NaiveDate,
}

impl DatedSegment {
    /// Attach a departure date to a segment. The arrival date is the
    /// departure date advanced by the segment's `+N` day offset.
    pub fn new(segment: Segment, departure_date: NaiveDate) -> Self {
        let arrival_date = departure_date
            .checked_add_days(Days::new(segment.arrival_day_offset as u64))
            .unwrap_or(departure_date);
        Self {
            segment,
            departure_date,
            arrival_date,
        }
    }

    /// Returns the underlying segment.
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Returns the departure date.
    pub fn departure_date(&self) -> NaiveDate {
        self.departure_date
    }

    /// Returns the arrival date (before any timezone-driven forward roll).
    pub fn arrival_date(&self) -> NaiveDate {
        self.arrival_date
    }

    /// Local departure as a naive date-time.
    pub fn departure_naive(&self) -> NaiveDateTime {
        self.departure_date.and_time(self.segment.departure)
    }

    /// Local arrival as a naive date-time.
    pub fn arrival_naive(&self) -> NaiveDateTime {
        self.arrival_date.and_time(self.segment.arrival)
    }
}
