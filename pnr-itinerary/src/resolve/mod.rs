//! Timezone resolution and layover computation.
//!
//! Local segment times become UTC instants using each airport's IANA zone,
//! which makes layover arithmetic a plain instant subtraction. Resolution
//! never fails: airports missing from the table and implausible connection
//! times are reported as warnings on the itinerary instead of aborting it.

use std::fmt;

use chrono::{DateTime, Days, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::airports::AirportTable;
use crate::domain::{DatedSegment, IataCode};

/// Which end of a segment's route a warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteEnd {
    Origin,
    Destination,
}

impl fmt::Display for RouteEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteEnd::Origin => f.write_str("origin"),
            RouteEnd::Destination => f.write_str("destination"),
        }
    }
}

/// Recoverable problems found while resolving an itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// An airport code missing from the table; its local times were treated
    /// as UTC.
    UnknownAirport {
        code: IataCode,
        segment_index: usize,
        end: RouteEnd,
    },
    /// The layover before `segments[index + 1]` is zero or negative.
    NegativeLayover { index: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownAirport {
                code,
                segment_index,
                end,
            } => write!(
                f,
                "segment {}: unknown {end} airport {code}, times taken as UTC",
                segment_index + 1
            ),
            Warning::NegativeLayover { index } => write!(
                f,
                "non-positive connection time between segments {} and {}",
                index + 1,
                index + 2
            ),
        }
    }
}

/// A segment with both endpoints pinned to UTC instants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSegment {
    dated: DatedSegment,
    dep_utc: DateTime<Utc>,
    arr_utc: DateTime<Utc>,
    arr_local: NaiveDateTime,
    origin_known: bool,
    dest_known: bool,
}

impl ResolvedSegment {
    pub fn dated(&self) -> &DatedSegment {
        &self.dated
    }

    pub fn dep_utc(&self) -> DateTime<Utc> {
        self.dep_utc
    }

    pub fn arr_utc(&self) -> DateTime<Utc> {
        self.arr_utc
    }

    /// Local arrival date-time after any forward roll, so it can differ from
    /// the parsed arrival when the source line omitted its `+1` marker.
    pub fn arrival_local(&self) -> NaiveDateTime {
        self.arr_local
    }

    /// In-air duration. Positive by construction.
    pub fn duration(&self) -> TimeDelta {
        self.arr_utc - self.dep_utc
    }

    /// False when the origin airport was missing from the table.
    pub fn origin_known(&self) -> bool {
        self.origin_known
    }

    /// False when the destination airport was missing from the table.
    pub fn dest_known(&self) -> bool {
        self.dest_known
    }
}

/// How a passenger gets from one segment to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoverKind {
    /// Same airport for arrival and the next departure.
    Connection,
    /// The next segment leaves from a different airport.
    GroundTransfer,
}

/// The gap between two consecutive segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layover {
    pub duration: TimeDelta,
    pub kind: LayoverKind,
    /// Arrival airport of the earlier segment.
    pub from: IataCode,
    /// Departure airport of the later segment.
    pub to: IataCode,
}

impl Layover {
    /// Zero or negative connection time, physically implausible.
    pub fn is_anomalous(&self) -> bool {
        self.duration <= TimeDelta::zero()
    }
}

/// A fully resolved itinerary: segments in source order, the layovers
/// between adjacent pairs, and any warnings produced along the way.
#[derive(Debug, Clone)]
pub struct Itinerary {
    pub segments: Vec<ResolvedSegment>,
    pub layovers: Vec<Layover>,
    pub warnings: Vec<Warning>,
}

impl Itinerary {
    /// Resolve dated segments against the airport table.
    ///
    /// Segment order is preserved exactly. `layovers[i]` sits between
    /// `segments[i]` and `segments[i + 1]`.
    pub fn resolve(dated: Vec<DatedSegment>, airports: &AirportTable) -> Self {
        let mut warnings = Vec::new();
        let mut segments = Vec::with_capacity(dated.len());

        for (index, seg) in dated.into_iter().enumerate() {
            let origin_zone = airports.get(seg.segment().origin).map(|a| a.tz);
            if origin_zone.is_none() {
                warnings.push(Warning::UnknownAirport {
                    code: seg.segment().origin,
                    segment_index: index,
                    end: RouteEnd::Origin,
                });
            }
            let dest_zone = airports.get(seg.segment().destination).map(|a| a.tz);
            if dest_zone.is_none() {
                warnings.push(Warning::UnknownAirport {
                    code: seg.segment().destination,
                    segment_index: index,
                    end: RouteEnd::Destination,
                });
            }

            let dep_utc = to_utc(origin_zone, seg.departure_naive());
            let (arr_local, arr_utc) = roll_arrival(dest_zone, seg.arrival_naive(), dep_utc);

            segments.push(ResolvedSegment {
                dated: seg,
                dep_utc,
                arr_utc,
                arr_local,
                origin_known: origin_zone.is_some(),
                dest_known: dest_zone.is_some(),
            });
        }

        let mut layovers = Vec::new();
        for (index, pair) in segments.windows(2).enumerate() {
            let from = pair[0].dated.segment().destination;
            let to = pair[1].dated.segment().origin;
            let layover = Layover {
                duration: pair[1].dep_utc - pair[0].arr_utc,
                kind: if from == to {
                    LayoverKind::Connection
                } else {
                    LayoverKind::GroundTransfer
                },
                from,
                to,
            };
            if layover.is_anomalous() {
                warnings.push(Warning::NegativeLayover { index });
            }
            layovers.push(layover);
        }

        Itinerary {
            segments,
            layovers,
            warnings,
        }
    }
}

/// Pin a local date-time to a UTC instant.
///
/// A repeated local time (autumn fold-back) takes the earlier instant. A
/// local time inside a spring-forward gap is pushed an hour later, matching
/// where clocks actually land. With no zone the time is taken as UTC.
fn to_utc(zone: Option<Tz>, naive: NaiveDateTime) -> DateTime<Utc> {
    let Some(zone) = zone else {
        return Utc.from_utc_datetime(&naive);
    };
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        LocalResult::None => {
            let shifted = naive + TimeDelta::hours(1);
            match zone.from_local_datetime(&shifted) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                    dt.with_timezone(&Utc)
                }
                // Gaps are one hour in every zone this tool meets
                LocalResult::None => Utc.from_utc_datetime(&shifted),
            }
        }
    }
}

/// Resolve an arrival, rolling it forward by whole days until it lands after
/// the departure instant. Covers lines that omit the `+1` next-day marker on
/// eastbound overnight flights. Returns the rolled local time alongside the
/// instant so display code sees the corrected calendar date.
fn roll_arrival(
    zone: Option<Tz>,
    naive: NaiveDateTime,
    dep_utc: DateTime<Utc>,
) -> (NaiveDateTime, DateTime<Utc>) {
    let mut naive = naive;
    let mut arr_utc = to_utc(zone, naive);
    // Two days covers the widest real offset spread (UTC-12 to UTC+14)
    for _ in 0..2 {
        if arr_utc > dep_utc {
            break;
        }
        naive = naive
            .checked_add_days(Days::new(1))
            .unwrap_or(naive);
        arr_utc = to_utc(zone, naive);
    }
    (naive, arr_utc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BookingClass, CarrierCode, FlightDesignator, PartialDate, Segment, SegmentStatus,
        parse_hhmm,
    };
    use chrono::NaiveDate;

    fn dated(
        origin: &str,
        dest: &str,
        date: (i32, u32, u32),
        dep: &str,
        arr: &str,
        offset: u32,
    ) -> DatedSegment {
        let segment = Segment {
            line_no: 1,
            flight: FlightDesignator::new(CarrierCode::parse("KC").unwrap(), 921),
            operated_by: None,
            date: PartialDate::parse("15FEB").unwrap(),
            origin: IataCode::parse(origin).unwrap(),
            destination: IataCode::parse(dest).unwrap(),
            departure: parse_hhmm(dep).unwrap(),
            arrival: parse_hhmm(arr).unwrap(),
            arrival_day_offset: offset,
            status: SegmentStatus::default(),
            class: BookingClass::new('Y'),
        };
        DatedSegment::new(
            segment,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        )
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn segment_times_become_utc_instants() {
        // Astana is UTC+5, Frankfurt UTC+1 in February
        let itinerary = Itinerary::resolve(
            vec![dated("NQZ", "FRA", (2026, 2, 15), "1125", "1530", 0)],
            &AirportTable::builtin(),
        );

        let seg = &itinerary.segments[0];
        assert_eq!(seg.dep_utc(), utc(2026, 2, 15, 6, 25));
        assert_eq!(seg.arr_utc(), utc(2026, 2, 15, 14, 30));
        assert_eq!(seg.duration(), TimeDelta::minutes(8 * 60 + 5));
        assert!(itinerary.warnings.is_empty());
    }

    #[test]
    fn connection_layover_duration() {
        let itinerary = Itinerary::resolve(
            vec![
                dated("NQZ", "FRA", (2026, 2, 15), "1125", "1530", 0),
                dated("FRA", "MUC", (2026, 2, 15), "1715", "1810", 0),
            ],
            &AirportTable::builtin(),
        );

        assert_eq!(itinerary.layovers.len(), 1);
        let layover = &itinerary.layovers[0];
        assert_eq!(layover.duration, TimeDelta::minutes(60 + 45));
        assert_eq!(layover.kind, LayoverKind::Connection);
        assert!(!layover.is_anomalous());
    }

    #[test]
    fn explicit_next_day_marker() {
        // Istanbul UTC+3 to Almaty UTC+5, overnight
        let itinerary = Itinerary::resolve(
            vec![dated("IST", "ALA", (2026, 3, 25), "2110", "0435", 1)],
            &AirportTable::builtin(),
        );

        let seg = &itinerary.segments[0];
        assert_eq!(seg.dep_utc(), utc(2026, 3, 25, 18, 10));
        assert_eq!(seg.arr_utc(), utc(2026, 3, 25, 23, 35));
        assert_eq!(seg.duration(), TimeDelta::minutes(5 * 60 + 25));
    }

    #[test]
    fn missing_next_day_marker_rolls_forward() {
        // Same flight without the +1: the naive arrival would precede the
        // departure, so it must roll onto the next day.
        let explicit = Itinerary::resolve(
            vec![dated("IST", "ALA", (2026, 3, 25), "2110", "0435", 1)],
            &AirportTable::builtin(),
        );
        let rolled = Itinerary::resolve(
            vec![dated("IST", "ALA", (2026, 3, 25), "2110", "0435", 0)],
            &AirportTable::builtin(),
        );

        assert_eq!(
            rolled.segments[0].arr_utc(),
            explicit.segments[0].arr_utc()
        );
    }

    #[test]
    fn rolled_arrival_lands_on_next_local_date() {
        let itinerary = Itinerary::resolve(
            vec![dated("IST", "ALA", (2026, 3, 25), "2110", "0435", 0)],
            &AirportTable::builtin(),
        );
        assert_eq!(
            itinerary.segments[0].arrival_local().date(),
            NaiveDate::from_ymd_opt(2026, 3, 26).unwrap()
        );
    }

    #[test]
    fn utc_conversion_roundtrips_outside_transitions() {
        let itinerary = Itinerary::resolve(
            vec![dated("NQZ", "FRA", (2026, 2, 15), "1125", "1530", 0)],
            &AirportTable::builtin(),
        );

        let seg = &itinerary.segments[0];
        assert_eq!(
            seg.dep_utc().with_timezone(&Tz::Asia__Almaty).naive_local(),
            seg.dated().departure_naive()
        );
        assert_eq!(
            seg.arr_utc().with_timezone(&Tz::Europe__Berlin).naive_local(),
            seg.dated().arrival_naive()
        );
    }

    #[test]
    fn short_overnight_hop() {
        // Moscow 23:50 to Saint Petersburg 01:10 next day, same zone
        let itinerary = Itinerary::resolve(
            vec![dated("SVO", "LED", (2026, 2, 15), "2350", "0110", 1)],
            &AirportTable::builtin(),
        );
        assert_eq!(
            itinerary.segments[0].duration(),
            TimeDelta::minutes(60 + 20)
        );
    }

    #[test]
    fn unknown_airports_warn_and_fall_back_to_utc() {
        let itinerary = Itinerary::resolve(
            vec![dated("ZZZ", "FRA", (2026, 2, 15), "1125", "1530", 0)],
            &AirportTable::builtin(),
        );

        let seg = &itinerary.segments[0];
        assert!(!seg.origin_known());
        assert!(seg.dest_known());
        assert_eq!(seg.dep_utc(), utc(2026, 2, 15, 11, 25));
        assert_eq!(
            itinerary.warnings,
            vec![Warning::UnknownAirport {
                code: IataCode::parse("ZZZ").unwrap(),
                segment_index: 0,
                end: RouteEnd::Origin,
            }]
        );
    }

    #[test]
    fn ground_transfer_between_different_airports() {
        let itinerary = Itinerary::resolve(
            vec![
                dated("LED", "SVO", (2026, 2, 15), "0800", "0925", 0),
                dated("DME", "ALA", (2026, 2, 15), "1400", "2145", 0),
            ],
            &AirportTable::builtin(),
        );

        let layover = &itinerary.layovers[0];
        assert_eq!(layover.kind, LayoverKind::GroundTransfer);
        assert_eq!(layover.from.as_str(), "SVO");
        assert_eq!(layover.to.as_str(), "DME");
    }

    #[test]
    fn negative_layover_warns_but_does_not_fail() {
        let itinerary = Itinerary::resolve(
            vec![
                dated("NQZ", "FRA", (2026, 2, 15), "1125", "1530", 0),
                dated("FRA", "MUC", (2026, 2, 15), "1500", "1555", 0),
            ],
            &AirportTable::builtin(),
        );

        assert!(itinerary.layovers[0].is_anomalous());
        assert_eq!(
            itinerary.warnings,
            vec![Warning::NegativeLayover { index: 0 }]
        );
    }

    #[test]
    fn ambiguous_autumn_local_time_takes_earlier_instant() {
        // 2026-10-25 02:30 in Berlin happens twice; the earlier pass is
        // still CEST (UTC+2).
        let instant = to_utc(
            Some(chrono_tz::Tz::Europe__Berlin),
            NaiveDate::from_ymd_opt(2026, 10, 25)
                .unwrap()
                .and_hms_opt(2, 30, 0)
                .unwrap(),
        );
        assert_eq!(instant, utc(2026, 10, 25, 0, 30));
    }

    #[test]
    fn nonexistent_spring_local_time_shifts_forward() {
        // 2026-03-29 02:30 in Berlin does not exist; clocks land on 03:30
        // CEST (UTC+2).
        let instant = to_utc(
            Some(chrono_tz::Tz::Europe__Berlin),
            NaiveDate::from_ymd_opt(2026, 3, 29)
                .unwrap()
                .and_hms_opt(2, 30, 0)
                .unwrap(),
        );
        assert_eq!(instant, utc(2026, 3, 29, 1, 30));
    }

    #[test]
    fn empty_itinerary_resolves_to_nothing() {
        let itinerary = Itinerary::resolve(vec![], &AirportTable::builtin());
        assert!(itinerary.segments.is_empty());
        assert!(itinerary.layovers.is_empty());
        assert!(itinerary.warnings.is_empty());
    }
}
