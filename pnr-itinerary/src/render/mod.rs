//! Russian-language itinerary rendering.
//!
//! Turns a resolved itinerary into display text: one line per flight with
//! localized dates, city names, and flight durations, and one line per
//! layover between them. Rendering never fails; unknown airports and
//! implausible connections are called out inline.

mod plural;

use std::fmt::Write;

use chrono::{Datelike, NaiveDate, TimeDelta, Timelike};

use crate::airports::AirportTable;
use crate::domain::{IataCode, carrier_name};
use crate::resolve::{Itinerary, Layover, LayoverKind, ResolvedSegment};

pub use plural::{PluralCategory, plural_category, plural_ru};

/// Month abbreviations in genitive, as they follow a day number.
const RU_MONTHS: [&str; 12] = [
    "янв.", "февр.", "мар.", "апр.", "мая", "июн.", "июл.", "авг.", "сент.", "окт.", "нояб.",
    "дек.",
];

/// Weekday abbreviations, Monday first to match chrono's numbering.
const RU_WEEKDAYS: [&str; 7] = ["пн", "вт", "ср", "чт", "пт", "сб", "вс"];

/// Shown for airports the table does not know.
const UNKNOWN_AIRPORT: &str = "неизвестный аэропорт";

/// A duration in Russian, accusative: `1 час, 45 минут`, `55 минут`.
/// Minutes are omitted on whole hours; zero renders as `0 минут`.
pub fn format_duration_ru(duration: TimeDelta) -> String {
    let total = duration.num_minutes().unsigned_abs();
    let hours = total / 60;
    let minutes = total % 60;

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{hours} {}", plural_ru(hours, "час", "часа", "часов"));
    }
    if minutes > 0 || hours == 0 {
        if !out.is_empty() {
            out.push_str(", ");
        }
        let _ = write!(
            out,
            "{minutes} {}",
            plural_ru(minutes, "минуту", "минуты", "минут")
        );
    }
    out
}

/// A date in Russian: `вс, 15 февр.`
pub fn format_date_ru(date: NaiveDate) -> String {
    format!(
        "{}, {} {}",
        RU_WEEKDAYS[date.weekday().num_days_from_monday() as usize],
        date.day(),
        RU_MONTHS[date.month0() as usize],
    )
}

/// Airport display name: Russian city when known, inline marker otherwise.
fn place(airports: &AirportTable, code: IataCode) -> String {
    match airports.get(code) {
        Some(record) => record.display_name().to_string(),
        None => format!("{code} ({UNKNOWN_AIRPORT})"),
    }
}

fn hhmm(time: chrono::NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

fn segment_line(seg: &ResolvedSegment, airports: &AirportTable) -> String {
    let s = seg.dated().segment();

    // The resolved local arrival carries any forward roll, so the +N marker
    // is right even when the source line omitted it.
    let arrival = {
        let days = (seg.arrival_local().date() - seg.dated().departure_date()).num_days();
        if days > 0 {
            format!("{}+{days}", hhmm(seg.arrival_local().time()))
        } else {
            hhmm(seg.arrival_local().time())
        }
    };

    // `рейс KC 921 (Air Astana)`, with the operating carrier called out on
    // codeshares unless it is the marketing carrier itself.
    let name = carrier_name(s.flight.carrier());
    let operated = s
        .operated_by
        .as_deref()
        .filter(|op| name != Some(*op));
    let flight = match (name, operated) {
        (Some(name), Some(op)) => format!("рейс {} ({name}, выполняет {op})", s.flight),
        (Some(name), None) => format!("рейс {} ({name})", s.flight),
        (None, Some(op)) => format!("рейс {} (выполняет {op})", s.flight),
        (None, None) => format!("рейс {}", s.flight),
    };

    format!(
        "{} {} – {}, {} — {}, {}, в пути {}",
        format_date_ru(seg.dated().departure_date()),
        hhmm(s.departure),
        arrival,
        place(airports, s.origin),
        place(airports, s.destination),
        flight,
        format_duration_ru(seg.duration()),
    )
}

fn layover_line(layover: &Layover, airports: &AirportTable) -> String {
    let mut out = format!("Пересадка {}", format_duration_ru(layover.duration));
    if layover.kind == LayoverKind::GroundTransfer {
        let _ = write!(
            out,
            ", переезд {} — {}",
            place(airports, layover.from),
            place(airports, layover.to),
        );
    }
    if layover.is_anomalous() {
        out.push_str(" — внимание: некорректная стыковка");
    }
    out
}

/// Render a resolved itinerary as display text, one line per flight and per
/// layover, in itinerary order.
pub fn render_itinerary(itinerary: &Itinerary, airports: &AirportTable) -> String {
    if itinerary.segments.is_empty() {
        return "Сегменты не распознаны.".to_string();
    }

    let mut lines = Vec::new();
    for (i, seg) in itinerary.segments.iter().enumerate() {
        lines.push(segment_line(seg, airports));
        if let Some(layover) = itinerary.layovers.get(i) {
            lines.push(layover_line(layover, airports));
        }
    }
    lines.join("\n")
}
