//! End-to-end pipeline: raw PNR text in, rendered itinerary out.
//!
//! The stages run strictly in order: format detection, segment extraction,
//! year inference, timezone resolution, rendering. The first three can fail
//! with a [`ParseError`]; resolution and rendering always succeed and report
//! problems as warnings instead.

use chrono::{Local, NaiveDate};

use crate::airports::AirportTable;
use crate::parse::{ParseError, assign_years, detect_format, parse_segments};
use crate::render::render_itinerary;
use crate::resolve::Itinerary;

/// Pipeline knobs. Currently just the year-inference anchor.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    anchor: NaiveDate,
}

impl PipelineConfig {
    /// Anchor year inference at an explicit date.
    pub fn new(anchor: NaiveDate) -> Self {
        Self { anchor }
    }

    /// Anchor at 1 January of `year`. Useful when the travel year is known
    /// and the exact reference day does not matter.
    pub fn with_year(year: i32) -> Self {
        Self {
            anchor: NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN),
        }
    }

    /// Anchor at today's local date.
    pub fn today() -> Self {
        Self {
            anchor: Local::now().date_naive(),
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::today()
    }
}

/// Parse and resolve raw PNR text into an itinerary.
///
/// # Errors
///
/// Any [`ParseError`] from detection, extraction, or year inference. A
/// recognized input with zero parseable segments is not an error; it yields
/// an empty itinerary.
pub fn build_itinerary(
    text: &str,
    airports: &AirportTable,
    config: &PipelineConfig,
) -> Result<Itinerary, ParseError> {
    let tag = detect_format(text)?;
    tracing::debug!(%tag, "detected GDS format");

    let segments = parse_segments(text, tag)?;
    tracing::debug!(count = segments.len(), "extracted segments");

    let dated = assign_years(segments, config.anchor)?;
    let itinerary = Itinerary::resolve(dated, airports);
    for warning in &itinerary.warnings {
        tracing::warn!(%warning, "itinerary warning");
    }
    Ok(itinerary)
}

/// Full pipeline: raw PNR text to rendered Russian display text.
///
/// # Errors
///
/// Same failure modes as [`build_itinerary`].
pub fn render_pnr(
    text: &str,
    airports: &AirportTable,
    config: &PipelineConfig,
) -> Result<String, ParseError> {
    let itinerary = build_itinerary(text, airports, config)?;
    Ok(render_itinerary(&itinerary, airports))
}
