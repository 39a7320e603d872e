//! GDS reservation text to Russian itinerary converter.
//!
//! Takes the raw text dump of a booked PNR (Sabre-style or Amadeus-style
//! segment lines), extracts the flight segments, resolves airport timezones,
//! computes layovers in absolute time, and renders the result as Russian text.

pub mod airports;
pub mod domain;
pub mod parse;
pub mod pipeline;
pub mod render;
pub mod resolve;
