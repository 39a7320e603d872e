//! Domain types for the PNR itinerary parser.
//!
//! This module contains the core domain model types that represent
//! validated reservation data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod carrier;
mod iata;
mod segment;
mod time;

pub use carrier::{CarrierCode, FlightDesignator, InvalidCarrier, carrier_name};
pub use iata::{IataCode, InvalidIata};
pub use segment::{BookingClass, DatedSegment, Segment, SegmentStatus};
pub use time::{DateError, PartialDate, TimeError, parse_arrival_hhmm, parse_hhmm};
