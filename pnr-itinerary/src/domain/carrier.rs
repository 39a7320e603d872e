//! Airline designator types.

use std::fmt;

/// Error returned when parsing an invalid airline designator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid carrier code: {reason}")]
pub struct InvalidCarrier {
    reason: &'static str,
}

/// A valid 2-3 character IATA airline designator.
///
/// Airline designators are 2 (occasionally 3) uppercase ASCII alphanumeric
/// characters with at least one letter, e.g. `KC`, `TK`, `J2`. This type
/// guarantees that any `CarrierCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use pnr_itinerary::domain::CarrierCode;
///
/// assert_eq!(CarrierCode::parse("KC").unwrap().as_str(), "KC");
/// assert_eq!(CarrierCode::parse("J2").unwrap().as_str(), "J2");
///
/// // Purely numeric is rejected
/// assert!(CarrierCode::parse("22").is_err());
///
/// // Wrong length is rejected
/// assert!(CarrierCode::parse("K").is_err());
/// assert!(CarrierCode::parse("KCKC").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarrierCode {
    bytes: [u8; 3],
    len: u8,
}

impl CarrierCode {
    /// Parse an airline designator from a string.
    ///
    /// The input must be 2-3 uppercase ASCII alphanumeric characters and
    /// contain at least one letter.
    pub fn parse(s: &str) -> Result<Self, InvalidCarrier> {
        let raw = s.as_bytes();

        if raw.len() < 2 || raw.len() > 3 {
            return Err(InvalidCarrier {
                reason: "must be 2-3 characters",
            });
        }

        let mut has_letter = false;
        for &b in raw {
            if b.is_ascii_uppercase() {
                has_letter = true;
            } else if !b.is_ascii_digit() {
                return Err(InvalidCarrier {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
        }
        if !has_letter {
            return Err(InvalidCarrier {
                reason: "must contain at least one letter",
            });
        }

        let mut bytes = [0u8; 3];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(CarrierCode {
            bytes,
            len: raw.len() as u8,
        })
    }

    /// Returns the designator as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII alphanumerics
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap()
    }
}

impl fmt::Debug for CarrierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CarrierCode({})", self.as_str())
    }
}

impl fmt::Display for CarrierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flight designator: marketing carrier plus flight number.
///
/// # Examples
///
/// ```
/// use pnr_itinerary::domain::{CarrierCode, FlightDesignator};
///
/// let kc = CarrierCode::parse("KC").unwrap();
/// let flight = FlightDesignator::new(kc, 921);
/// assert_eq!(flight.to_string(), "KC 921");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlightDesignator {
    carrier: CarrierCode,
    number: u16,
}

impl FlightDesignator {
    /// Creates a flight designator. Flight numbers are 1-4 digits in both
    /// supported GDS grammars, so `u16` covers the full range.
    pub fn new(carrier: CarrierCode, number: u16) -> Self {
        Self { carrier, number }
    }

    /// Returns the marketing carrier.
    pub fn carrier(&self) -> CarrierCode {
        self.carrier
    }

    /// Returns the flight number.
    pub fn number(&self) -> u16 {
        self.number
    }
}

impl fmt::Display for FlightDesignator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.carrier, self.number)
    }
}

/// Display names for common carriers.
///
/// Best effort: returns `None` for carriers not in the table, in which case
/// callers fall back to the bare designator.
pub fn carrier_name(code: CarrierCode) -> Option<&'static str> {
    let name = match code.as_str() {
        "AF" => "Air France",
        "AY" => "Finnair",
        "BA" => "British Airways",
        "EK" => "Emirates",
        "J2" => "Azerbaijan Airlines",
        "KC" => "Air Astana",
        "KL" => "KLM",
        "LH" => "Lufthansa",
        "LX" => "Swiss",
        "QR" => "Qatar Airways",
        "SU" => "Aeroflot",
        "TK" => "Turkish Airlines",
        "UA" => "United Airlines",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_carriers() {
        assert!(CarrierCode::parse("KC").is_ok());
        assert!(CarrierCode::parse("TK").is_ok());
        assert!(CarrierCode::parse("J2").is_ok());
        assert!(CarrierCode::parse("2B").is_ok());
        assert!(CarrierCode::parse("SWR").is_ok());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(CarrierCode::parse("").is_err());
        assert!(CarrierCode::parse("K").is_err());
        assert!(CarrierCode::parse("KCKC").is_err());
    }

    #[test]
    fn reject_all_digits() {
        assert!(CarrierCode::parse("22").is_err());
        assert!(CarrierCode::parse("123").is_err());
    }

    #[test]
    fn reject_lowercase_and_symbols() {
        assert!(CarrierCode::parse("kc").is_err());
        assert!(CarrierCode::parse("K-").is_err());
        assert!(CarrierCode::parse("K ").is_err());
    }

    #[test]
    fn as_str_roundtrip() {
        assert_eq!(CarrierCode::parse("TK").unwrap().as_str(), "TK");
        assert_eq!(CarrierCode::parse("SWR").unwrap().as_str(), "SWR");
    }

    #[test]
    fn designator_display() {
        let tk = CarrierCode::parse("TK").unwrap();
        assert_eq!(FlightDesignator::new(tk, 1921).to_string(), "TK 1921");
        assert_eq!(FlightDesignator::new(tk, 5).to_string(), "TK 5");
    }

    #[test]
    fn known_carrier_names() {
        let kc = CarrierCode::parse("KC").unwrap();
        assert_eq!(carrier_name(kc), Some("Air Astana"));

        let xx = CarrierCode::parse("XX").unwrap();
        assert_eq!(carrier_name(xx), None);
    }
}
