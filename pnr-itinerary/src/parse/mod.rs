//! PNR text parsing: format detection, line splitting, segment grammars,
//! year inference.
//!
//! The two supported GDS line formats are represented by a closed
//! [`FormatTag`]; detection runs once over the raw text and the selected
//! grammar is then threaded through the rest of the parse, never re-detected
//! per line.

mod amadeus;
mod common;
mod lines;
mod sabre;
mod year;

use std::fmt;

use crate::domain::Segment;

pub use amadeus::AmadeusGrammar;
pub use lines::candidate_lines;
pub use sabre::SabreGrammar;
pub use year::assign_years;

/// Fatal parse errors. Anything discovered before timezone resolution kills
/// the whole parse: segment order and count integrity matter for layover
/// chaining, so a half-read itinerary would be worse than none.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Neither grammar's structural signature matched anywhere in the input.
    #[error("no supported GDS format recognized in the input")]
    UnrecognizedFormat,

    /// A segment-shaped line is missing a mandatory field.
    #[error("segment line {line}: missing or invalid {field}")]
    MalformedSegment { line: usize, field: &'static str },

    /// No non-decreasing year assignment exists for a segment's date.
    #[error("segment line {line}: no consistent year assignment for its date")]
    AmbiguousYear { line: usize },
}

/// The two supported GDS record variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    /// Token-delimited Sabre display lines with slash trailers (`/DCKC /E`)
    /// and the booking class glued to the flight number (`921Y`).
    SabreStyle,
    /// Amadeus cryptic air segments with a day-of-week digit, a separate
    /// class token, and trailing equipment/meal columns.
    AmadeusStyle,
}

impl FormatTag {
    /// Returns the grammar implementation for this tag.
    pub fn grammar(&self) -> &'static dyn SegmentGrammar {
        match self {
            FormatTag::SabreStyle => &SabreGrammar,
            FormatTag::AmadeusStyle => &AmadeusGrammar,
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatTag::SabreStyle => f.write_str("Sabre"),
            FormatTag::AmadeusStyle => f.write_str("Amadeus"),
        }
    }
}

/// One parsing strategy per format variant.
///
/// `matches` checks the structural signature only (line shape, anchor
/// tokens); `parse_line` does the full field extraction. A line that is not
/// segment-shaped at all yields `Ok(None)`; a segment-shaped line with a
/// missing mandatory field is a hard error.
pub trait SegmentGrammar: Sync {
    /// The tag this grammar implements.
    fn tag(&self) -> FormatTag;

    /// Cheap structural check used by format detection.
    fn matches(&self, line: &str) -> bool;

    /// Parse one candidate line into a segment.
    fn parse_line(&self, line_no: usize, line: &str) -> Result<Option<Segment>, ParseError>;

    /// Offer a non-segment line as a continuation of the previous segment.
    /// Returns true if the line was consumed.
    fn attach_continuation(&self, _segment: &mut Segment, _line: &str) -> bool {
        false
    }
}

/// Classify raw input as one of the two supported record variants.
///
/// Inspects candidate lines in order and decides on the first line carrying
/// either grammar's structural signature, so detection is decidable from a
/// prefix of the input.
///
/// # Errors
///
/// [`ParseError::UnrecognizedFormat`] if no line matches either signature.
pub fn detect_format(text: &str) -> Result<FormatTag, ParseError> {
    for (_, line) in candidate_lines(text) {
        if SabreGrammar.matches(line) {
            return Ok(FormatTag::SabreStyle);
        }
        if AmadeusGrammar.matches(line) {
            return Ok(FormatTag::AmadeusStyle);
        }
    }
    Err(ParseError::UnrecognizedFormat)
}

/// Extract flight segments from raw input using the grammar selected by
/// `tag`. Segments come out in source order; lines that match no pattern are
/// skipped, continuation lines are folded into the previous segment.
pub fn parse_segments(text: &str, tag: FormatTag) -> Result<Vec<Segment>, ParseError> {
    let grammar = tag.grammar();
    let mut segments = Vec::new();

    for (line_no, line) in candidate_lines(text) {
        match grammar.parse_line(line_no, line)? {
            Some(segment) => segments.push(segment),
            None => {
                if let Some(last) = segments.last_mut() {
                    if grammar.attach_continuation(last, line) {
                        continue;
                    }
                }
                tracing::debug!(line_no, "skipping non-segment line");
            }
        }
    }

    Ok(segments)
}
