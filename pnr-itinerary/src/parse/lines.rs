//! Line splitting.
//!
//! Normalizes raw PNR text into a sequence of candidate lines with 1-based
//! line numbers. Blank lines and decorative separators are dropped here;
//! anything else is passed through for the segment parser to accept or skip.

/// Split raw input into candidate lines.
///
/// Returns a lazy iterator of `(line_number, trimmed_line)` pairs. Line
/// numbers count every physical line of the input, including the discarded
/// ones, so error reports point at the original text. Calling this again on
/// the same input restarts the sequence.
///
/// # Examples
///
/// ```
/// use pnr_itinerary::parse::candidate_lines;
///
/// let text = "HEADER\n\n---\n1 KC 921Y 15FEB\n";
/// let lines: Vec<_> = candidate_lines(text).collect();
/// assert_eq!(lines, vec![(1, "HEADER"), (4, "1 KC 921Y 15FEB")]);
/// ```
pub fn candidate_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !is_separator(line))
}

/// Decorative separators: page breaks and rules made of punctuation only.
fn is_separator(line: &str) -> bool {
    line.chars().all(|c| matches!(c, '-' | '=' | '*' | '.' | '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_one_based_and_physical() {
        let text = "first\n\nthird\n";
        let lines: Vec<_> = candidate_lines(text).collect();
        assert_eq!(lines, vec![(1, "first"), (3, "third")]);
    }

    #[test]
    fn blank_and_whitespace_lines_dropped() {
        let text = "a\n   \n\t\nb";
        let lines: Vec<_> = candidate_lines(text).collect();
        assert_eq!(lines, vec![(1, "a"), (4, "b")]);
    }

    #[test]
    fn separators_dropped() {
        let text = "a\n-----\n=====\n***\nb";
        let lines: Vec<_> = candidate_lines(text).collect();
        assert_eq!(lines, vec![(1, "a"), (5, "b")]);
    }

    #[test]
    fn lines_are_trimmed() {
        let text = "  1 KC 921Y  \n";
        let lines: Vec<_> = candidate_lines(text).collect();
        assert_eq!(lines, vec![(1, "1 KC 921Y")]);
    }

    #[test]
    fn restartable() {
        let text = "a\nb\n";
        let first: Vec<_> = candidate_lines(text).collect();
        let second: Vec<_> = candidate_lines(text).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(candidate_lines("").count(), 0);
        assert_eq!(candidate_lines("\n\n\n").count(), 0);
    }
}
