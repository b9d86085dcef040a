//! # Record Decoding — Line Classification and Field Splitting
//!
//! Decides whether a raw feed line is a comment or a data record, and
//! decomposes data records into their comma-separated fields.
//!
//! Splitting is quote-aware (RFC 4180 quoting via the `csv` crate) because
//! city names can legitimately contain commas. No assumption is made that a
//! record has exactly 5 fields; the splitter returns whatever it finds and
//! the engine reports the cardinality violation separately.

/// Classification of one raw feed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Blank, or first non-whitespace character is `#`. Skipped entirely.
    Comment,
    /// Everything else; advances to field splitting and validation.
    Data,
}

/// Strip trailing CR/LF terminators from a raw line.
pub fn strip_terminators(raw: &str) -> &str {
    raw.trim_end_matches(['\r', '\n'])
}

/// Classify a line with terminators already stripped.
pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        LineKind::Comment
    } else {
        LineKind::Data
    }
}

/// Strip a trailing `#...` inline comment from a data line.
///
/// Quote-aware: a `#` inside an RFC 4180 quoted field is field content
/// (city names can contain anything), not a comment marker.
pub fn strip_inline_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (idx, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..idx],
            _ => {}
        }
    }
    line
}

/// Split a data line into its comma-separated fields, quote-aware.
///
/// A line that cannot be decoded as a CSV record (e.g. an unterminated
/// quote) falls back to a plain comma split so that field-level checks
/// still run against something.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        _ => line.split(',').map(str::to_string).collect(),
    }
}
