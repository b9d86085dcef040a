//! # Feed Report — Findings and Accumulation
//!
//! Defines the violation taxonomy for RFC 8805 feed validation and the
//! [`FeedReport`] accumulator that collects findings across a whole run.
//!
//! ## Design
//!
//! Violations are line-local *findings*, not Rust errors. A bad record never
//! aborts a validation run; it is recorded and the engine moves on. Only
//! [`crate::error::GeofeedError`] values are fatal.
//!
//! A [`Finding`] is immutable once recorded. The report owns every finding
//! for the duration of one run and must be cleared at the start of the next.

use std::fmt;
use std::io;

use thiserror::Error;

/// Which field a country-code check is reporting against.
///
/// The same alpha-2 checks run for the country field and for the country
/// prefix of the region field; findings name the field they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeScope {
    /// The country field (field 2 of the record).
    Country,
    /// The `CC` prefix of the region field (field 3 of the record).
    RegionCountry,
}

impl CodeScope {
    /// The field name used in rendered messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Country => "country code",
            Self::RegionCountry => "region country code",
        }
    }
}

impl fmt::Display for CodeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property of the ISO 3166-1 alpha-2 shape that a code failed.
///
/// Checked independently so that a single bad code reports every property
/// it violates, maximizing information per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeProperty {
    /// Not exactly 2 characters.
    Length,
    /// Contains a non-alphabetic character.
    Alphabetic,
    /// Contains a lowercase letter.
    Uppercase,
}

impl fmt::Display for CodeProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Length => "must be exactly 2 characters",
            Self::Alphabetic => "must be alphabetic",
            Self::Uppercase => "must be uppercase",
        })
    }
}

/// The way a region code failed the ISO 3166-2 `CC-RR` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionIssue {
    /// No dash, or more than one dash.
    Shape,
    /// A dash is present but the subdivision part is empty.
    Missing,
    /// The subdivision part contains a non-alphabetic character.
    Alphabetic,
    /// The subdivision part contains a lowercase letter.
    Uppercase,
}

impl fmt::Display for RegionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Shape => "region code must be of form CC-RR",
            Self::Missing => "region code missing",
            Self::Alphabetic => "region code must be alphabetic",
            Self::Uppercase => "region code must be uppercase",
        })
    }
}

/// A single rule violation attributed to one feed line.
///
/// All variants are recoverable: they are recorded in the [`FeedReport`]
/// and validation continues with the next check and the next line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The record did not have exactly 5 comma-separated fields.
    #[error("expected 5 fields, got {0}")]
    FieldCount(usize),

    /// The subnet field did not parse as an IP address or CIDR prefix.
    /// Carries the underlying parser diagnostic verbatim.
    #[error("invalid IP address or prefix: {0}")]
    InvalidAddress(String),

    /// The subnet parsed but is not globally routable.
    #[error("subnet must be globally routable")]
    NotGlobal,

    /// A country code (or region country prefix) failed an alpha-2 property.
    #[error("{scope} {property}")]
    CountryCodeFormat {
        /// Which field the code came from.
        scope: CodeScope,
        /// The property that failed.
        property: CodeProperty,
    },

    /// The region field failed the `CC-RR` shape.
    #[error("{0}")]
    RegionCodeFormat(RegionIssue),

    /// The country field and the region's country prefix disagree.
    #[error("country/region country mismatch: {country} vs {region_country}")]
    CountryRegionMismatch {
        /// The code in the country field.
        country: String,
        /// The `CC` prefix of the region field.
        region_country: String,
    },
}

/// Position and raw text of the feed line currently being checked.
///
/// Threaded explicitly into every sub-check so that findings carry their
/// own context; there is no shared "current line" state anywhere.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// 1-indexed line number within the feed.
    pub number: usize,
    /// The line text with terminators stripped.
    pub raw: &'a str,
}

/// One recorded violation with the line it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// 1-indexed line number within the feed.
    pub line_number: usize,
    /// The offending line text.
    pub line_text: String,
    /// The rule that was violated.
    pub violation: Violation,
}

/// Accumulates every finding of one validation run.
///
/// Findings are kept in insertion order: line order, then within-line
/// discovery order. The overall verdict is pass iff the report is empty
/// after the whole feed has been processed.
#[derive(Debug, Default)]
pub struct FeedReport {
    findings: Vec<Finding>,
}

impl FeedReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one violation against the given line.
    pub fn record(&mut self, line: LineContext<'_>, violation: Violation) {
        self.findings.push(Finding {
            line_number: line.number,
            line_text: line.raw.to_string(),
            violation,
        });
    }

    /// Drop all accumulated findings. Called at the start of every run.
    pub fn clear(&mut self) {
        self.findings.clear();
    }

    /// True if any violation has been recorded.
    pub fn has_errors(&self) -> bool {
        !self.findings.is_empty()
    }

    /// All findings, in insertion order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Write the report in the grouped human-readable form:
    ///
    /// ```text
    /// line 3: 10.0.0.0/8,US,,,
    ///     ERROR: subnet must be globally routable
    /// ```
    ///
    /// One header per offending line, one indented `ERROR:` per violation,
    /// and a blank line after each group.
    pub fn render(&self, sink: &mut impl io::Write) -> io::Result<()> {
        write!(sink, "{self}")
    }

    /// The report rendered to a string, for embedding in fatal errors.
    pub fn render_to_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current_line = None;
        for finding in &self.findings {
            if current_line != Some(finding.line_number) {
                if current_line.is_some() {
                    writeln!(f)?;
                }
                writeln!(f, "line {}: {}", finding.line_number, finding.line_text)?;
                current_line = Some(finding.line_number);
            }
            writeln!(f, "    ERROR: {}", finding.violation)?;
        }
        if current_line.is_some() {
            writeln!(f)?;
        }
        Ok(())
    }
}
