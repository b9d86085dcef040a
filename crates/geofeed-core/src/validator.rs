//! # Feed Validation Engine
//!
//! Drives the full per-line check sequence over an RFC 8805 feed: line
//! classification, quote-aware field splitting, the 5-field cardinality
//! check, subnet routability, country and region code shape, and the
//! country/region consistency check. Every finding lands in the engine's
//! [`FeedReport`]; the run never short-circuits on a bad line.
//!
//! ## Run Semantics
//!
//! `validate` always starts from a clean state: the report and line counter
//! are reset before the first line is touched, so repeated runs on the same
//! engine instance never leak findings across feeds. A run processes the
//! whole feed to completion; execution is synchronous and single-threaded.
//! Callers validating feeds in parallel should use one engine per feed.

use crate::codes::{check_country_code, check_region_code};
use crate::record::{self, LineKind};
use crate::report::{CodeScope, FeedReport, LineContext, Violation};
use crate::subnet::check_subnet;

/// Number of fields in a well-formed RFC 8805 record.
pub const RECORD_FIELDS: usize = 5;

/// The validation engine. One instance validates one feed at a time.
#[derive(Debug, Default)]
pub struct FeedValidator {
    report: FeedReport,
}

impl FeedValidator {
    /// Create an engine with an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a whole feed given as one text blob.
    pub fn validate(&mut self, feed: &str) -> &FeedReport {
        self.validate_lines(feed.lines())
    }

    /// Validate a feed given as an ordered sequence of raw lines.
    ///
    /// Lines are 1-indexed for reporting. Returns the report for this run;
    /// it remains readable via [`FeedValidator::report`] until the next run.
    pub fn validate_lines<'a, I>(&mut self, lines: I) -> &FeedReport
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.report.clear();

        let mut count = 0;
        for (idx, raw) in lines.into_iter().enumerate() {
            count = idx + 1;
            self.validate_line(idx + 1, raw);
        }

        tracing::debug!(
            lines = count,
            findings = self.report.findings().len(),
            "feed validation complete"
        );
        &self.report
    }

    /// The report of the most recent run.
    pub fn report(&self) -> &FeedReport {
        &self.report
    }

    /// True if the most recent run recorded any finding.
    pub fn has_errors(&self) -> bool {
        self.report.has_errors()
    }

    fn validate_line(&mut self, number: usize, raw: &str) {
        let stripped = record::strip_terminators(raw);
        if record::classify(stripped) == LineKind::Comment {
            return;
        }

        let line = LineContext { number, raw: stripped };
        let data = record::strip_inline_comment(stripped);
        let fields = record::split_fields(data);

        if fields.len() != RECORD_FIELDS {
            self.report.record(line, Violation::FieldCount(fields.len()));
        }

        // Whatever fields are present are still checked, short or long.
        if let Some(subnet) = fields.first() {
            check_subnet(subnet, line, &mut self.report);
        }

        let country = fields
            .get(1)
            .and_then(|c| check_country_code(c, CodeScope::Country, line, &mut self.report));

        let region_country = fields
            .get(2)
            .and_then(|r| check_region_code(r, line, &mut self.report));

        if let (Some(country), Some(region_country)) = (country, region_country) {
            if country != region_country {
                self.report.record(
                    line,
                    Violation::CountryRegionMismatch {
                        country: country.to_string(),
                        region_country: region_country.to_string(),
                    },
                );
            }
        }
    }
}
