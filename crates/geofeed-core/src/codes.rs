//! # Country and Region Code Validation
//!
//! Shape checks for the country field (ISO 3166-1 alpha-2) and the region
//! field (ISO 3166-2, `CC-RR`). These are syntax checks only; no attempt is
//! made to verify that a code is actually assigned.
//!
//! Absence is modeled as the empty string, never as truthiness: an empty
//! field is a legal "no claim" and produces no finding.

use crate::report::{CodeProperty, CodeScope, FeedReport, LineContext, RegionIssue, Violation};

/// Check a candidate alpha-2 country code.
///
/// Empty is valid. A non-empty code must be exactly 2 characters, all
/// alphabetic, all uppercase; every violated property is reported, not just
/// the first. Returns the code whenever one is present, malformed or not:
/// the country/region consistency check compares whatever was claimed, and
/// only an absent claim suppresses it.
pub fn check_country_code<'a>(
    code: &'a str,
    scope: CodeScope,
    line: LineContext<'_>,
    report: &mut FeedReport,
) -> Option<&'a str> {
    if code.is_empty() {
        return None;
    }

    if code.chars().count() != 2 {
        report.record(
            line,
            Violation::CountryCodeFormat { scope, property: CodeProperty::Length },
        );
    }
    if !code.chars().all(|c| c.is_ascii_alphabetic()) {
        report.record(
            line,
            Violation::CountryCodeFormat { scope, property: CodeProperty::Alphabetic },
        );
    }
    if code.chars().any(|c| c.is_ascii_lowercase()) {
        report.record(
            line,
            Violation::CountryCodeFormat { scope, property: CodeProperty::Uppercase },
        );
    }

    Some(code)
}

/// Check the region field against the `CC-RR` shape.
///
/// Empty is valid. A non-empty code must split into exactly two parts on a
/// single dash; the `CC` part reuses the country-code checks (reported
/// against the region country scope), the `RR` part must be non-empty,
/// alphabetic, and uppercase. Returns the region's country prefix whenever
/// the split produced one, shape findings notwithstanding; a region that
/// does not split at all carries no usable country claim.
pub fn check_region_code<'a>(
    code: &'a str,
    line: LineContext<'_>,
    report: &mut FeedReport,
) -> Option<&'a str> {
    if code.is_empty() {
        return None;
    }

    let mut parts = code.split('-');
    let (country, region) = match (parts.next(), parts.next(), parts.next()) {
        (Some(country), Some(region), None) => (country, region),
        _ => {
            report.record(line, Violation::RegionCodeFormat(RegionIssue::Shape));
            return None;
        }
    };

    let region_country = check_country_code(country, CodeScope::RegionCountry, line, report);

    if region.is_empty() {
        report.record(line, Violation::RegionCodeFormat(RegionIssue::Missing));
    } else {
        if !region.chars().all(|c| c.is_ascii_alphabetic()) {
            report.record(line, Violation::RegionCodeFormat(RegionIssue::Alphabetic));
        }
        if region.chars().any(|c| c.is_ascii_lowercase()) {
            report.record(line, Violation::RegionCodeFormat(RegionIssue::Uppercase));
        }
    }

    region_country
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn country(code: &str) -> (Option<String>, Vec<Violation>) {
        let mut report = FeedReport::new();
        let line = LineContext { number: 1, raw: code };
        let out = check_country_code(code, CodeScope::Country, line, &mut report)
            .map(str::to_string);
        (out, report.findings().iter().map(|f| f.violation.clone()).collect())
    }

    fn region(code: &str) -> (Option<String>, Vec<Violation>) {
        let mut report = FeedReport::new();
        let line = LineContext { number: 1, raw: code };
        let out = check_region_code(code, line, &mut report).map(str::to_string);
        (out, report.findings().iter().map(|f| f.violation.clone()).collect())
    }

    #[test]
    fn empty_country_is_valid_but_no_claim() {
        let (out, violations) = country("");
        assert_eq!(out, None);
        assert!(violations.is_empty());
    }

    #[test]
    fn valid_country_passes_and_is_returned() {
        let (out, violations) = country("US");
        assert_eq!(out.as_deref(), Some("US"));
        assert!(violations.is_empty());
    }

    #[test]
    fn lowercase_country_reports_case_only() {
        let (out, violations) = country("us");
        // The claim is still surfaced for the consistency check.
        assert_eq!(out.as_deref(), Some("us"));
        assert_eq!(
            violations,
            vec![Violation::CountryCodeFormat {
                scope: CodeScope::Country,
                property: CodeProperty::Uppercase,
            }]
        );
    }

    #[test]
    fn all_violated_properties_are_reported() {
        // Wrong length, non-alphabetic, and lowercase at once.
        let (out, violations) = country("u1x");
        assert_eq!(out.as_deref(), Some("u1x"));
        let properties: Vec<CodeProperty> = violations
            .iter()
            .map(|v| match v {
                Violation::CountryCodeFormat { property, .. } => *property,
                other => panic!("unexpected violation: {other}"),
            })
            .collect();
        assert_eq!(
            properties,
            vec![CodeProperty::Length, CodeProperty::Alphabetic, CodeProperty::Uppercase]
        );
    }

    #[test]
    fn empty_region_is_valid() {
        let (out, violations) = region("");
        assert_eq!(out, None);
        assert!(violations.is_empty());
    }

    #[test]
    fn valid_region_returns_country_prefix() {
        let (out, violations) = region("US-WA");
        assert_eq!(out.as_deref(), Some("US"));
        assert!(violations.is_empty());
    }

    #[test]
    fn region_without_dash_is_malformed() {
        let (out, violations) = region("USWA");
        assert_eq!(out, None);
        assert_eq!(violations, vec![Violation::RegionCodeFormat(RegionIssue::Shape)]);
    }

    #[test]
    fn region_with_two_dashes_is_malformed() {
        let (out, violations) = region("US-W-A");
        assert_eq!(out, None);
        assert_eq!(violations, vec![Violation::RegionCodeFormat(RegionIssue::Shape)]);
    }

    #[test]
    fn region_with_empty_subdivision_reports_missing() {
        let (out, violations) = region("US-");
        // The country prefix itself is fine and still usable for the
        // consistency check.
        assert_eq!(out.as_deref(), Some("US"));
        assert_eq!(violations, vec![Violation::RegionCodeFormat(RegionIssue::Missing)]);
    }

    #[test]
    fn region_subdivision_shape_is_checked() {
        let (_, violations) = region("US-w1");
        assert_eq!(
            violations,
            vec![
                Violation::RegionCodeFormat(RegionIssue::Alphabetic),
                Violation::RegionCodeFormat(RegionIssue::Uppercase),
            ]
        );
    }

    #[test]
    fn long_subdivision_is_accepted() {
        // ISO 3166-2 subdivision codes may be 1-3 characters; only the
        // alphabetic/uppercase shape is enforced.
        let (out, violations) = region("GB-LND");
        assert_eq!(out.as_deref(), Some("GB"));
        assert!(violations.is_empty());
    }

    #[test]
    fn bad_region_country_is_scoped_to_region() {
        let (out, violations) = region("usa-WA");
        assert_eq!(out.as_deref(), Some("usa"));
        assert!(violations.iter().all(|v| matches!(
            v,
            Violation::CountryCodeFormat { scope: CodeScope::RegionCountry, .. }
        )));
        assert_eq!(violations.len(), 2); // length + case
    }

    proptest! {
        #[test]
        fn any_two_uppercase_letters_pass(code in "[A-Z]{2}") {
            let (out, violations) = country(&code);
            prop_assert_eq!(out, Some(code));
            prop_assert!(violations.is_empty());
        }

        #[test]
        fn wrong_length_always_reports_length(code in "[A-Z]{3,6}") {
            let (out, violations) = country(&code);
            prop_assert_eq!(out, Some(code));
            let expected = Violation::CountryCodeFormat {
                scope: CodeScope::Country,
                property: CodeProperty::Length,
            };
            prop_assert!(violations.contains(&expected));
        }
    }
}
