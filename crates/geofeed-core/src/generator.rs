//! # Feed Generation
//!
//! Builds the published feed text from a [`FeedConfig`]: header comments,
//! records sorted by subnet, a SHA-256 content hash over the record block,
//! and the end-of-file footer.
//!
//! ## Self-Check Contract
//!
//! Every generated feed is run through [`FeedValidator`] before it is
//! returned. Any finding means the generator and validator have drifted
//! apart; that is a bug, and [`GeofeedError::SelfCheck`] surfaces it with
//! the full rendered report instead of letting a broken feed be published.

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use crate::config::{FeedConfig, FeedEntry};
use crate::error::GeofeedError;
use crate::validator::FeedValidator;

/// Build the complete feed text for a configuration, stamped with the
/// current UTC time.
pub fn generate(config: &FeedConfig) -> Result<String, GeofeedError> {
    generate_at(config, Utc::now())
}

/// Build the complete feed text with an explicit timestamp.
///
/// Output is fully deterministic for a given config and timestamp, which
/// is what makes generated feeds diffable across republishes.
pub fn generate_at(
    config: &FeedConfig,
    generated_at: DateTime<Utc>,
) -> Result<String, GeofeedError> {
    let mut entries: Vec<&FeedEntry> = config.entries.iter().collect();
    entries.sort_by_key(|e| e.subnet);

    let records: Vec<String> = entries.iter().map(|e| record_line(e)).collect();
    let record_block = if records.is_empty() {
        String::new()
    } else {
        format!("{}\n", records.join("\n"))
    };

    let hash = Sha256::digest(record_block.as_bytes());
    let hash_hex: String = hash.iter().map(|b| format!("{b:02x}")).collect();

    let timestamp = generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);

    let feed = format!(
        "# {publisher} geofeed according to RFC 8805\n\
         # Last update: {timestamp}\n\
         # Number of networks: {count}\n\
         # Content SHA256 hash (excluding comments): {hash_hex}\n\
         {record_block}\
         # End of file\n",
        publisher = config.publisher,
        count = entries.len(),
    );

    let mut validator = FeedValidator::new();
    let report = validator.validate(&feed);
    if report.has_errors() {
        return Err(GeofeedError::SelfCheck {
            report: report.render_to_string(),
        });
    }

    tracing::debug!(networks = entries.len(), "generated feed passed self-check");
    Ok(feed)
}

/// Render one `subnet,country,region,city,postal` record.
///
/// Fields containing a comma, a quote, or a hash are quoted RFC 4180
/// style: the quote-aware splitter reads them back as a single field, and
/// a quoted `#` is never mistaken for an inline comment marker.
fn record_line(entry: &FeedEntry) -> String {
    let loc = &entry.location;
    format!(
        "{},{},{},{},{}",
        entry.subnet,
        escape(&loc.country),
        escape(&loc.region),
        escape(&loc.city),
        escape(&loc.postal),
    )
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('#') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
