//! # geofeed-core — RFC 8805 Feed Validation and Generation
//!
//! Library for self-published IP geolocation feeds in the RFC 8805 CSV
//! format, one `subnet,country,region,city,postal` record per line.
//!
//! ## Components
//!
//! - [`validator::FeedValidator`]: the validation engine. Walks a feed
//!   line by line, classifies comments, splits records quote-aware, and
//!   checks subnet routability, country/region code shape, field
//!   cardinality, and country/region consistency. All findings for a run
//!   accumulate in a [`report::FeedReport`]; a run never short-circuits.
//!
//! - [`generator`]: builds feed text from a [`config::FeedConfig`]
//!   (sorted records, header comments, SHA-256 content hash, footer) and
//!   self-checks it through the validator before returning.
//!
//! ## Error Model
//!
//! Per-line rule violations are recoverable findings
//! ([`report::Violation`]), collected and reported together. Only
//! [`error::GeofeedError`] values (unreadable config, self-check failure,
//! I/O) are fatal.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - The library never installs a tracing subscriber; binaries do.

pub mod codes;
pub mod config;
pub mod error;
pub mod generator;
pub mod record;
pub mod report;
pub mod subnet;
pub mod validator;

pub use config::{FeedConfig, FeedEntry, GeoLocation};
pub use error::GeofeedError;
pub use report::{FeedReport, Finding, Violation};
pub use validator::FeedValidator;
