//! # geofeed-cli — Command-Line Interface for the Geofeed Toolkit
//!
//! Provides the `geofeed` binary, a thin dispatch layer over
//! [`geofeed_core`].
//!
//! ## Subcommands
//!
//! - `geofeed validate`: lint a feed from a file or stdin. Exit code 0
//!   when the feed is clean, 1 when any violation was found; the report
//!   goes to stderr, one block per offending line.
//! - `geofeed generate`: build a feed from a YAML configuration and write
//!   it to a file or stdout. The feed is self-checked through the
//!   validator first; any finding aborts the write.

pub mod generate;
pub mod validate;
