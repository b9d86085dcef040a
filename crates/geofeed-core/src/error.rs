//! # Fatal Error Types
//!
//! The errors that abort an operation outright. Line-local validation
//! findings are *not* errors in this sense; they live in
//! [`crate::report::FeedReport`] and never interrupt a run.

use thiserror::Error;

/// Top-level fatal error for feed generation and configuration loading.
#[derive(Error, Debug)]
pub enum GeofeedError {
    /// The feed configuration could not be loaded or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// The generator produced a feed that its own validator rejects.
    /// This means the generator and validator have drifted apart and is
    /// always a bug; the rendered report is carried for the operator.
    #[error("generated feed failed validation; this is a bug:\n{report}")]
    SelfCheck {
        /// The rendered validation report for the rejected feed.
        report: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
