//! # Validate Subcommand
//!
//! Lints an RFC 8805 feed. Reads the feed from a file path or, when no
//! path is given, from stdin, so the binary works as a pre-publish filter
//! in a pipeline.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use geofeed_core::FeedValidator;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Feed file to validate; reads stdin when omitted.
    pub input: Option<PathBuf>,
}

/// Run the validate subcommand. Returns the process exit code.
pub fn run_validate(args: &ValidateArgs) -> anyhow::Result<u8> {
    let feed = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read feed from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read feed from stdin")?;
            buf
        }
    };

    let mut validator = FeedValidator::new();
    let report = validator.validate(&feed);

    if report.has_errors() {
        report.render(&mut std::io::stderr())?;
        tracing::warn!(findings = report.findings().len(), "feed has errors");
        Ok(1)
    } else {
        tracing::info!("feed is valid");
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_feed_file_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.csv");
        std::fs::write(&path, "# header\n1.2.3.0/24,US,US-CA,,\n").unwrap();
        let code = run_validate(&ValidateArgs { input: Some(path) }).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn invalid_feed_file_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.csv");
        std::fs::write(&path, "10.0.0.0/8,US,,,\n").unwrap();
        let code = run_validate(&ValidateArgs { input: Some(path) }).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn missing_feed_file_is_an_error() {
        let args = ValidateArgs { input: Some(PathBuf::from("/nonexistent/feed.csv")) };
        assert!(run_validate(&args).is_err());
    }
}
