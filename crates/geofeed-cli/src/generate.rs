//! # Generate Subcommand
//!
//! Builds a feed from a YAML subnet configuration and writes it to a file
//! or stdout. Generation runs the self-check internally; a feed that its
//! own validator rejects is never written anywhere.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use geofeed_core::{generator, FeedConfig};

/// Arguments for the generate subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the YAML feed configuration.
    pub config: PathBuf,

    /// Output file; writes stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Override the header timestamp (RFC 3339), for reproducible output.
    #[arg(long)]
    pub generated_at: Option<String>,
}

/// Run the generate subcommand. Returns the process exit code.
pub fn run_generate(args: &GenerateArgs) -> anyhow::Result<u8> {
    let config = FeedConfig::load(&args.config)?;

    let feed = match &args.generated_at {
        Some(ts) => {
            let generated_at: DateTime<Utc> = DateTime::parse_from_rfc3339(ts)
                .with_context(|| format!("invalid --generated-at timestamp: {ts:?}"))?
                .with_timezone(&Utc);
            generator::generate_at(&config, generated_at)?
        }
        None => generator::generate(&config)?,
    };

    match &args.out {
        Some(path) => {
            std::fs::write(path, &feed)
                .with_context(|| format!("cannot write feed to {}", path.display()))?;
            tracing::info!(out = %path.display(), networks = config.entries.len(), "feed written");
        }
        None => {
            let mut stdout = std::io::stdout();
            stdout.write_all(feed.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
publisher: Example Networks
entries:
  - subnet: "2a0e:7d44:f000::/40"
    location:
      country: US
      region: US-WA
      city: Seattle
"#;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("feed.yaml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn generates_feed_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(&dir, CONFIG);
        let out = dir.path().join("feed.csv");
        let args = GenerateArgs {
            config,
            out: Some(out.clone()),
            generated_at: Some("2026-08-26T12:00:00Z".to_string()),
        };
        assert_eq!(run_generate(&args).unwrap(), 0);

        let feed = std::fs::read_to_string(&out).unwrap();
        assert!(feed.starts_with("# Example Networks geofeed according to RFC 8805\n"));
        assert!(feed.contains("# Last update: 2026-08-26T12:00:00Z\n"));
        assert!(feed.contains("2a0e:7d44:f000::/40,US,US-WA,Seattle,\n"));
        assert!(feed.ends_with("# End of file\n"));
    }

    #[test]
    fn self_check_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            &dir,
            "publisher: X\nentries:\n  - subnet: \"10.0.0.0/8\"\n    location:\n      country: US\n",
        );
        let out = dir.path().join("feed.csv");
        let args = GenerateArgs { config, out: Some(out.clone()), generated_at: None };
        assert!(run_generate(&args).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn bad_generated_at_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(&dir, CONFIG);
        let args = GenerateArgs {
            config,
            out: None,
            generated_at: Some("yesterday".to_string()),
        };
        assert!(run_generate(&args).is_err());
    }
}
