//! # Feed Configuration
//!
//! The static data source for feed generation: a YAML document mapping
//! subnets to their published locations.
//!
//! Subnets are typed as [`ipnet::IpNet`] at deserialization time, so a
//! malformed prefix fails when the config is loaded rather than surfacing
//! later as a generated record that flunks the self-check.
//!
//! ```yaml
//! publisher: Example Networks
//! entries:
//!   - subnet: "2a0e:7d44:f000::/40"
//!     location:
//!       country: US
//!       region: US-WA
//!       city: Seattle
//! ```

use std::path::Path;

use ipnet::IpNet;
use serde::{Deserialize, Serialize};

use crate::error::GeofeedError;

/// A published location, one per subnet.
///
/// All fields other than the subnet itself are optional claims; an empty
/// string means "no claim" and is emitted as an empty CSV field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default)]
    pub country: String,
    /// ISO 3166-2 region code (`CC-RR`).
    #[serde(default)]
    pub region: String,
    /// City name. May contain commas; quoted on output as needed.
    #[serde(default)]
    pub city: String,
    /// Postal code.
    #[serde(default)]
    pub postal: String,
}

/// One feed entry: a subnet and the location it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    /// The network this entry describes.
    pub subnet: IpNet,
    /// Where it is.
    pub location: GeoLocation,
}

/// The whole feed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Publisher name, used in the feed header comment.
    pub publisher: String,
    /// Subnet-to-location entries, in any order; the generator sorts.
    pub entries: Vec<FeedEntry>,
}

impl FeedConfig {
    /// Load a feed configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, GeofeedError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GeofeedError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content)
            .map_err(|e| GeofeedError::Config(format!("{}: {e}", path.display())))
    }

    /// Parse a feed configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}
