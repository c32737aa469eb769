//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the backend sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── Gav ─────────────────────────────────────────────────────────────────────

/// A Maven group-artifact-version coordinate (e.g. `"org.apache:commons-io:2.11.0"`).
///
/// Stored as the raw string. Coordinates with extra segments
/// (`group:artifact:type:version`) are kept verbatim; [`Gav::version`] returns
/// the last segment.
///
/// Parsing with [`FromStr`] checks the shape. Values read from the server go
/// through [`Gav::from_raw`] and are kept as sent, so check
/// [`Gav::is_well_formed`] before relying on the parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gav(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid GAV {0:?}: expected group:artifact:version")]
pub struct GavError(pub String);

impl Gav {
    /// Build a coordinate from its parts.
    pub fn new(group: &str, artifact: &str, version: &str) -> Self {
        Self(format!("{}:{}:{}", group, artifact, version))
    }

    /// Wrap a coordinate exactly as received, without checking its shape.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the value has at least `group:artifact:version`, none empty.
    pub fn is_well_formed(&self) -> bool {
        let mut count = 0;
        for part in self.segments() {
            if part.is_empty() {
                return false;
            }
            count += 1;
        }
        count >= 3
    }

    pub fn group(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }

    pub fn artifact(&self) -> &str {
        self.segments().nth(1).unwrap_or_default()
    }

    pub fn version(&self) -> &str {
        self.segments().last().unwrap_or_default()
    }

    fn segments(&self) -> std::str::Split<'_, char> {
        self.0.split(':')
    }
}

impl std::fmt::Display for Gav {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Gav {
    type Err = GavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let gav = Gav::from_raw(s);
        if !gav.is_well_formed() {
            return Err(GavError(s.to_string()));
        }
        Ok(gav)
    }
}

impl TryFrom<&str> for Gav {
    type Error = GavError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for Gav {
    type Error = GavError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for Gav {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Gav {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Gav::from_raw)
    }
}
