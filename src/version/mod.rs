// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{IngestError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub mod extractor;

pub use extractor::VersionExtractor;

/// Java version number as used by the catalog.
///
/// Equality, hashing and ordering only consider `(feature, interim, update, patch)`.
/// The build number is carried as metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionNumber {
    pub feature: u32,
    #[serde(default)]
    pub interim: u32,
    #[serde(default)]
    pub update: u32,
    #[serde(default)]
    pub patch: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<u32>,
}

impl VersionNumber {
    pub fn new(feature: u32, interim: u32, update: u32, patch: u32) -> Self {
        Self {
            feature,
            interim,
            update,
            patch,
            build: None,
        }
    }

    pub fn with_build(mut self, build: u32) -> Self {
        self.build = Some(build);
        self
    }

    fn key(&self) -> (u32, u32, u32, u32) {
        (self.feature, self.interim, self.update, self.patch)
    }

    /// Parses the numeric part of a version, e.g. `21.0.2`, `24-ea+20`, `25.0.0-ea.21`.
    fn parse_numeric(text: &str, original: &str) -> Result<(u32, u32, u32, u32)> {
        let mut components = [0u32; 4];
        for (index, part) in text.split('.').enumerate() {
            if index >= components.len() {
                break;
            }
            components[index] = part
                .parse::<u32>()
                .map_err(|_| IngestError::VersionParse(original.to_string()))?;
        }
        Ok((components[0], components[1], components[2], components[3]))
    }
}

impl PartialEq for VersionNumber {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for VersionNumber {}

impl Hash for VersionNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for VersionNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl FromStr for VersionNumber {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let text = trimmed.strip_prefix("jdk-").unwrap_or(trimmed);
        if text.is_empty() {
            return Err(IngestError::VersionParse(s.to_string()));
        }

        // Build metadata after '+' wins over a build encoded in the pre-release part
        let (text, mut build) = match text.split_once('+') {
            Some((before, after)) => {
                let digits: String = after.chars().take_while(|c| c.is_ascii_digit()).collect();
                (before, digits.parse::<u32>().ok())
            }
            None => (text, None),
        };

        let numeric = match text.split_once('-') {
            Some((before, pre_release)) => {
                if build.is_none() {
                    build = pre_release
                        .rsplit('.')
                        .next()
                        .and_then(|last| last.parse::<u32>().ok());
                }
                before
            }
            None => text,
        };

        if numeric.is_empty() {
            return Err(IngestError::VersionParse(s.to_string()));
        }

        let (feature, interim, update, patch) = Self::parse_numeric(numeric, s)?;
        if feature == 0 {
            return Err(IngestError::VersionParse(s.to_string()));
        }

        let mut version = VersionNumber::new(feature, interim, update, patch);
        version.build = build;
        Ok(version)
    }
}

impl std::fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.feature, self.interim, self.update)?;
        if self.patch > 0 {
            write!(f, ".{}", self.patch)?;
        }
        if let Some(build) = self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        assert_eq!(
            VersionNumber::from_str("21").unwrap(),
            VersionNumber::new(21, 0, 0, 0)
        );
        assert_eq!(
            VersionNumber::from_str("21.0.2").unwrap(),
            VersionNumber::new(21, 0, 2, 0)
        );
        assert_eq!(
            VersionNumber::from_str("11.0.9.1").unwrap(),
            VersionNumber::new(11, 0, 9, 1)
        );

        let with_build = VersionNumber::from_str("17.0.9+9").unwrap();
        assert_eq!(with_build, VersionNumber::new(17, 0, 9, 0));
        assert_eq!(with_build.build, Some(9));

        assert!(VersionNumber::from_str("").is_err());
        assert!(VersionNumber::from_str("invalid").is_err());
        assert!(VersionNumber::from_str("0.1").is_err());
    }

    #[test]
    fn test_early_access_versions() {
        let ea = VersionNumber::from_str("24-ea+20").unwrap();
        assert_eq!(ea, VersionNumber::new(24, 0, 0, 0));
        assert_eq!(ea.build, Some(20));

        let ea = VersionNumber::from_str("25.0.0-ea.21").unwrap();
        assert_eq!(ea, VersionNumber::new(25, 0, 0, 0));
        assert_eq!(ea.build, Some(21));

        let ea = VersionNumber::from_str("jdk-23-ea").unwrap();
        assert_eq!(ea.feature, 23);
        assert_eq!(ea.build, None);
    }

    #[test]
    fn test_build_is_not_part_of_ordering() {
        let a = VersionNumber::new(21, 0, 2, 0).with_build(13);
        let b = VersionNumber::new(21, 0, 2, 0).with_build(14);
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);

        let newer = VersionNumber::new(21, 0, 3, 0);
        assert!(newer > a);
        assert!(VersionNumber::new(22, 0, 0, 0) > newer);
        assert!(VersionNumber::new(21, 1, 0, 0) > newer);
    }

    #[test]
    fn test_version_display() {
        assert_eq!(VersionNumber::new(21, 0, 0, 0).to_string(), "21.0.0");
        assert_eq!(VersionNumber::new(11, 0, 9, 1).to_string(), "11.0.9.1");
        assert_eq!(
            VersionNumber::new(21, 0, 2, 0).with_build(13).to_string(),
            "21.0.2+13"
        );
    }
}
