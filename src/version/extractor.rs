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
use crate::version::VersionNumber;
use std::str::FromStr;

/// Turns vendor release tags into version numbers.
///
/// Two tag shapes are recognized:
/// - tags containing a `jdk-` marker (`jdk-21.0.2`, `graalvm-jdk-24.0.0-ea.21`), where
///   the version follows the last marker
/// - development tags (`23.1.0-dev-20230815_2115`), where the build number follows the
///   last `_` and the version precedes the first `-`
#[derive(Debug, Clone)]
pub struct VersionExtractor {
    jdk_marker: &'static str,
    dev_marker: &'static str,
}

impl Default for VersionExtractor {
    fn default() -> Self {
        Self {
            jdk_marker: "jdk-",
            dev_marker: "-dev",
        }
    }
}

impl VersionExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tag(&self, tag: &str) -> Result<VersionNumber> {
        if let Some(position) = tag.rfind(self.jdk_marker) {
            let version_text = &tag[position + self.jdk_marker.len()..];
            return VersionNumber::from_str(version_text)
                .map_err(|_| IngestError::VersionParse(tag.to_string()));
        }

        if tag.contains(self.dev_marker) {
            let build = tag
                .rsplit_once('_')
                .and_then(|(_, build)| build.parse::<u32>().ok())
                .ok_or_else(|| IngestError::VersionParse(tag.to_string()))?;
            let version_text = tag.split('-').next().unwrap_or_default();
            let version = VersionNumber::from_str(version_text)
                .map_err(|_| IngestError::VersionParse(tag.to_string()))?;
            return Ok(version.with_build(build));
        }

        Err(IngestError::VersionParse(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jdk_tag() {
        let extractor = VersionExtractor::new();

        let version = extractor.from_tag("jdk-21.0.2").unwrap();
        assert_eq!(version, VersionNumber::new(21, 0, 2, 0));

        let version = extractor.from_tag("jdk-21").unwrap();
        assert_eq!(version, VersionNumber::new(21, 0, 0, 0));
    }

    #[test]
    fn test_jdk_tag_uses_last_marker() {
        let extractor = VersionExtractor::new();

        let version = extractor.from_tag("graalvm-jdk-jdk-17.0.8").unwrap();
        assert_eq!(version, VersionNumber::new(17, 0, 8, 0));
    }

    #[test]
    fn test_early_access_tag() {
        let extractor = VersionExtractor::new();

        let version = extractor.from_tag("jdk-24.0.0-ea.21").unwrap();
        assert_eq!(version, VersionNumber::new(24, 0, 0, 0));
        assert_eq!(version.build, Some(21));
    }

    #[test]
    fn test_dev_tag() {
        let extractor = VersionExtractor::new();

        let version = extractor.from_tag("23.1.0-dev-20230815_2115").unwrap();
        assert_eq!(version, VersionNumber::new(23, 1, 0, 0));
        assert_eq!(version.build, Some(2115));
    }

    #[test]
    fn test_dev_tag_without_numeric_build() {
        let extractor = VersionExtractor::new();

        assert!(matches!(
            extractor.from_tag("23.1.0-dev-nightly"),
            Err(IngestError::VersionParse(_))
        ));
    }

    #[test]
    fn test_unrecognized_tag_is_a_parse_failure() {
        let extractor = VersionExtractor::new();

        assert!(extractor.from_tag("vm-23.1.2").is_err());
        assert!(extractor.from_tag("latest").is_err());
        assert!(extractor.from_tag("jdk-").is_err());
    }
}
