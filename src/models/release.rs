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
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStatus {
    Ga,
    Ea,
}

impl FromStr for ReleaseStatus {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ga" => Ok(ReleaseStatus::Ga),
            "ea" => Ok(ReleaseStatus::Ea),
            _ => Err(IngestError::InvalidConfig(format!(
                "Unknown release status: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReleaseStatus::Ga => write!(f, "ga"),
            ReleaseStatus::Ea => write!(f, "ea"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermOfSupport {
    Lts,
    Mts,
    Sts,
    #[serde(rename = "none")]
    Unknown,
}

impl TermOfSupport {
    /// Shared classification of a feature release.
    pub fn for_feature_version(feature: u32) -> Self {
        match feature {
            0 => TermOfSupport::Unknown,
            1..=8 | 11 => TermOfSupport::Lts,
            9 | 10 => TermOfSupport::Sts,
            12..=16 => Self::odd_mts_even_sts(feature),
            _ if (feature - 17) % 4 == 0 => TermOfSupport::Lts,
            _ => Self::odd_mts_even_sts(feature),
        }
    }

    fn odd_mts_even_sts(feature: u32) -> Self {
        if feature % 2 == 1 {
            TermOfSupport::Mts
        } else {
            TermOfSupport::Sts
        }
    }
}

impl FromStr for TermOfSupport {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lts" => Ok(TermOfSupport::Lts),
            "mts" => Ok(TermOfSupport::Mts),
            "sts" => Ok(TermOfSupport::Sts),
            "none" | "" => Ok(TermOfSupport::Unknown),
            _ => Err(IngestError::InvalidConfig(format!(
                "Unknown term of support: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for TermOfSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let term = match self {
            TermOfSupport::Lts => "lts",
            TermOfSupport::Mts => "mts",
            TermOfSupport::Sts => "sts",
            TermOfSupport::Unknown => "none",
        };
        write!(f, "{term}")
    }
}

/// A feature release line and what the major-version catalog knows about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorVersion {
    pub feature: u32,
    pub term_of_support: TermOfSupport,
    pub maintained: bool,
    #[serde(default)]
    pub versions: Vec<VersionNumber>,
}

impl MajorVersion {
    pub fn new(feature: u32) -> Self {
        Self {
            feature,
            term_of_support: TermOfSupport::for_feature_version(feature),
            maintained: false,
            versions: Vec::new(),
        }
    }

    pub fn with_maintained(mut self, maintained: bool) -> Self {
        self.maintained = maintained;
        self
    }

    pub fn with_versions(mut self, versions: Vec<VersionNumber>) -> Self {
        self.versions = versions;
        self
    }
}
