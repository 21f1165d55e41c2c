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
use crate::models::distribution::Distribution;
use crate::models::platform::{Architecture, Bitness, OperatingSystem};
use crate::models::release::{ReleaseStatus, TermOfSupport};
use crate::version::VersionNumber;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Jdk,
    Jre,
}

impl FromStr for PackageType {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jdk" => Ok(PackageType::Jdk),
            "jre" => Ok(PackageType::Jre),
            _ => Err(IngestError::InvalidConfig(format!(
                "Unknown package type: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pkg = match self {
            PackageType::Jdk => "jdk",
            PackageType::Jre => "jre",
        };
        write!(f, "{pkg}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveType {
    TarGz,
    Tar,
    Zip,
    Dmg,
    Pkg,
    Msi,
    Exe,
    Deb,
    Rpm,
    SrcTar,
}

/// Filename suffixes in match order. Source tarballs must be checked before `.tar.gz`.
const ARCHIVE_SUFFIXES: &[(&str, ArchiveType)] = &[
    ("-src.tar.gz", ArchiveType::SrcTar),
    (".src.tar.gz", ArchiveType::SrcTar),
    ("_src.tar.gz", ArchiveType::SrcTar),
    (".tar.gz", ArchiveType::TarGz),
    (".tgz", ArchiveType::TarGz),
    (".tar", ArchiveType::Tar),
    (".zip", ArchiveType::Zip),
    (".dmg", ArchiveType::Dmg),
    (".pkg", ArchiveType::Pkg),
    (".msi", ArchiveType::Msi),
    (".exe", ArchiveType::Exe),
    (".deb", ArchiveType::Deb),
    (".rpm", ArchiveType::Rpm),
];

impl ArchiveType {
    pub fn extension(&self) -> &str {
        match self {
            ArchiveType::TarGz => "tar.gz",
            ArchiveType::Tar => "tar",
            ArchiveType::Zip => "zip",
            ArchiveType::Dmg => "dmg",
            ArchiveType::Pkg => "pkg",
            ArchiveType::Msi => "msi",
            ArchiveType::Exe => "exe",
            ArchiveType::Deb => "deb",
            ArchiveType::Rpm => "rpm",
            ArchiveType::SrcTar => "src.tar.gz",
        }
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        ARCHIVE_SUFFIXES
            .iter()
            .find(|(suffix, _)| lower.ends_with(suffix))
            .map(|(_, archive_type)| *archive_type)
    }
}

impl FromStr for ArchiveType {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tar.gz" | "tgz" => Ok(ArchiveType::TarGz),
            "tar" => Ok(ArchiveType::Tar),
            "zip" => Ok(ArchiveType::Zip),
            "dmg" => Ok(ArchiveType::Dmg),
            "pkg" => Ok(ArchiveType::Pkg),
            "msi" => Ok(ArchiveType::Msi),
            "exe" => Ok(ArchiveType::Exe),
            "deb" => Ok(ArchiveType::Deb),
            "rpm" => Ok(ArchiveType::Rpm),
            "src.tar.gz" | "src_tar" => Ok(ArchiveType::SrcTar),
            _ => Err(IngestError::InvalidConfig(format!(
                "Unknown archive type: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for ArchiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha512,
    Md5,
}

impl HashAlgorithm {
    /// Suffix of the checksum file published next to an asset.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => ".sha1",
            HashAlgorithm::Sha256 => ".sha256",
            HashAlgorithm::Sha512 => ".sha512",
            HashAlgorithm::Md5 => ".md5",
        }
    }
}

/// Canonical catalog record for one downloadable artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Package {
    pub distribution: Distribution,
    pub distribution_version: VersionNumber,
    pub java_version: VersionNumber,
    pub major_version: u32,
    pub package_type: PackageType,
    pub architecture: Architecture,
    pub bitness: Bitness,
    pub operating_system: OperatingSystem,
    pub archive_type: ArchiveType,
    pub term_of_support: TermOfSupport,
    pub release_status: ReleaseStatus,
    pub filename: String,
    pub direct_download_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum_type: Option<HashAlgorithm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    pub javafx_bundled: bool,
    pub directly_downloadable: bool,
    pub free_use_in_production: bool,
    pub latest_build_available: bool,
}

impl Package {
    pub fn attach_checksum(&mut self, uri: String, algorithm: HashAlgorithm) {
        self.checksum_uri = Some(uri);
        self.checksum_type = Some(algorithm);
    }

    /// Key used to decide whether the catalog already knows this artifact.
    pub fn catalog_key(&self) -> (&str, &str) {
        (&self.filename, &self.direct_download_uri)
    }
}
