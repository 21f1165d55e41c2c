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

//! Download URL synthesis for vendors that publish artifacts on a static host
//! without an enumerable release listing.

use crate::cache::MajorVersionCatalog;
use crate::config::GraalVmConfig;
use crate::metadata::context::IngestContext;
use crate::models::package::{ArchiveType, HashAlgorithm};
use crate::models::platform::{Architecture, OperatingSystem};
use crate::version::VersionNumber;
use log::{debug, trace};

/// Platform and archive combinations published on the archive host.
pub const ALLOWED_COMBINATIONS: &[(OperatingSystem, &[Architecture], ArchiveType)] = &[
    (
        OperatingSystem::Linux,
        &[Architecture::Aarch64, Architecture::X64],
        ArchiveType::TarGz,
    ),
    (
        OperatingSystem::MacOS,
        &[Architecture::Aarch64, Architecture::X64],
        ArchiveType::TarGz,
    ),
    (OperatingSystem::Windows, &[Architecture::X64], ArchiveType::Zip),
];

const FILENAME_PREFIX: &str = "graalvm-jdk-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCandidate {
    pub version: VersionNumber,
    pub operating_system: OperatingSystem,
    pub architecture: Architecture,
    pub archive_type: ArchiveType,
    pub filename: String,
    pub uri: String,
}

impl UrlCandidate {
    pub fn checksum_uri(&self) -> String {
        format!("{}{}", self.uri, HashAlgorithm::Sha256.file_suffix())
    }
}

/// A candidate that exists remotely, with its checksum URI when that exists too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedCandidate {
    pub candidate: UrlCandidate,
    pub checksum_uri: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UrlSynthesizer {
    package_url: String,
    minimum_feature_version: u32,
    excluded_feature_versions: Vec<u32>,
}

impl UrlSynthesizer {
    pub fn new(
        package_url: impl Into<String>,
        minimum_feature_version: u32,
        excluded_feature_versions: Vec<u32>,
    ) -> Self {
        let mut package_url = package_url.into();
        if !package_url.ends_with('/') {
            package_url.push('/');
        }
        Self {
            package_url,
            minimum_feature_version,
            excluded_feature_versions,
        }
    }

    pub fn from_config(config: &GraalVmConfig) -> Self {
        Self::new(
            config.package_url.clone(),
            config.minimum_feature_version,
            config.excluded_feature_versions.clone(),
        )
    }

    /// Archive filename for one version and platform.
    ///
    /// Update 0 has no update qualifier (`graalvm-jdk-21_...`), later updates
    /// carry `.0.<update>` (`graalvm-jdk-21.0.2_...`).
    pub fn filename(
        feature: u32,
        update: u32,
        operating_system: OperatingSystem,
        architecture: Architecture,
        archive_type: ArchiveType,
    ) -> String {
        let version = if update == 0 {
            format!("{feature}")
        } else {
            format!("{feature}.0.{update}")
        };
        format!(
            "{FILENAME_PREFIX}{version}_{}-{}_bin.{}",
            operating_system.api_str(),
            architecture.api_str(),
            archive_type.extension()
        )
    }

    pub fn uri(&self, feature: u32, filename: &str) -> String {
        format!("{}{feature}/archive/{filename}", self.package_url)
    }

    pub fn is_feature_included(&self, feature: u32) -> bool {
        feature >= self.minimum_feature_version && !self.excluded_feature_versions.contains(&feature)
    }

    /// GA versions to synthesize, as (feature, 0, update, 0), in catalog order.
    pub fn versions(&self, catalog: &dyn MajorVersionCatalog) -> Vec<VersionNumber> {
        let mut versions: Vec<VersionNumber> = Vec::new();

        for major in catalog.major_versions() {
            if !self.is_feature_included(major.feature) {
                trace!("Skipping feature version {}", major.feature);
                continue;
            }
            for ga in catalog.ga_versions(major.feature) {
                if ga.feature < self.minimum_feature_version {
                    continue;
                }
                let version = VersionNumber::new(ga.feature, 0, ga.update, 0);
                if !versions.contains(&version) {
                    versions.push(version);
                }
            }
        }

        versions
    }

    pub fn candidates(&self, versions: &[VersionNumber]) -> Vec<UrlCandidate> {
        let mut candidates = Vec::new();
        for version in versions {
            for (operating_system, architectures, archive_type) in ALLOWED_COMBINATIONS {
                for architecture in architectures.iter() {
                    let filename = Self::filename(
                        version.feature,
                        version.update,
                        *operating_system,
                        *architecture,
                        *archive_type,
                    );
                    candidates.push(UrlCandidate {
                        version: version.clone(),
                        operating_system: *operating_system,
                        architecture: *architecture,
                        archive_type: *archive_type,
                        uri: self.uri(version.feature, &filename),
                        filename,
                    });
                }
            }
        }
        candidates
    }

    /// Probes every candidate through the per-host pool and hands existing ones to
    /// `build`, which runs on the pool's workers. Results keep candidate order.
    pub fn discover<R, F>(&self, ctx: &IngestContext, only_new: bool, build: F) -> Vec<R>
    where
        R: Send,
        F: Fn(ProbedCandidate) -> Option<R> + Sync,
    {
        let versions = self.versions(ctx.major_versions.as_ref());
        let candidates: Vec<UrlCandidate> = self
            .candidates(&versions)
            .into_iter()
            .filter(|candidate| {
                let known = ctx.already_known(only_new, &candidate.filename, &candidate.uri);
                if known {
                    trace!("{} is already in the catalog", candidate.filename);
                }
                !known
            })
            .collect();
        debug!(
            "Probing {} candidate URLs for {} versions",
            candidates.len(),
            versions.len()
        );

        let probe = ctx.probe.as_ref();
        ctx.pool
            .map(
                candidates,
                |candidate| candidate.uri.clone(),
                |candidate| {
                    if !probe.exists(&candidate.uri) {
                        trace!("Not published: {}", candidate.uri);
                        return None;
                    }
                    let checksum_uri = candidate.checksum_uri();
                    let checksum_uri = probe.exists(&checksum_uri).then_some(checksum_uri);
                    build(ProbedCandidate {
                        candidate,
                        checksum_uri,
                    })
                },
            )
            .into_iter()
            .flatten()
            .collect()
    }
}
