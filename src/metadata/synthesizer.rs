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

use crate::api::PackageQuery;
use crate::metadata::context::IngestContext;
use crate::models::distribution::Distribution;
use crate::models::package::{ArchiveType, Package, PackageType};
use crate::models::release::{ReleaseStatus, TermOfSupport};
use crate::platform::InferredPlatform;
use crate::version::VersionNumber;
use log::{debug, trace};

/// Everything known about one artifact before vendor defaults and filters apply.
#[derive(Debug, Clone)]
pub struct PackageDraft {
    pub filename: String,
    pub uri: String,
    pub version: VersionNumber,
    pub platform: InferredPlatform,
    pub archive_type: ArchiveType,
    pub package_type: PackageType,
    pub release_status: ReleaseStatus,
    pub javafx_bundled: bool,
    pub directly_downloadable: bool,
    pub latest_build_available: bool,
}

/// Turns drafts into catalog packages for one distribution.
#[derive(Debug, Clone)]
pub struct PackageSynthesizer {
    distribution: Distribution,
    free_use_in_production: bool,
    term_of_support_override: fn(TermOfSupport) -> TermOfSupport,
}

impl PackageSynthesizer {
    pub fn new(distribution: Distribution) -> Self {
        Self {
            distribution,
            free_use_in_production: false,
            term_of_support_override: |term| term,
        }
    }

    pub fn with_free_use_in_production(mut self, free_use: bool) -> Self {
        self.free_use_in_production = free_use;
        self
    }

    pub fn with_term_of_support_override(
        mut self,
        term_of_support_override: fn(TermOfSupport) -> TermOfSupport,
    ) -> Self {
        self.term_of_support_override = term_of_support_override;
        self
    }

    pub fn term_of_support(&self, feature: u32) -> TermOfSupport {
        (self.term_of_support_override)(TermOfSupport::for_feature_version(feature))
    }

    /// Builds the package, or `None` when the catalog already knows it or a caller
    /// filter rejects it. Looks up the artifact size as a side effect.
    pub fn synthesize(
        &self,
        draft: PackageDraft,
        query: &PackageQuery,
        only_new: bool,
        ctx: &IngestContext,
    ) -> Option<Package> {
        if ctx.already_known(only_new, &draft.filename, &draft.uri) {
            trace!("{} is already in the catalog", draft.filename);
            return None;
        }

        if !query.accepts_archive_type(draft.archive_type) {
            debug!("Skipping {}: archive type {} not requested", draft.filename, draft.archive_type);
            return None;
        }
        if !query.accepts_operating_system(draft.platform.operating_system)
            || !query.accepts_architecture(draft.platform.architecture)
        {
            debug!(
                "Skipping {}: platform {}-{} not requested",
                draft.filename, draft.platform.operating_system, draft.platform.architecture
            );
            return None;
        }
        if !query.accepts_package_type(draft.package_type) {
            debug!("Skipping {}: package type {} not requested", draft.filename, draft.package_type);
            return None;
        }
        if !query.accepts_javafx_bundled(draft.javafx_bundled) {
            debug!(
                "Skipping {}: javafx_bundled={} not requested",
                draft.filename, draft.javafx_bundled
            );
            return None;
        }

        let term_of_support = self.term_of_support(draft.version.feature);
        if !query.accepts_term_of_support(term_of_support) {
            debug!("Skipping {}: term of support {term_of_support} not requested", draft.filename);
            return None;
        }

        let size = ctx.probe.file_size(&draft.uri);
        if size.is_none() {
            trace!("No size available for {}", draft.uri);
        }

        Some(Package {
            distribution: self.distribution.clone(),
            distribution_version: draft.version.clone(),
            major_version: draft.version.feature,
            java_version: draft.version,
            package_type: draft.package_type,
            architecture: draft.platform.architecture,
            bitness: draft.platform.bitness,
            operating_system: draft.platform.operating_system,
            archive_type: draft.archive_type,
            term_of_support,
            release_status: draft.release_status,
            filename: draft.filename,
            direct_download_uri: draft.uri,
            checksum_uri: None,
            checksum_type: None,
            size,
            javafx_bundled: draft.javafx_bundled,
            directly_downloadable: draft.directly_downloadable,
            free_use_in_production: self.free_use_in_production,
            latest_build_available: draft.latest_build_available,
        })
    }
}
