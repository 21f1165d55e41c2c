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

//! Oracle GraalVM: GitHub release feed, synthesized archive URLs on
//! download.oracle.com and the early-access builds index.

use crate::api::PackageQuery;
use crate::api::models::{EaRelease, GithubRelease};
use crate::config::GraalVmConfig;
use crate::metadata::checksum::ChecksumLinker;
use crate::metadata::context::IngestContext;
use crate::metadata::pipeline::IngestionPipeline;
use crate::metadata::source::{DistributionSource, UrlParameters};
use crate::metadata::synthesizer::{PackageDraft, PackageSynthesizer};
use crate::metadata::url_synth::UrlSynthesizer;
use crate::models::distribution::Distribution;
use crate::models::package::{ArchiveType, HashAlgorithm, Package, PackageType};
use crate::models::platform::{Architecture, OperatingSystem};
use crate::models::release::{ReleaseStatus, TermOfSupport};
use crate::platform::{InferredPlatform, PlatformInferer};
use crate::version::{VersionExtractor, VersionNumber};
use log::{debug, info, trace, warn};
use serde_json::Value;

const OFFICIAL_URI: &str = "https://www.graalvm.org/";
const SYNONYMS: &[&str] = &["graalvm", "GRAALVM", "GraalVM"];
const FILENAME_PREFIX: &str = "graalvm-jdk-";
const ARCHIVE_SUFFIXES: &[&str] = &["_bin.tar.gz", "_bin.zip"];
const SKIPPED_SUFFIXES: &[&str] = &[".txt", ".jar", ".sha1", ".sha256"];

/// GraalVM offers no medium-term support.
pub fn graalvm_term_of_support(term: TermOfSupport) -> TermOfSupport {
    match term {
        TermOfSupport::Mts => TermOfSupport::Sts,
        other => other,
    }
}

/// Platform part of an asset name: `graalvm-jdk-21.0.2_linux-x64_bin.tar.gz`
/// yields `_linux-x64`. `None` for names that are not GraalVM JDK archives.
pub fn stripped_asset_name(filename: &str) -> Option<&str> {
    let rest = filename.strip_prefix(FILENAME_PREFIX)?;
    let rest = ARCHIVE_SUFFIXES
        .iter()
        .find_map(|suffix| rest.strip_suffix(suffix))?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.find('_').map_or(rest, |index| &rest[index..]))
}

fn is_skipped_asset(filename: &str) -> bool {
    SKIPPED_SUFFIXES.iter().any(|suffix| filename.ends_with(suffix))
}

#[derive(Debug, Clone)]
pub struct GraalVm {
    distribution: Distribution,
    config: GraalVmConfig,
    extractor: VersionExtractor,
    inferer: PlatformInferer,
    synthesizer: PackageSynthesizer,
    checksums: ChecksumLinker,
    urls: UrlSynthesizer,
}

impl Default for GraalVm {
    fn default() -> Self {
        Self::new(GraalVmConfig::default())
    }
}

impl GraalVm {
    pub fn new(config: GraalVmConfig) -> Self {
        Self {
            distribution: Distribution::GraalVm,
            extractor: VersionExtractor::new(),
            inferer: PlatformInferer::new(),
            synthesizer: PackageSynthesizer::new(Distribution::GraalVm)
                .with_free_use_in_production(true)
                .with_term_of_support_override(graalvm_term_of_support),
            checksums: ChecksumLinker::default(),
            urls: UrlSynthesizer::from_config(&config),
            config,
        }
    }

    /// Packages of one GitHub release document.
    ///
    /// Prerelease documents are only used when `query` asks for EA. Checksum
    /// assets of the release are linked to the packages afterwards.
    pub fn packages_from_release(
        &self,
        release: &Value,
        query: &PackageQuery,
        only_new: bool,
        ctx: &IngestContext,
    ) -> Vec<Package> {
        let release: GithubRelease = match serde_json::from_value(release.clone()) {
            Ok(release) => release,
            Err(e) => {
                debug!("Skipping release document: {e}");
                return Vec::new();
            }
        };

        if release.prerelease != query.wants_early_access() {
            trace!(
                "Skipping release {} (prerelease={}) for {}",
                release.tag_name,
                release.prerelease,
                query.effective_release_status()
            );
            return Vec::new();
        }

        let version = match self.extractor.from_tag(&release.tag_name) {
            Ok(version) => version,
            Err(e) => {
                debug!("Skipping release: {e}");
                return Vec::new();
            }
        };

        let mut packages: Vec<Package> = release
            .assets
            .iter()
            .filter_map(|asset| {
                self.package_from_asset(
                    &asset.name,
                    &asset.browser_download_url,
                    &version,
                    query,
                    only_new,
                    ctx,
                )
            })
            .collect();

        self.checksums.link(
            release
                .assets
                .iter()
                .map(|asset| (asset.name.as_str(), asset.browser_download_url.as_str())),
            &mut packages,
        );
        packages
    }

    fn package_from_asset(
        &self,
        filename: &str,
        uri: &str,
        version: &VersionNumber,
        query: &PackageQuery,
        only_new: bool,
        ctx: &IngestContext,
    ) -> Option<Package> {
        if is_skipped_asset(filename) {
            return None;
        }
        let Some(stripped) = stripped_asset_name(filename) else {
            trace!("Skipping {filename}: not a GraalVM JDK archive");
            return None;
        };

        let archive_type = ArchiveType::from_filename(filename)?;
        if archive_type == ArchiveType::SrcTar {
            return None;
        }

        let platform = match self.inferer.infer(stripped, archive_type) {
            Ok(platform) => platform,
            Err(e) => {
                debug!("Skipping GraalVM {version} asset {filename}: {e}");
                return None;
            }
        };

        let draft = PackageDraft {
            filename: filename.to_string(),
            uri: uri.to_string(),
            version: version.clone(),
            platform,
            archive_type,
            package_type: PackageType::Jdk,
            release_status: query.effective_release_status(),
            javafx_bundled: false,
            directly_downloadable: true,
            latest_build_available: false,
        };
        self.synthesizer.synthesize(draft, query, only_new, ctx)
    }

    /// Feed packages for one release status.
    pub fn fetch_release_status(
        &self,
        ctx: &IngestContext,
        release_status: ReleaseStatus,
        only_new: bool,
    ) -> Vec<Package> {
        IngestionPipeline::new(ctx).run_status(self, release_status, only_new)
    }

    /// GA packages found by probing synthesized archive URLs, plus the EA builds
    /// index when `include_ea` is set.
    pub fn fetch_synthesized(
        &self,
        ctx: &IngestContext,
        include_ea: bool,
        only_new: bool,
    ) -> Vec<Package> {
        let query = PackageQuery::new().release_status(ReleaseStatus::Ga);
        let mut packages = self.urls.discover(ctx, only_new, |probed| {
            let candidate = probed.candidate;
            let draft = PackageDraft {
                filename: candidate.filename,
                uri: candidate.uri,
                version: candidate.version,
                platform: InferredPlatform {
                    architecture: candidate.architecture,
                    bitness: candidate.architecture.bitness(),
                    operating_system: candidate.operating_system,
                },
                archive_type: candidate.archive_type,
                package_type: PackageType::Jdk,
                release_status: ReleaseStatus::Ga,
                javafx_bundled: false,
                directly_downloadable: true,
                latest_build_available: false,
            };
            let mut package = self.synthesizer.synthesize(draft, &query, false, ctx)?;
            if let Some(checksum_uri) = probed.checksum_uri {
                package.attach_checksum(checksum_uri, HashAlgorithm::Sha256);
            }
            Some(package)
        });
        info!("Found {} published GraalVM archives", packages.len());

        if include_ea {
            packages.extend(self.fetch_ea_builds(ctx, only_new));
        }
        packages
    }

    /// EA packages listed in the per-feature `<feature>-ea.json` build indexes.
    pub fn fetch_ea_builds(&self, ctx: &IngestContext, only_new: bool) -> Vec<Package> {
        let query = PackageQuery::new().release_status(ReleaseStatus::Ea);
        let mut packages = Vec::new();

        for major in ctx.major_versions.major_versions() {
            if major.feature < self.config.ea_min_feature_version {
                continue;
            }
            let url = format!("{}{}-ea.json", self.config.ea_builds_url, major.feature);
            for document in ctx.feed.fetch_feed(&url) {
                let release: EaRelease = match serde_json::from_value(document) {
                    Ok(release) => release,
                    Err(e) => {
                        warn!("Skipping malformed EA build entry in {url}: {e}");
                        continue;
                    }
                };
                packages.extend(self.packages_from_ea_release(&release, &query, only_new, ctx));
            }
        }

        debug!("Found {} GraalVM EA build packages", packages.len());
        packages
    }

    fn packages_from_ea_release(
        &self,
        release: &EaRelease,
        query: &PackageQuery,
        only_new: bool,
        ctx: &IngestContext,
    ) -> Vec<Package> {
        let version = match release.version.parse::<VersionNumber>() {
            Ok(version) => version,
            Err(e) => {
                debug!("Skipping EA release: {e}");
                return Vec::new();
            }
        };

        release
            .files
            .iter()
            .filter_map(|file| {
                if is_skipped_asset(&file.filename) {
                    return None;
                }
                let archive_type = ArchiveType::from_filename(&file.filename)
                    .filter(|archive_type| *archive_type != ArchiveType::SrcTar)?;
                let architecture = file.arch.parse::<Architecture>().ok();
                let operating_system = file.platform.parse::<OperatingSystem>().ok();
                let (Some(architecture), Some(operating_system)) = (architecture, operating_system)
                else {
                    debug!(
                        "Skipping EA file {}: unknown platform {}-{}",
                        file.filename, file.platform, file.arch
                    );
                    return None;
                };

                let package_type = if file.filename.to_lowercase().contains("-jdk") {
                    PackageType::Jdk
                } else {
                    PackageType::Jre
                };

                let draft = PackageDraft {
                    filename: file.filename.clone(),
                    uri: format!("{}{}", release.download_base_url, file.filename),
                    version: version.clone(),
                    platform: InferredPlatform {
                        architecture,
                        bitness: architecture.bitness(),
                        operating_system,
                    },
                    archive_type,
                    package_type,
                    release_status: ReleaseStatus::Ea,
                    javafx_bundled: false,
                    directly_downloadable: true,
                    latest_build_available: release.latest,
                };
                self.synthesizer.synthesize(draft, query, only_new, ctx)
            })
            .collect()
    }

    /// Every currently discoverable GraalVM package.
    pub fn fetch_all(&self, ctx: &IngestContext, include_ea: bool, only_new: bool) -> Vec<Package> {
        IngestionPipeline::new(ctx).run(self, include_ea, only_new)
    }
}

impl DistributionSource for GraalVm {
    fn distribution(&self) -> Distribution {
        self.distribution.clone()
    }

    fn name(&self) -> &str {
        self.distribution.name()
    }

    fn package_url(&self) -> &str {
        &self.config.package_url
    }

    fn official_uri(&self) -> &str {
        OFFICIAL_URI
    }

    fn synonyms(&self) -> &[&'static str] {
        SYNONYMS
    }

    fn url_parameters(&self) -> UrlParameters {
        UrlParameters::default()
    }

    fn url_for_available_packages(&self, query: &PackageQuery) -> String {
        debug!("Query string for {}: {}", self.name(), self.config.package_url);
        trace!("Ignoring filters of {query:?}");
        self.config.package_url.clone()
    }

    fn feed_url(&self) -> &str {
        &self.config.releases_url
    }

    fn packages_from_release(
        &self,
        release: &Value,
        query: &PackageQuery,
        only_new: bool,
        ctx: &IngestContext,
    ) -> Vec<Package> {
        GraalVm::packages_from_release(self, release, query, only_new, ctx)
    }

    fn supplementary_packages(
        &self,
        ctx: &IngestContext,
        include_ea: bool,
        only_new: bool,
    ) -> Vec<Package> {
        self.fetch_synthesized(ctx, include_ea, only_new)
    }
}
