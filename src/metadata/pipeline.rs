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
use crate::metadata::source::DistributionSource;
use crate::models::distribution::Distribution;
use crate::models::package::Package;
use crate::models::release::ReleaseStatus;
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::thread;

/// Runs vendor sources against one shared, read-only context.
#[derive(Debug, Clone, Copy)]
pub struct IngestionPipeline<'a> {
    ctx: &'a IngestContext,
}

impl<'a> IngestionPipeline<'a> {
    pub fn new(ctx: &'a IngestContext) -> Self {
        Self { ctx }
    }

    /// One feed pass for one release status.
    pub fn run_status(
        &self,
        source: &dyn DistributionSource,
        release_status: ReleaseStatus,
        only_new: bool,
    ) -> Vec<Package> {
        let query = PackageQuery::new().release_status(release_status);
        let releases = self.ctx.feed.fetch_feed(source.feed_url());
        debug!(
            "{}: {} releases in feed for {release_status}",
            source.name(),
            releases.len()
        );

        let packages = releases
            .iter()
            .flat_map(|release| source.packages_from_release(release, &query, only_new, self.ctx))
            .collect();
        deduplicate(packages)
    }

    /// GA feed pass, optional EA feed pass and the source's supplementary packages,
    /// de-duplicated and in a stable order.
    pub fn run(
        &self,
        source: &dyn DistributionSource,
        include_ea: bool,
        only_new: bool,
    ) -> Vec<Package> {
        let mut packages = self.run_status(source, ReleaseStatus::Ga, only_new);
        if include_ea {
            packages.extend(self.run_status(source, ReleaseStatus::Ea, only_new));
        }
        packages.extend(source.supplementary_packages(self.ctx, include_ea, only_new));

        let mut packages = merge_by_catalog_key(deduplicate(packages));
        sort_batch(&mut packages);
        info!("{}: {} packages", source.name(), packages.len());
        packages
    }

    /// Runs every source on its own thread. A source that panics contributes an
    /// empty batch.
    pub fn run_all(
        &self,
        sources: &[Arc<dyn DistributionSource>],
        include_ea: bool,
        only_new: bool,
    ) -> Vec<(Distribution, Vec<Package>)> {
        thread::scope(|scope| {
            let handles: Vec<_> = sources
                .iter()
                .map(|source| {
                    let source = source.as_ref();
                    (
                        source.distribution(),
                        scope.spawn(move || self.run(source, include_ea, only_new)),
                    )
                })
                .collect();

            handles
                .into_iter()
                .map(|(distribution, handle)| {
                    let packages = handle.join().unwrap_or_else(|_| {
                        warn!("Ingestion of {distribution} panicked, no packages from it");
                        Vec::new()
                    });
                    (distribution, packages)
                })
                .collect()
        })
    }
}

/// Drops exact duplicates, keeping the first occurrence.
pub fn deduplicate(packages: Vec<Package>) -> Vec<Package> {
    let mut seen = HashSet::with_capacity(packages.len());
    packages
        .into_iter()
        .filter(|package| seen.insert(package.clone()))
        .collect()
}

/// Collapses packages that point at the same (filename, download URI).
///
/// The first occurrence is kept. It takes a checksum and size it lacks from later
/// ones, and is the latest build if any of them is.
pub fn merge_by_catalog_key(packages: Vec<Package>) -> Vec<Package> {
    let mut index: HashMap<(String, String), usize> = HashMap::with_capacity(packages.len());
    let mut merged: Vec<Package> = Vec::with_capacity(packages.len());

    for package in packages {
        let key = (package.filename.clone(), package.direct_download_uri.clone());
        match index.get(&key) {
            Some(&position) => {
                let kept = &mut merged[position];
                debug!("Merging duplicate entry for {}", kept.filename);
                if kept.checksum_uri.is_none() {
                    kept.checksum_uri = package.checksum_uri;
                    kept.checksum_type = package.checksum_type;
                }
                if kept.size.is_none() {
                    kept.size = package.size;
                }
                kept.latest_build_available |= package.latest_build_available;
            }
            None => {
                index.insert(key, merged.len());
                merged.push(package);
            }
        }
    }

    merged
}

/// Orders a batch by distribution, Java version, platform, archive type and filename.
pub fn sort_batch(packages: &mut [Package]) {
    packages.sort_by(|a, b| {
        a.distribution
            .id()
            .cmp(b.distribution.id())
            .then_with(|| a.java_version.cmp(&b.java_version))
            .then_with(|| a.operating_system.cmp(&b.operating_system))
            .then_with(|| a.architecture.cmp(&b.architecture))
            .then_with(|| a.archive_type.cmp(&b.archive_type))
            .then_with(|| a.package_type.cmp(&b.package_type))
            .then_with(|| a.release_status.cmp(&b.release_status))
            .then_with(|| a.filename.cmp(&b.filename))
            .then_with(|| a.direct_download_uri.cmp(&b.direct_download_uri))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FeedClient;
    use crate::models::package::{ArchiveType, HashAlgorithm, PackageType};
    use crate::models::platform::{Architecture, Bitness, OperatingSystem};
    use crate::models::release::TermOfSupport;
    use crate::version::VersionNumber;
    use mockito::Server;
    use serde_json::Value;

    fn package(feature: u32, filename: &str, status: ReleaseStatus) -> Package {
        Package {
            distribution: Distribution::GraalVm,
            distribution_version: VersionNumber::new(feature, 0, 0, 0),
            java_version: VersionNumber::new(feature, 0, 0, 0),
            major_version: feature,
            package_type: PackageType::Jdk,
            architecture: Architecture::X64,
            bitness: Bitness::Bit64,
            operating_system: OperatingSystem::Linux,
            archive_type: ArchiveType::TarGz,
            term_of_support: TermOfSupport::for_feature_version(feature),
            release_status: status,
            filename: filename.to_string(),
            direct_download_uri: format!("https://example.com/{filename}"),
            checksum_uri: None,
            checksum_type: None,
            size: None,
            javafx_bundled: false,
            directly_downloadable: true,
            free_use_in_production: true,
            latest_build_available: false,
        }
    }

    /// Emits one package per release named by its `name` field, duplicated twice.
    struct FakeSource {
        distribution: Distribution,
        feed_url: String,
        panics: bool,
    }

    impl DistributionSource for FakeSource {
        fn distribution(&self) -> Distribution {
            self.distribution.clone()
        }

        fn name(&self) -> &str {
            "Fake"
        }

        fn package_url(&self) -> &str {
            "https://example.com/"
        }

        fn official_uri(&self) -> &str {
            "https://example.com/"
        }

        fn synonyms(&self) -> &[&'static str] {
            &["fake"]
        }

        fn url_for_available_packages(&self, _query: &PackageQuery) -> String {
            self.package_url().to_string()
        }

        fn feed_url(&self) -> &str {
            &self.feed_url
        }

        fn packages_from_release(
            &self,
            release: &Value,
            query: &PackageQuery,
            _only_new: bool,
            _ctx: &IngestContext,
        ) -> Vec<Package> {
            if self.panics {
                panic!("vendor format drift");
            }
            let prerelease = release["prerelease"].as_bool().unwrap_or(false);
            if prerelease != query.wants_early_access() {
                return Vec::new();
            }
            let name = release["name"].as_str().unwrap_or_default();
            let feature = release["feature"].as_u64().unwrap_or(21) as u32;
            let status = query.effective_release_status();
            vec![package(feature, name, status), package(feature, name, status)]
        }

        fn supplementary_packages(
            &self,
            _ctx: &IngestContext,
            _include_ea: bool,
            _only_new: bool,
        ) -> Vec<Package> {
            vec![package(17, "supplementary.tar.gz", ReleaseStatus::Ga)]
        }
    }

    const FEED: &str = r#"[
        {"name": "b.tar.gz", "feature": 21, "prerelease": false},
        {"name": "a.tar.gz", "feature": 22, "prerelease": false},
        {"name": "ea.tar.gz", "feature": 24, "prerelease": true}
    ]"#;

    fn feed_server() -> mockito::ServerGuard {
        let mut server = Server::new();
        server
            .mock("GET", "/releases")
            .with_status(200)
            .with_body(FEED)
            .create();
        server
    }

    fn source(server: &mockito::ServerGuard) -> FakeSource {
        FakeSource {
            distribution: Distribution::GraalVm,
            feed_url: format!("{}/releases", server.url()),
            panics: false,
        }
    }

    #[test]
    fn test_merge_by_catalog_key_combines_feed_and_index_entries() {
        let mut from_feed = package(24, "graalvm-jdk-24-ea+21_linux-x64_bin.tar.gz", ReleaseStatus::Ea);
        from_feed.attach_checksum(
            "https://example.com/graalvm-jdk-24-ea+21_linux-x64_bin.tar.gz.sha256".to_string(),
            HashAlgorithm::Sha256,
        );
        let mut from_index = package(24, "graalvm-jdk-24-ea+21_linux-x64_bin.tar.gz", ReleaseStatus::Ea);
        from_index.latest_build_available = true;
        from_index.size = Some(2048);
        let other = package(24, "graalvm-jdk-24-ea+21_macos-aarch64_bin.tar.gz", ReleaseStatus::Ea);

        let merged = merge_by_catalog_key(vec![from_feed, other.clone(), from_index]);

        assert_eq!(merged.len(), 2);
        assert!(merged[0].latest_build_available);
        assert_eq!(merged[0].size, Some(2048));
        assert_eq!(merged[0].checksum_type, Some(HashAlgorithm::Sha256));
        assert_eq!(merged[1], other);
    }

    #[test]
    fn test_run_status_deduplicates() {
        let server = feed_server();
        let ctx = IngestContext::new(Arc::new(FeedClient::default()));
        let pipeline = IngestionPipeline::new(&ctx);

        let packages = pipeline.run_status(&source(&server), ReleaseStatus::Ga, false);
        assert_eq!(packages.len(), 2);
    }

    #[test]
    fn test_run_includes_ea_only_when_requested() {
        let server = feed_server();
        let ctx = IngestContext::new(Arc::new(FeedClient::default()));
        let pipeline = IngestionPipeline::new(&ctx);
        let source = source(&server);

        let ga_only = pipeline.run(&source, false, false);
        assert_eq!(ga_only.len(), 3);
        assert!(ga_only.iter().all(|p| p.release_status == ReleaseStatus::Ga));

        let with_ea = pipeline.run(&source, true, false);
        assert_eq!(with_ea.len(), 4);
        assert_eq!(
            with_ea
                .iter()
                .filter(|p| p.release_status == ReleaseStatus::Ea)
                .count(),
            1
        );
    }

    #[test]
    fn test_run_is_sorted_and_repeatable() {
        let server = feed_server();
        let ctx = IngestContext::new(Arc::new(FeedClient::default()));
        let pipeline = IngestionPipeline::new(&ctx);
        let source = source(&server);

        let first = pipeline.run(&source, true, false);
        let second = pipeline.run(&source, true, false);

        assert_eq!(first, second);
        let features: Vec<u32> = first.iter().map(|p| p.major_version).collect();
        assert_eq!(features, vec![17, 21, 22, 24]);
    }

    #[test]
    fn test_unavailable_feed_still_returns_supplementary() {
        let ctx = IngestContext::new(Arc::new(FeedClient::default().with_max_retries(0)));
        let pipeline = IngestionPipeline::new(&ctx);
        let source = FakeSource {
            distribution: Distribution::GraalVm,
            feed_url: "http://127.0.0.1:1/releases".to_string(),
            panics: false,
        };

        let packages = pipeline.run(&source, true, false);
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].filename, "supplementary.tar.gz");
    }

    #[test]
    fn test_run_all_isolates_panicking_source() {
        let server = feed_server();
        let ctx = IngestContext::new(Arc::new(FeedClient::default()));
        let pipeline = IngestionPipeline::new(&ctx);

        let healthy: Arc<dyn DistributionSource> = Arc::new(source(&server));
        let broken: Arc<dyn DistributionSource> = Arc::new(FakeSource {
            distribution: Distribution::GraalVmCommunity,
            feed_url: format!("{}/releases", server.url()),
            panics: true,
        });

        let batches = pipeline.run_all(&[healthy, broken], false, false);

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].0, Distribution::GraalVm);
        assert_eq!(batches[0].1.len(), 3);
        assert_eq!(batches[1].0, Distribution::GraalVmCommunity);
        assert!(batches[1].1.is_empty());
    }

    #[test]
    fn test_deduplicate_keeps_first_occurrence() {
        let a = package(21, "a.tar.gz", ReleaseStatus::Ga);
        let mut b = package(21, "a.tar.gz", ReleaseStatus::Ga);
        b.size = Some(10);

        let packages = deduplicate(vec![a.clone(), b.clone(), a.clone()]);
        assert_eq!(packages, vec![a, b]);
    }
}
