use crate::commands::{OutputOptions, build_context, print_summary, write_packages};
use crate::config::IngestConfig;
use crate::error::Result;
use crate::metadata::{DistributionSource, GraalVm, pipeline};
use crate::models::release::ReleaseStatus;
use log::debug;
use std::path::Path;

/// Reads the release feed for a single release status.
pub struct FeedCommand<'a> {
    config: &'a IngestConfig,
}

impl<'a> FeedCommand<'a> {
    pub fn new(config: &'a IngestConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(
        &self,
        release_status: ReleaseStatus,
        only_new: bool,
        catalog: Option<&Path>,
        options: &OutputOptions,
    ) -> Result<()> {
        let ctx = build_context(self.config, catalog)?;
        let graalvm = GraalVm::new(self.config.graalvm.clone());
        debug!("Reading {release_status} releases from {}", graalvm.feed_url());

        let mut packages = graalvm.fetch_release_status(&ctx, release_status, only_new);
        pipeline::sort_batch(&mut packages);

        print_summary(graalvm.name(), &packages, options);
        write_packages(packages, options)
    }
}
