use crate::commands::{OutputOptions, build_context, print_summary, write_packages};
use crate::config::IngestConfig;
use crate::error::Result;
use crate::metadata::{DistributionSource, GraalVm};
use log::info;
use std::path::Path;

/// Full GraalVM run: release feed, synthesized URLs and, optionally, EA builds.
pub struct FetchCommand<'a> {
    config: &'a IngestConfig,
}

impl<'a> FetchCommand<'a> {
    pub fn new(config: &'a IngestConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(
        &self,
        include_ea: bool,
        only_new: bool,
        catalog: Option<&Path>,
        options: &OutputOptions,
    ) -> Result<()> {
        let ctx = build_context(self.config, catalog)?;
        let graalvm = GraalVm::new(self.config.graalvm.clone());

        info!(
            "Fetching {} packages (include_ea={include_ea}, only_new={only_new})",
            graalvm.name()
        );
        let packages = graalvm.fetch_all(&ctx, include_ea, only_new);

        print_summary(graalvm.name(), &packages, options);
        write_packages(packages, options)
    }
}
