use crate::commands::{OutputOptions, build_context, print_summary, write_packages};
use crate::config::IngestConfig;
use crate::error::Result;
use crate::metadata::{DistributionSource, GraalVm, pipeline};
use std::path::Path;

/// Probes synthesized download URLs only.
pub struct SynthesizeCommand<'a> {
    config: &'a IngestConfig,
}

impl<'a> SynthesizeCommand<'a> {
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

        let packages = graalvm.fetch_synthesized(&ctx, include_ea, only_new);
        let mut packages = pipeline::merge_by_catalog_key(pipeline::deduplicate(packages));
        pipeline::sort_batch(&mut packages);

        print_summary(graalvm.name(), &packages, options);
        write_packages(packages, options)
    }
}
