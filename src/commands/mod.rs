pub mod feed;
pub mod fetch;
pub mod synthesize;

use crate::api::{FeedClient, GithubTokenPool, HostPool};
use crate::cache::{CatalogFile, CatalogSnapshot, FoojayMajorVersions, load_catalog, save_catalog};
use crate::config::IngestConfig;
use crate::error::Result;
use crate::metadata::IngestContext;
use crate::models::package::Package;
use crate::models::release::ReleaseStatus;
use colored::*;
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where and how a command writes its batch.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub output: Option<PathBuf>,
    pub minify: bool,
}

/// Builds the shared run context from configuration and an optional catalog file.
pub fn build_context(config: &IngestConfig, catalog: Option<&Path>) -> Result<IngestContext> {
    let tokens = Arc::new(GithubTokenPool::new(config.github.api_tokens.clone()));
    debug!("Using {} GitHub API tokens", tokens.len());
    let feed = Arc::new(FeedClient::from_config(config, tokens));

    let snapshot = match catalog {
        Some(path) => {
            let snapshot = load_catalog(path)?.snapshot();
            debug!("Loaded {} known packages from {path:?}", snapshot.len());
            snapshot
        }
        None => CatalogSnapshot::empty(),
    };
    let major_versions = FoojayMajorVersions::from_config(config);

    Ok(IngestContext::new(feed)
        .with_catalog(Arc::new(snapshot))
        .with_major_versions(Arc::new(major_versions))
        .with_pool(HostPool::new(config.http.probe_workers_per_host)))
}

/// Writes the batch to the output file, or as JSON to stdout.
pub fn write_packages(packages: Vec<Package>, options: &OutputOptions) -> Result<()> {
    let catalog = CatalogFile::new(packages);
    match &options.output {
        Some(path) => save_catalog(&catalog, path, options.minify),
        None => {
            let json = if options.minify {
                serde_json::to_string(&catalog)?
            } else {
                serde_json::to_string_pretty(&catalog)?
            };
            println!("{json}");
            Ok(())
        }
    }
}

pub fn print_summary(name: &str, packages: &[Package], options: &OutputOptions) {
    let ga = packages
        .iter()
        .filter(|package| package.release_status == ReleaseStatus::Ga)
        .count();
    let ea = packages.len() - ga;
    let with_checksum = packages
        .iter()
        .filter(|package| package.checksum_uri.is_some())
        .count();

    eprintln!(
        "{} {} {name} packages ({ga} GA, {ea} EA, {with_checksum} with checksum)",
        "✓".green().bold(),
        packages.len()
    );
    if let Some(path) = &options.output {
        eprintln!("  Written to {}", path.display());
    }
    if packages.is_empty() {
        eprintln!(
            "{}: nothing new was found; run with -v to see skipped assets",
            "Note".yellow().bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PackageCatalog;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_context_without_catalog() {
        let ctx = build_context(&IngestConfig::default(), None).unwrap();
        assert!(!ctx.catalog.contains("a", "b"));
        assert_eq!(ctx.pool.workers_per_host(), 4);
    }

    #[test]
    fn test_build_context_with_invalid_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        fs::write(&path, "[]").unwrap();

        assert!(build_context(&IngestConfig::default(), Some(&path)).is_err());
    }

    #[test]
    fn test_write_packages_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let options = OutputOptions {
            output: Some(temp_dir.path().join("graalvm.json")),
            minify: true,
        };

        write_packages(Vec::new(), &options).unwrap();

        let written = load_catalog(options.output.as_deref().unwrap()).unwrap();
        assert!(written.packages.is_empty());
    }
}
