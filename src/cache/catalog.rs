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
use crate::models::package::Package;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Existing-package lookup keyed by (filename, direct download URI).
#[cfg_attr(test, mockall::automock)]
pub trait PackageCatalog: Send + Sync {
    fn contains(&self, filename: &str, uri: &str) -> bool;
}

/// Immutable set of catalog keys captured before a run starts.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    uris_by_filename: HashMap<String, HashSet<String>>,
}

impl CatalogSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_packages<'a>(packages: impl IntoIterator<Item = &'a Package>) -> Self {
        let mut uris_by_filename: HashMap<String, HashSet<String>> = HashMap::new();
        for package in packages {
            let (filename, uri) = package.catalog_key();
            uris_by_filename
                .entry(filename.to_string())
                .or_default()
                .insert(uri.to_string());
        }
        Self { uris_by_filename }
    }

    pub fn len(&self) -> usize {
        self.uris_by_filename.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.uris_by_filename.is_empty()
    }
}

impl PackageCatalog for CatalogSnapshot {
    fn contains(&self, filename: &str, uri: &str) -> bool {
        self.uris_by_filename
            .get(filename)
            .is_some_and(|uris| uris.contains(uri))
    }
}

/// On-disk batch written by `fetch` and read back through `--catalog`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub updated: DateTime<Utc>,
    pub packages: Vec<Package>,
}

impl CatalogFile {
    pub fn new(packages: Vec<Package>) -> Self {
        Self {
            updated: Utc::now(),
            packages,
        }
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot::from_packages(&self.packages)
    }
}

/// Load a catalog file
pub fn load_catalog(path: &Path) -> Result<CatalogFile> {
    let contents = fs::read_to_string(path).map_err(|e| IngestError::InvalidCatalog {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&contents).map_err(|e| IngestError::InvalidCatalog {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Save a catalog file, replacing any existing file atomically
pub fn save_catalog(catalog: &CatalogFile, path: &Path, minify: bool) -> Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    if minify {
        serde_json::to_writer(&mut temp_file, catalog)?;
    } else {
        serde_json::to_writer_pretty(&mut temp_file, catalog)?;
    }
    temp_file.write_all(b"\n")?;
    temp_file.flush()?;

    temp_file.persist(path).map_err(|e| IngestError::Io(e.error))?;
    log::debug!("Saved {} packages to {path:?}", catalog.packages.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::distribution::Distribution;
    use crate::models::package::{ArchiveType, PackageType};
    use crate::models::platform::{Architecture, Bitness, OperatingSystem};
    use crate::models::release::{ReleaseStatus, TermOfSupport};
    use crate::version::VersionNumber;
    use tempfile::TempDir;

    fn package(filename: &str) -> Package {
        let version = VersionNumber::new(21, 0, 2, 0);
        Package {
            distribution: Distribution::GraalVm,
            distribution_version: version.clone(),
            java_version: version,
            major_version: 21,
            package_type: PackageType::Jdk,
            architecture: Architecture::X64,
            bitness: Bitness::Bit64,
            operating_system: OperatingSystem::Linux,
            archive_type: ArchiveType::TarGz,
            term_of_support: TermOfSupport::Lts,
            release_status: ReleaseStatus::Ga,
            filename: filename.to_string(),
            direct_download_uri: format!("https://download.oracle.com/graalvm/21/archive/{filename}"),
            checksum_uri: None,
            checksum_type: None,
            size: None,
            javafx_bundled: false,
            directly_downloadable: true,
            free_use_in_production: true,
            latest_build_available: false,
        }
    }

    #[test]
    fn test_snapshot_matches_filename_and_uri() {
        let known = package("graalvm-jdk-21.0.2_linux-x64_bin.tar.gz");
        let snapshot = CatalogSnapshot::from_packages([&known]);

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains(&known.filename, &known.direct_download_uri));
        assert!(!snapshot.contains(&known.filename, "https://mirror.example.com/other"));
        assert!(!snapshot.contains("graalvm-jdk-17_linux-x64_bin.tar.gz", &known.direct_download_uri));
    }

    #[test]
    fn test_empty_snapshot_knows_nothing() {
        let snapshot = CatalogSnapshot::empty();
        assert!(snapshot.is_empty());
        assert!(!snapshot.contains("a", "b"));
    }

    #[test]
    fn test_save_and_load_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("graalvm.json");

        let catalog = CatalogFile::new(vec![package("graalvm-jdk-21.0.2_linux-x64_bin.tar.gz")]);
        save_catalog(&catalog, &path, true).unwrap();

        let loaded = load_catalog(&path).unwrap();
        assert_eq!(loaded.packages, catalog.packages);
        assert_eq!(loaded.updated, catalog.updated);
        assert_eq!(loaded.snapshot().len(), 1);
    }

    #[test]
    fn test_save_pretty_catalog_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("graalvm.json");
        fs::write(&path, "stale").unwrap();

        save_catalog(&CatalogFile::new(Vec::new()), &path, false).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\n  \"packages\""));
        assert!(load_catalog(&path).unwrap().packages.is_empty());
    }

    #[test]
    fn test_load_invalid_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_catalog(&path),
            Err(IngestError::InvalidCatalog { .. })
        ));
        assert!(matches!(
            load_catalog(&temp_dir.path().join("missing.json")),
            Err(IngestError::InvalidCatalog { .. })
        ));
    }
}
