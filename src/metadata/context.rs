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

use crate::api::{FeedClient, HostPool, RemoteProbe};
use crate::cache::{CatalogSnapshot, MajorVersionCatalog, PackageCatalog, StaticMajorVersions};
use std::sync::Arc;

const DEFAULT_PROBE_WORKERS_PER_HOST: usize = 4;

/// Services shared by every ingestion run of the process.
///
/// Constructed once and passed by reference into each run; nothing in here is
/// mutated by a run.
#[derive(Clone)]
pub struct IngestContext {
    pub feed: Arc<FeedClient>,
    pub probe: Arc<dyn RemoteProbe>,
    pub catalog: Arc<dyn PackageCatalog>,
    pub major_versions: Arc<dyn MajorVersionCatalog>,
    pub pool: HostPool,
}

impl IngestContext {
    /// Context probing through `feed`, with an empty catalog and no known major versions.
    pub fn new(feed: Arc<FeedClient>) -> Self {
        let probe: Arc<dyn RemoteProbe> = feed.clone();
        Self {
            feed,
            probe,
            catalog: Arc::new(CatalogSnapshot::empty()),
            major_versions: Arc::new(StaticMajorVersions::default()),
            pool: HostPool::new(DEFAULT_PROBE_WORKERS_PER_HOST),
        }
    }

    pub fn with_probe(mut self, probe: Arc<dyn RemoteProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn PackageCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_major_versions(mut self, major_versions: Arc<dyn MajorVersionCatalog>) -> Self {
        self.major_versions = major_versions;
        self
    }

    pub fn with_pool(mut self, pool: HostPool) -> Self {
        self.pool = pool;
        self
    }

    /// Whether an artifact should be skipped because the catalog already has it.
    pub fn already_known(&self, only_new: bool, filename: &str, uri: &str) -> bool {
        only_new && self.catalog.contains(filename, uri)
    }
}

impl std::fmt::Debug for IngestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestContext")
            .field("feed", &self.feed)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}
