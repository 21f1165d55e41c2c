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
use crate::models::package::Package;
use serde_json::Value;

/// Query-parameter names a vendor's listing endpoint understands. Empty when the
/// vendor has no queryable listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlParameters {
    pub version: &'static str,
    pub architecture: &'static str,
    pub operating_system: &'static str,
    pub archive_type: &'static str,
    pub package_type: &'static str,
    pub release_status: &'static str,
    pub term_of_support: &'static str,
    pub bitness: &'static str,
}

/// Contract every vendor ingester implements.
pub trait DistributionSource: Send + Sync {
    fn distribution(&self) -> Distribution;

    /// Human-readable vendor name
    fn name(&self) -> &str;

    /// Base URL artifacts are published under
    fn package_url(&self) -> &str;

    fn official_uri(&self) -> &str;

    /// Spellings users and upstream feeds use for this distribution
    fn synonyms(&self) -> &[&'static str];

    fn url_parameters(&self) -> UrlParameters {
        UrlParameters::default()
    }

    /// Listing URL for packages matching `query`.
    fn url_for_available_packages(&self, query: &PackageQuery) -> String;

    /// Release feed fetched once per release status.
    fn feed_url(&self) -> &str;

    /// Packages described by one release document of the feed.
    fn packages_from_release(
        &self,
        release: &Value,
        query: &PackageQuery,
        only_new: bool,
        ctx: &IngestContext,
    ) -> Vec<Package>;

    /// Packages discovered outside the release feed.
    fn supplementary_packages(
        &self,
        _ctx: &IngestContext,
        _include_ea: bool,
        _only_new: bool,
    ) -> Vec<Package> {
        Vec::new()
    }
}
