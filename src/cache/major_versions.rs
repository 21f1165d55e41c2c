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

use crate::api::client::FeedClient;
use crate::api::models::MajorVersionInfo;
use crate::api::token_pool::GithubTokenPool;
use crate::config::IngestConfig;
use crate::models::release::MajorVersion;
use crate::user_agent;
use crate::version::VersionNumber;
use log::{debug, warn};
use serde_json::Value;
use std::sync::{Arc, OnceLock};

const API_VERSION: &str = "v3.0";

/// Lookup of known feature releases and their GA versions.
#[cfg_attr(test, mockall::automock)]
pub trait MajorVersionCatalog: Send + Sync {
    fn major_versions(&self) -> Vec<MajorVersion>;

    fn ga_versions(&self, feature: u32) -> Vec<VersionNumber>;
}

/// Major versions from the foojay `major_versions` endpoint, fetched once per instance.
#[derive(Debug)]
pub struct FoojayMajorVersions {
    client: FeedClient,
    base_url: String,
    loaded: OnceLock<Vec<MajorVersion>>,
}

impl FoojayMajorVersions {
    pub fn new(client: FeedClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            loaded: OnceLock::new(),
        }
    }

    /// Catalog client with its own User-Agent and no GitHub credentials.
    pub fn from_config(config: &IngestConfig) -> Self {
        let client = FeedClient::from_config(config, Arc::new(GithubTokenPool::empty()))
            .with_user_agent(user_agent::catalog_client());
        Self::new(client, config.catalog.foojay_base_url.clone())
    }

    /// GA and EA majors, so features without a GA release are still listed.
    fn url(&self) -> String {
        format!(
            "{}/{API_VERSION}/major_versions?ea=true&ga=true&include_versions=true",
            self.base_url
        )
    }

    fn load(&self) -> &[MajorVersion] {
        self.loaded.get_or_init(|| {
            let url = self.url();
            let document = match self.client.fetch_json(&url) {
                Ok(document) => document,
                Err(e) => {
                    warn!("Major version catalog unavailable: {e}");
                    return Vec::new();
                }
            };

            // API v3.0 wraps responses with a "result" field
            let result = match document {
                Value::Object(mut map) => map.remove("result").unwrap_or(Value::Null),
                other => other,
            };
            match serde_json::from_value::<Vec<MajorVersionInfo>>(result) {
                Ok(infos) => infos.into_iter().map(to_major_version).collect(),
                Err(e) => {
                    warn!("Unexpected major version document from {url}: {e}");
                    Vec::new()
                }
            }
        })
    }
}

fn to_major_version(info: MajorVersionInfo) -> MajorVersion {
    let mut versions: Vec<VersionNumber> = Vec::new();
    for text in &info.versions {
        if text.contains("-ea") {
            continue;
        }
        match text.parse::<VersionNumber>() {
            Ok(version) if version.feature == info.major_version => {
                if !versions.contains(&version) {
                    versions.push(version);
                }
            }
            Ok(_) => debug!("Ignoring version {text} listed under {}", info.major_version),
            Err(e) => debug!("Skipping GA version entry: {e}"),
        }
    }

    MajorVersion::new(info.major_version)
        .with_maintained(info.maintained)
        .with_versions(versions)
}

impl MajorVersionCatalog for FoojayMajorVersions {
    fn major_versions(&self) -> Vec<MajorVersion> {
        self.load().to_vec()
    }

    fn ga_versions(&self, feature: u32) -> Vec<VersionNumber> {
        self.load()
            .iter()
            .find(|major| major.feature == feature)
            .map(|major| major.versions.clone())
            .unwrap_or_default()
    }
}

/// In-memory catalog for offline runs.
#[derive(Debug, Clone, Default)]
pub struct StaticMajorVersions {
    majors: Vec<MajorVersion>,
}

impl StaticMajorVersions {
    pub fn new(majors: Vec<MajorVersion>) -> Self {
        Self { majors }
    }
}

impl MajorVersionCatalog for StaticMajorVersions {
    fn major_versions(&self) -> Vec<MajorVersion> {
        self.majors.clone()
    }

    fn ga_versions(&self, feature: u32) -> Vec<VersionNumber> {
        self.majors
            .iter()
            .filter(|major| major.feature == feature)
            .flat_map(|major| major.versions.iter().cloned())
            .collect()
    }
}
