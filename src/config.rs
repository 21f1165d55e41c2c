use crate::error::{IngestError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "kopi-ingest.toml";
pub const ENV_PREFIX: &str = "KOPI_INGEST";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RETRIES: usize = 3;
const DEFAULT_PROBE_WORKERS_PER_HOST: usize = 4;
const DEFAULT_GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const DEFAULT_FOOJAY_BASE_URL: &str = "https://api.foojay.io/disco";
const DEFAULT_GRAALVM_RELEASES_URL: &str =
    "https://api.github.com/repos/graalvm/oracle-graalvm-ea-builds/releases";
const DEFAULT_GRAALVM_PACKAGE_URL: &str = "https://download.oracle.com/graalvm/";
const DEFAULT_GRAALVM_EA_BUILDS_URL: &str =
    "https://raw.githubusercontent.com/graalvm/oracle-graalvm-ea-builds/main/versions/";
const DEFAULT_MINIMUM_FEATURE_VERSION: u32 = 17;
const DEFAULT_EA_MIN_FEATURE_VERSION: u32 = 22;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct IngestConfig {
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub github: GithubConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub graalvm: GraalVmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub max_retries: usize,
    pub probe_workers_per_host: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            probe_workers_per_host: DEFAULT_PROBE_WORKERS_PER_HOST,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GithubConfig {
    pub api_tokens: Vec<String>,
    pub accept: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_tokens: Vec::new(),
            accept: DEFAULT_GITHUB_ACCEPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    pub foojay_base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            foojay_base_url: DEFAULT_FOOJAY_BASE_URL.to_string(),
        }
    }
}

/// GraalVM vendor endpoints and version gates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraalVmConfig {
    pub releases_url: String,
    pub package_url: String,
    pub ea_builds_url: String,
    pub minimum_feature_version: u32,
    pub excluded_feature_versions: Vec<u32>,
    /// EA build files are fetched only for feature versions at or above this.
    pub ea_min_feature_version: u32,
}

impl Default for GraalVmConfig {
    fn default() -> Self {
        Self {
            releases_url: DEFAULT_GRAALVM_RELEASES_URL.to_string(),
            package_url: DEFAULT_GRAALVM_PACKAGE_URL.to_string(),
            ea_builds_url: DEFAULT_GRAALVM_EA_BUILDS_URL.to_string(),
            minimum_feature_version: DEFAULT_MINIMUM_FEATURE_VERSION,
            excluded_feature_versions: vec![19],
            ea_min_feature_version: DEFAULT_EA_MIN_FEATURE_VERSION,
        }
    }
}

impl IngestConfig {
    /// Loads defaults, then the optional TOML file, then `KOPI_INGEST_*` variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let path = config_file.unwrap_or_else(|| Path::new(CONFIG_FILE_NAME));
        if path.exists() {
            log::debug!("Loading config from {path:?}");
        } else {
            log::debug!("Config file not found at {path:?}, using defaults");
        }

        let settings = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("github.api_tokens")
                    .with_list_parse_key("graalvm.excluded_feature_versions")
                    .try_parsing(true),
            )
            .build()?;

        let config: IngestConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_secs == 0 {
            return Err(IngestError::InvalidConfig(
                "http.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.http.probe_workers_per_host == 0 {
            return Err(IngestError::InvalidConfig(
                "http.probe_workers_per_host must be greater than 0".to_string(),
            ));
        }

        for (key, url) in [
            ("catalog.foojay_base_url", &self.catalog.foojay_base_url),
            ("graalvm.releases_url", &self.graalvm.releases_url),
            ("graalvm.package_url", &self.graalvm.package_url),
            ("graalvm.ea_builds_url", &self.graalvm.ea_builds_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(IngestError::InvalidConfig(format!(
                    "{key} must be an http(s) URL, got '{url}'"
                )));
            }
        }

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| IngestError::ConfigError(format!("Failed to serialize config: {e}")))
    }
}
