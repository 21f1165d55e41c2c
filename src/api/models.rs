use serde::{Deserialize, Serialize};

/// One entry of the GitHub Releases API (`GET /repos/{owner}/{repo}/releases`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub assets: Vec<GithubAsset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// One entry of a vendor early-access feed (`versions/<major>-ea.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EaRelease {
    pub version: String,
    #[serde(default)]
    pub latest: bool,
    pub download_base_url: String,
    #[serde(default)]
    pub files: Vec<EaFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EaFile {
    pub filename: String,
    pub arch: String,
    pub platform: String,
}

/// Entry of the foojay `major_versions` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MajorVersionInfo {
    pub major_version: u32,
    pub term_of_support: String,
    #[serde(default)]
    pub maintained: bool,
    #[serde(default)]
    pub versions: Vec<String>,
}
