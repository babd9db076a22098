use log::debug;
use serde::Deserialize;

/// A release as listed by `GET /repos/{owner}/{name}/releases`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Release {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "tag_name")]
    pub tag: String,
    #[serde(rename = "prerelease", default)]
    pub is_prerelease: bool,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// A downloadable file attached to a [`Release`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Asset {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub browser_download_url: Option<String>,
}

impl Release {
    /// The release name, or its tag when the publisher left the name empty.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.tag,
        }
    }
}

/// Pick the first release, in API order, that is stable or that
/// `include_prerelease` allows.
///
/// The API already lists releases newest first; no re-sorting happens here.
pub fn select_release(releases: &[Release], include_prerelease: bool) -> Option<&Release> {
    let selected = releases
        .iter()
        .find(|release| include_prerelease || !release.is_prerelease);

    match selected {
        Some(release) => debug!("selected release {} ({})", release.display_name(), release.tag),
        None => debug!(
            "none of {} releases qualify (include_prerelease = {include_prerelease})",
            releases.len()
        ),
    }
    selected
}
