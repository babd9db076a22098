use log::debug;
use regex::Regex;

use crate::error::Result;
use crate::release::{Asset, Release};

/// Pattern used when none is configured: matches any asset name.
pub const DEFAULT_PATTERN: &str = ".*";

/// Selects one asset of a release by name.
///
/// The pattern is unanchored: it matches if it occurs anywhere in the name.
#[derive(Debug, Clone)]
pub struct AssetMatcher {
    pattern: Regex,
}

impl AssetMatcher {
    /// Compile `pattern`. A malformed pattern is a configuration error.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// The pattern as it was given.
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// First asset of `release`, in listed order, whose name matches.
    /// Assets without a name never match.
    pub fn find<'r>(&self, release: &'r Release) -> Option<&'r Asset> {
        let found = release.assets.iter().find(|asset| {
            asset
                .name
                .as_deref()
                .is_some_and(|name| self.pattern.is_match(name))
        });

        if found.is_none() {
            debug!(
                "no asset of {} matches {:?}",
                release.display_name(),
                self.pattern.as_str()
            );
        }
        found
    }
}

/// Compile `pattern` and look it up in `release` in one step.
pub fn find_asset<'r>(release: &'r Release, pattern: &str) -> Result<Option<&'r Asset>> {
    Ok(AssetMatcher::new(pattern)?.find(release))
}
