use std::io::{self, Write};

use crate::release::{Asset, Release};

/// Prints lookup results as human-readable lines.
pub struct Reporter<'w> {
    out: &'w mut dyn Write,
}

impl<'w> Reporter<'w> {
    /// Reporter writing to `out`.
    pub fn new(out: &'w mut dyn Write) -> Self {
        Self { out }
    }

    /// Report the selected release.
    pub fn release(&mut self, release: &Release) -> io::Result<()> {
        writeln!(
            self.out,
            "Release found: {} (tag {}, pre-release {})",
            release.display_name(),
            release.tag,
            release.is_prerelease
        )
    }

    /// Report that no release qualified.
    pub fn no_release(&mut self) -> io::Result<()> {
        writeln!(self.out, "No matching release found.")
    }

    /// Report the matched asset and its download URL, if known.
    pub fn asset(&mut self, asset: &Asset) -> io::Result<()> {
        writeln!(
            self.out,
            "Asset found: {}",
            asset.name.as_deref().unwrap_or_default()
        )?;
        if let Some(url) = &asset.browser_download_url {
            writeln!(self.out, "Download URL: {url}")?;
        }
        Ok(())
    }

    /// Report that no asset matched the pattern.
    pub fn no_asset(&mut self) -> io::Result<()> {
        writeln!(self.out, "No matching asset found.")
    }
}
