//! # bindo
//!
//! Finds the newest release of a GitHub repository, optionally skipping
//! pre-releases, and the asset in it whose name matches a pattern.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bindo::{find_asset, select_release, ReleaseFetcher};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), bindo::Error> {
//!     let releases = ReleaseFetcher::new("github.com", "BurntSushi", "ripgrep")
//!         .fetch_releases()
//!         .await?;
//!
//!     if let Some(release) = select_release(&releases, false) {
//!         let asset = find_asset(release, "x86_64-unknown-linux-musl")?;
//!         println!("{} -> {:?}", release.display_name(), asset.and_then(|a| a.name.as_deref()));
//!     }
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod error;
pub mod fetcher;
pub mod flags;
pub mod github;
pub mod help;
pub mod matcher;
pub mod registry;
pub mod release;
pub mod report;

pub use command::Command;
pub use error::{Error, FetchError, UsageError};
pub use fetcher::ReleaseFetcher;
pub use github::{GitHubCommand, GitHubConfig};
pub use matcher::{find_asset, AssetMatcher};
pub use registry::Registry;
pub use release::{select_release, Asset, Release};
pub use report::Reporter;
