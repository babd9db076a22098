use std::io::Write;
use std::time::Duration;

use log::info;

use crate::command::Command;
use crate::error::{Error, Result, UsageError};
use crate::fetcher::{ReleaseFetcher, DEFAULT_HOST, REQUEST_TIMEOUT};
use crate::flags::{FlagSet, ParsedFlags};
use crate::matcher::{AssetMatcher, DEFAULT_PATTERN};
use crate::release::select_release;
use crate::report::Reporter;

/// Settings of the `github` subcommand, bound from its flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    /// GitHub instance hostname; the API lives at `api.<host>`.
    pub host: String,
    /// Owner of the repository.
    pub owner: String,
    /// Name of the repository.
    pub name: String,
    /// Whether pre-releases may be selected.
    pub include_prerelease: bool,
    /// Regular expression an asset name must contain a match of.
    pub asset_pattern: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            owner: String::new(),
            name: String::new(),
            include_prerelease: false,
            asset_pattern: DEFAULT_PATTERN.to_owned(),
        }
    }
}

impl GitHubConfig {
    fn from_flags(parsed: &ParsedFlags) -> Self {
        Self {
            host: parsed.string("host").to_owned(),
            owner: parsed.string("owner").to_owned(),
            name: parsed.string("name").to_owned(),
            include_prerelease: parsed.bool("prerelease"),
            asset_pattern: parsed.string("pattern").to_owned(),
        }
    }
}

/// `bindo github`: find the newest suitable release of a repository and the
/// asset in it whose name matches the configured pattern.
///
/// `run` drives its single request on a private current-thread runtime, so
/// it must be called from synchronous code. Inside a tokio runtime it fails
/// with [`Error::Runtime`]; use [`ReleaseFetcher`] directly there.
pub struct GitHubCommand {
    flags: FlagSet,
    pub config: GitHubConfig,
    api_base: Option<String>,
    use_proxy: bool,
    timeout: Duration,
}

impl GitHubCommand {
    /// Command with every flag at its default.
    pub fn new() -> Self {
        let flags = FlagSet::new()
            .string("host", DEFAULT_HOST, "GitHub instance hostname")
            .string("owner", "", "owner of the repository")
            .string("name", "", "name of the repository")
            .bool("prerelease", false, "include pre-releases")
            .string(
                "pattern",
                DEFAULT_PATTERN,
                "pattern to use for identifying an asset to download",
            );

        Self {
            flags,
            config: GitHubConfig::default(),
            api_base: None,
            use_proxy: true,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Query `api_base` instead of `https://api.<host>` (builder).
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = Some(api_base.to_owned());
        self
    }

    /// Ignore every proxy setting from the environment (builder).
    pub fn no_proxy(mut self) -> Self {
        self.use_proxy = false;
        self
    }

    /// Override the request timeout (builder).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn fetcher(&self) -> ReleaseFetcher {
        let mut fetcher =
            ReleaseFetcher::new(&self.config.host, &self.config.owner, &self.config.name)
                .with_timeout(self.timeout);
        if let Some(api_base) = &self.api_base {
            fetcher = fetcher.with_api_base(api_base);
        }
        if !self.use_proxy {
            fetcher = fetcher.direct();
        }
        fetcher
    }
}

impl Default for GitHubCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for GitHubCommand {
    fn name(&self) -> &str {
        "github"
    }

    fn summary(&self) -> &str {
        "find the latest release of a GitHub repository and its matching asset"
    }

    fn flags(&self) -> &FlagSet {
        &self.flags
    }

    fn initialize(&mut self, args: &[String]) -> Result<()> {
        let parsed = self.flags.parse(args)?;
        if let Some(extra) = parsed.positional().first() {
            return Err(UsageError::UnexpectedArgument(extra.clone()).into());
        }
        self.config = GitHubConfig::from_flags(&parsed);
        Ok(())
    }

    fn run(&mut self, out: &mut dyn Write) -> Result<()> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(Error::Runtime);
        }
        let matcher = AssetMatcher::new(&self.config.asset_pattern)?;

        let fetcher = self.fetcher();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let releases = runtime.block_on(fetcher.fetch_releases())?;

        let mut reporter = Reporter::new(out);
        let Some(release) = select_release(&releases, self.config.include_prerelease) else {
            reporter.no_release()?;
            return Ok(());
        };
        reporter.release(release)?;

        match matcher.find(release) {
            Some(asset) => {
                info!("asset {:?} matches {:?}", asset.name, matcher.as_str());
                reporter.asset(asset)?;
            }
            None => reporter.no_asset()?,
        }
        Ok(())
    }
}
