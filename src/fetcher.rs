use std::time::Duration;

use log::{debug, info};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Proxy};

use crate::error::FetchError;
use crate::release::Release;

/// Upper bound for the whole release request, body included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "github.com";

/// Lists the releases of one repository with a single API call.
///
/// Only the first page the API returns is considered. There is no retry,
/// no caching and no authentication.
#[derive(Debug, Clone)]
pub struct ReleaseFetcher {
    /// API root, e.g. `https://api.github.com`.
    pub api_base: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub name: String,
    /// Optional HTTP proxy URL.
    pub proxy: Option<String>,
    /// Bypass every proxy, including the ones reqwest picks up itself.
    pub direct: bool,
    /// Request timeout.
    pub timeout: Duration,
}

impl ReleaseFetcher {
    /// Fetcher for `owner/name` on `host`, talking to `https://api.<host>`.
    ///
    /// Proxy is read from `HTTP_PROXY` / `HTTPS_PROXY`.
    pub fn new(host: &str, owner: &str, name: &str) -> Self {
        let proxy = proxy_from_env(|key| std::env::var(key).ok());

        Self {
            api_base: format!("https://api.{host}"),
            owner: owner.to_owned(),
            name: name.to_owned(),
            proxy,
            direct: false,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Point at a different API root (builder).
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_owned();
        self
    }

    /// Set an explicit HTTP/HTTPS proxy URL (builder).
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    /// Connect straight to the API, ignoring all proxy settings (builder).
    pub fn direct(mut self) -> Self {
        self.proxy = None;
        self.direct = true;
        self
    }

    /// Override the request timeout (builder).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `<api_base>/repos/<owner>/<name>/releases`
    pub fn releases_url(&self) -> String {
        format!("{}/repos/{}/{}/releases", self.api_base, self.owner, self.name)
    }

    fn build_client(&self) -> Result<Client, reqwest::Error> {
        let builder = Client::builder().timeout(self.timeout);
        let builder = match &self.proxy {
            Some(proxy_url) => builder.proxy(Proxy::all(proxy_url)?),
            None if self.direct => builder.no_proxy(),
            None => builder,
        };
        builder.build()
    }

    /// Fetch the releases in API order (newest first).
    pub async fn fetch_releases(&self) -> Result<Vec<Release>, FetchError> {
        let url = self.releases_url();
        debug!("GET {url}");

        let client = self.build_client()?;
        let resp = client
            .get(&url)
            .header(USER_AGENT, "bindo")
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = resp.status();
        debug!("{url} returned {status}");
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let body = resp.text().await?;
        let releases: Vec<Release> = serde_json::from_str(&body)?;
        info!(
            "found {} releases for {}/{}",
            releases.len(),
            self.owner,
            self.name
        );
        Ok(releases)
    }
}

/// First non-empty of `HTTP_PROXY` and `HTTPS_PROXY`, looked up through `get`.
pub fn proxy_from_env(get: impl Fn(&str) -> Option<String>) -> Option<String> {
    ["HTTP_PROXY", "HTTPS_PROXY"]
        .into_iter()
        .find_map(|key| get(key).filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    const PAYLOAD: &str = r#"[
        {"name": "v2", "tag_name": "v2.0.0-rc1", "prerelease": true, "assets": []},
        {"name": "v1", "tag_name": "v1.0.0", "prerelease": false,
         "assets": [{"name": "app-linux.tar.gz", "browser_download_url": "https://example.com/app-linux.tar.gz"}]}
    ]"#;

    fn fetcher(server: &Server) -> ReleaseFetcher {
        ReleaseFetcher::new(DEFAULT_HOST, "octo", "app")
            .with_api_base(&server.url())
            .direct()
    }

    #[test]
    fn builds_url_from_host() {
        let fetcher = ReleaseFetcher::new("example.com", "owner", "repo");
        assert_eq!(
            fetcher.releases_url(),
            "https://api.example.com/repos/owner/repo/releases"
        );
        assert_eq!(fetcher.timeout, REQUEST_TIMEOUT);
    }

    #[test]
    fn only_direct_bypasses_reqwest_proxy_lookup() {
        let fetcher = ReleaseFetcher::new("example.com", "owner", "repo").with_proxy(None);
        assert!(!fetcher.direct);
        assert!(fetcher.build_client().is_ok());

        let fetcher = fetcher.with_proxy(Some("http://proxy:8080".into())).direct();
        assert!(fetcher.direct);
        assert_eq!(fetcher.proxy, None);
    }

    #[tokio::test]
    async fn decodes_releases_in_api_order() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octo/app/releases")
            .match_header("user-agent", "bindo")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PAYLOAD)
            .create_async()
            .await;

        let releases = fetcher(&server).fetch_releases().await.unwrap();
        mock.assert_async().await;

        let tags: Vec<&str> = releases.iter().map(|r| r.tag.as_str()).collect();
        assert_eq!(tags, ["v2.0.0-rc1", "v1.0.0"]);
        assert!(releases[0].is_prerelease);
        assert_eq!(
            releases[1].assets[0].name.as_deref(),
            Some("app-linux.tar.gz")
        );
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/octo/app/releases")
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let err = fetcher(&server).fetch_releases().await.unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status.as_u16(), 404);
                assert!(body.contains("Not Found"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/octo/app/releases")
            .with_status(200)
            .with_body(r#"{"not": "a list"}"#)
            .create_async()
            .await;

        let err = fetcher(&server).fetch_releases().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
    }

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn proxy_env_precedence() {

        assert_eq!(proxy_from_env(env(&[])), None);
        assert_eq!(
            proxy_from_env(env(&[("HTTPS_PROXY", "http://s:3128")])).as_deref(),
            Some("http://s:3128")
        );
        assert_eq!(
            proxy_from_env(env(&[("HTTP_PROXY", "http://p:8080"), ("HTTPS_PROXY", "http://s:3128")]))
                .as_deref(),
            Some("http://p:8080")
        );
        assert_eq!(
            proxy_from_env(env(&[("HTTP_PROXY", ""), ("HTTPS_PROXY", "http://s:3128")])).as_deref(),
            Some("http://s:3128")
        );
    }

    #[tokio::test]
    async fn routes_through_configured_proxy() {
        let mut proxy = Server::new_async().await;
        let mock = proxy
            .mock("GET", "/repos/octo/app/releases")
            .match_header("user-agent", "bindo")
            .with_status(200)
            .with_body(PAYLOAD)
            .create_async()
            .await;

        // The origin does not resolve; only the proxy can answer.
        let releases = ReleaseFetcher::new("example.invalid", "octo", "app")
            .with_api_base("http://api.example.invalid")
            .with_proxy(Some(proxy.url()))
            .fetch_releases()
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[1].tag, "v1.0.0");
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        // Connections queue in the backlog but never get an answer.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let err = ReleaseFetcher::new(DEFAULT_HOST, "octo", "app")
            .with_api_base(&format!("http://{addr}"))
            .direct()
            .with_timeout(Duration::from_millis(200))
            .fetch_releases()
            .await
            .unwrap_err();

        match err {
            FetchError::Transport(e) => assert!(e.is_timeout(), "got {e:?}"),
            other => panic!("expected transport error, got {other:?}"),
        }
        drop(listener);
    }
}
