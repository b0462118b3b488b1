use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;

use reqwest::{
    header::{HeaderMap, HeaderName, ACCEPT, AUTHORIZATION, USER_AGENT},
    Client, ClientBuilder, StatusCode, Url,
};

use super::{GithubClient, Package, VersionsReply};

const DEFAULT_API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";

pub struct GithubClientImpl {
    client: Client,
    api_url: String,
}

impl GithubClientImpl {
    pub fn new(token: impl AsRef<str>) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    pub fn with_base_url(token: impl AsRef<str>, api_url: impl Into<String>) -> Result<Self> {
        let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        log::debug!("{}: {}", USER_AGENT.as_str(), user_agent);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, "application/vnd.github+json".try_into()?);
        headers.insert(
            AUTHORIZATION,
            format!("Bearer {}", token.as_ref()).try_into()?,
        );
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            API_VERSION.try_into()?,
        );
        headers.insert(USER_AGENT, user_agent.try_into()?);

        let client = ClientBuilder::new().default_headers(headers).build()?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl GithubClient for GithubClientImpl {
    async fn get_packages(&self) -> Result<Vec<Package>> {
        // Only the first page is fetched.
        let url = format!("{}/user/packages", self.api_url);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("package_type", "container")])
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            return Err(anyhow!("Server returned status {}", response.status()));
        }

        let packages = response
            .json()
            .await
            .context("Failed to parse reply as a list of packages")?;

        Ok(packages)
    }

    async fn get_package_versions(
        &self,
        owner: &str,
        package_name: &str,
    ) -> Result<VersionsReply> {
        // Only the first page is fetched.
        let mut url = Url::parse(&self.api_url).context("Invalid api url")?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Invalid api url {}", self.api_url))?
            .pop_if_empty()
            .extend(&["users", owner, "packages", "container", package_name, "versions"]);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        // Error replies are kept as well, the caller decides what to do with them.
        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read reply")?;
        let body = if text.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| serde_json::Value::String(text))
        };

        Ok(VersionsReply { status, body })
    }

    async fn delete_package_version(&self, url: &str) -> Result<()> {
        log::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .context(format!("Failed to delete {}", url))?;

        if response.status() != StatusCode::NO_CONTENT {
            return Err(anyhow!(
                "Failed to delete {}: server returned status {}",
                url,
                response.status(),
            ));
        }

        Ok(())
    }
}
