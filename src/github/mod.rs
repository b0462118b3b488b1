use anyhow::Result;
use async_trait::async_trait;

mod api;
mod client;

pub use api::*;
pub use client::GithubClientImpl;
pub use reqwest::StatusCode;

/// Reply of a version listing, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionsReply {
    pub status: StatusCode,
    /// Parsed JSON body, a JSON string if the body is not JSON, `null` if empty.
    pub body: serde_json::Value,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GithubClient {
    /// First page of container packages visible to the authenticated user.
    async fn get_packages(&self) -> Result<Vec<Package>>;

    /// First page of versions of a container package, as returned by the API.
    /// Error statuses are not turned into errors here.
    async fn get_package_versions(
        &self,
        owner: &str,
        package_name: &str,
    ) -> Result<VersionsReply>;

    async fn delete_package_version(&self, url: &str) -> Result<()>;
}
