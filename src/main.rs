use std::{env, path::Path, process};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use github::{GithubClientImpl, PackageVersion, StatusCode};

use crate::github::GithubClient;

mod filter;
mod github;
mod snapshot;

/// Delete all untagged versions of the GitHub container packages of a repository.
#[derive(Parser)]
#[clap(version)]
struct Args {
    /// Owner of the repository
    #[clap(long)]
    owner: String,

    /// Name of the repository
    #[clap(long)]
    repository: String,

    /// GitHub token
    #[clap(long)]
    token: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", format!("{}=info", env!("CARGO_CRATE_NAME")));
    }
    env_logger::init();

    log::info!(
        "Starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    );
    log::debug!(
        "With owner {:?} and repository {:?}",
        args.owner,
        args.repository,
    );

    if let Err(error) = run(args).await {
        log::error!("{:?}", error);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let client = GithubClientImpl::new(&args.token).context("Failed to create github client")?;

    prune_repository(&client, &args.owner, &args.repository, Path::new(".")).await
}

async fn prune_repository(
    client: &impl GithubClient,
    owner: &str,
    repository: &str,
    snapshot_dir: &Path,
) -> Result<()> {
    let packages = client
        .get_packages()
        .await
        .context("Failed to get packages from github")?;
    let packages = filter::filter_packages(owner, repository, &packages);
    log::debug!(
        "Found {} container package(s) of {}/{}",
        packages.len(),
        owner,
        repository,
    );

    for package in packages {
        clean_package(client, owner, &package.name, snapshot_dir)
            .await
            .context(format!("Failed to clean package {}/{}", owner, package.name))?;
    }

    Ok(())
}

async fn clean_package(
    client: &impl GithubClient,
    owner: &str,
    package_name: &str,
    snapshot_dir: &Path,
) -> Result<()> {
    log::info!("Cleaning package {}/{}", owner, package_name);

    let versions = fetch_package_versions(client, owner, package_name, snapshot_dir).await?;
    let untagged = filter::filter_untagged(&versions);
    log::debug!(
        "{} of {} version(s) are untagged",
        untagged.len(),
        versions.len(),
    );

    clean_package_versions(client, owner, package_name, &untagged)
        .await
        .context("Failed to clean package versions")
}

async fn fetch_package_versions(
    client: &impl GithubClient,
    owner: &str,
    package_name: &str,
    snapshot_dir: &Path,
) -> Result<Vec<PackageVersion>> {
    let reply = client
        .get_package_versions(owner, package_name)
        .await
        .context("Failed to get package versions from github")?;

    // Written before the status check so that error replies end up in the snapshot too.
    snapshot::write_snapshot(snapshot_dir, package_name, &reply.body)
        .await
        .context("Failed to write package versions snapshot")?;

    if reply.status == StatusCode::NOT_FOUND {
        return Err(anyhow!("Package {}/{} does not exist", owner, package_name));
    } else if !reply.status.is_success() {
        return Err(anyhow!("Server returned status {}", reply.status));
    }

    serde_json::from_value(reply.body).context("Failed to parse package versions")
}

async fn clean_package_versions(
    client: &impl GithubClient,
    owner: &str,
    package_name: &str,
    versions: &[PackageVersion],
) -> Result<()> {
    for version in versions {
        log::info!("Deleting {}/{}:{}", owner, package_name, version.name);

        client.delete_package_version(&version.url).await?;
    }

    Ok(())
}
