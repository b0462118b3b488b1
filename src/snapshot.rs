use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Nested package names such as `repo/image` are flattened to `repo_image`.
pub fn snapshot_path(dir: &Path, package_name: &str) -> PathBuf {
    dir.join(format!(
        "temp_versions-{}.json",
        package_name.replace('/', "_"),
    ))
}

/// Dump the version listing reply of a package as fetched, replacing any previous dump.
/// Only meant for debugging; nothing reads the file back.
pub async fn write_snapshot(
    dir: &Path,
    package_name: &str,
    versions: &serde_json::Value,
) -> Result<PathBuf> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    versions
        .serialize(&mut serializer)
        .context("Failed to serialize package versions")?;

    let path = snapshot_path(dir, package_name);
    tokio::fs::write(&path, buf)
        .await
        .context(format!("Failed to write {}", path.display()))?;
    log::debug!("Wrote versions of {} to {}", package_name, path.display());

    Ok(path)
}
