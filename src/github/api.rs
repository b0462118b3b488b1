use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Package {
    pub name: String,
    pub package_type: String,
    pub owner: PackageOwner,
    /// Missing for packages that are not linked to a repository.
    #[serde(default)]
    pub repository: Option<PackageRepository>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PackageOwner {
    pub login: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PackageRepository {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PackageVersion {
    pub id: u64,
    /// Image digest, e.g. `sha256:...`.
    #[serde(default)]
    pub name: String,
    /// API endpoint of this version, also used to delete it.
    pub url: String,
    pub metadata: PackageVersionMetadata,
}

impl PackageVersion {
    pub fn is_untagged(&self) -> bool {
        self.metadata.container.tags.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PackageVersionMetadata {
    pub package_type: String,
    pub container: ContainerVersionMetadata,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContainerVersionMetadata {
    pub tags: Vec<String>,
}
