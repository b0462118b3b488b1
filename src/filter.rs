use crate::github::{Package, PackageVersion};

/// Keep the packages published by `owner` from `repository`, in their original order.
///
/// Both names are compared exactly, case included.
pub fn filter_packages(owner: &str, repository: &str, packages: &[Package]) -> Vec<Package> {
    packages
        .iter()
        .filter(|package| {
            package.owner.login == owner
                && package
                    .repository
                    .as_ref()
                    .map_or(false, |repo| repo.name == repository)
        })
        .cloned()
        .collect()
}

/// Keep the versions without any tag, in their original order.
pub fn filter_untagged(versions: &[PackageVersion]) -> Vec<PackageVersion> {
    versions
        .iter()
        .filter(|version| version.is_untagged())
        .cloned()
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::github::{
        ContainerVersionMetadata, PackageOwner, PackageRepository, PackageVersionMetadata,
    };

    pub fn package(name: &str, owner: &str, repository: Option<&str>) -> Package {
        Package {
            name: name.to_string(),
            package_type: "container".to_string(),
            owner: PackageOwner {
                login: owner.to_string(),
            },
            repository: repository.map(|name| PackageRepository {
                name: name.to_string(),
            }),
        }
    }

    pub fn version(id: u64, tags: &[&str]) -> PackageVersion {
        PackageVersion {
            id,
            name: format!("sha256:foobar{id}"),
            url: format!("https://api.github.com/users/acme/packages/container/img1/versions/{id}"),
            metadata: PackageVersionMetadata {
                package_type: "container".to_string(),
                container: ContainerVersionMetadata {
                    tags: tags.iter().map(|tag| tag.to_string()).collect(),
                },
            },
        }
    }

    fn names(packages: &[Package]) -> Vec<&str> {
        packages.iter().map(|p| p.name.as_str()).collect()
    }

    fn ids(versions: &[PackageVersion]) -> Vec<u64> {
        versions.iter().map(|v| v.id).collect()
    }

    #[test]
    fn test_filter_packages() {
        let packages = vec![
            package("img1", "acme", Some("repo1")),
            package("img2", "acme", Some("other")),
        ];
        assert_eq!(names(&filter_packages("acme", "repo1", &packages)), ["img1"]);

        // Empty input
        assert!(filter_packages("acme", "repo1", &[]).is_empty());
    }

    #[test]
    fn test_filter_packages_requires_both_matches() {
        let packages = vec![
            package("a", "acme", Some("repo1")),
            package("b", "other", Some("repo1")),
            package("c", "acme", Some("repo2")),
            package("d", "acme", None),
            package("e", "Acme", Some("repo1")),
            package("f", "acme", Some("Repo1")),
            package("g", "acme", Some("repo1")),
        ];

        let filtered = filter_packages("acme", "repo1", &packages);
        assert_eq!(names(&filtered), ["a", "g"]);

        // Filtering again changes nothing
        assert_eq!(filter_packages("acme", "repo1", &filtered), filtered);
    }

    #[test]
    fn test_filter_untagged() {
        let versions = vec![version(1, &[]), version(2, &["latest"]), version(3, &[])];

        let untagged = filter_untagged(&versions);
        assert_eq!(ids(&untagged), [1, 3]);
        assert_eq!(filter_untagged(&untagged), untagged);

        // Input is left untouched
        assert_eq!(ids(&versions), [1, 2, 3]);
    }

    #[test]
    fn test_filter_untagged_excludes_any_tag() {
        let versions = vec![
            version(1, &["v1"]),
            version(2, &["v2", "latest"]),
            version(3, &[""]),
        ];
        assert!(filter_untagged(&versions).is_empty());
        assert!(filter_untagged(&[]).is_empty());
    }
}
