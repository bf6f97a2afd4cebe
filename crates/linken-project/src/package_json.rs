use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

use linken_constants::MANIFEST_FILE;
use linken_error::{LinkenError, Result};

/// The parts of a `package.json` that linking cares about.
///
/// Fields with an unexpected JSON type are treated as absent instead of
/// failing the whole parse; only malformed JSON is an error.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageJson {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_map")]
    pub dependencies: Option<IndexMap<String, String>>,
    #[serde(
        rename = "devDependencies",
        default,
        deserialize_with = "lenient_string_map"
    )]
    pub dev_dependencies: Option<IndexMap<String, String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyType {
    Dependencies,
    DevDependencies,
}

impl DependencyType {
    /// Sections in the order they are consulted; earlier sections win.
    pub const PRIORITY: [Self; 2] = [Self::Dependencies, Self::DevDependencies];
}

impl PackageJson {
    pub fn parse(content: impl AsRef<[u8]>, path: &Path) -> Result<Self> {
        serde_json::from_slice(content.as_ref()).map_err(|e| LinkenError::manifest(path, e))
    }

    #[must_use]
    pub fn section(&self, dep_type: DependencyType) -> Option<&IndexMap<String, String>> {
        match dep_type {
            DependencyType::Dependencies => self.dependencies.as_ref(),
            DependencyType::DevDependencies => self.dev_dependencies.as_ref(),
        }
    }

    /// `(name, version)` when both are present and non-empty.
    #[must_use]
    pub fn identity(&self) -> Option<(&str, &str)> {
        match (self.name.as_deref(), self.version.as_deref()) {
            (Some(name), Some(version)) if !name.is_empty() && !version.is_empty() => {
                Some((name, version))
            }
            _ => None,
        }
    }
}

#[must_use]
pub fn package_json_path(project_dir: &Path) -> PathBuf {
    project_dir.join(MANIFEST_FILE)
}

#[must_use]
pub fn has_package_json(project_dir: &Path) -> bool {
    package_json_path(project_dir).is_file()
}

pub fn read_package_json(project_dir: &Path) -> Result<PackageJson> {
    let path = package_json_path(project_dir);
    let content = fs::read(&path).map_err(|e| LinkenError::io(&path, e))?;
    PackageJson::parse(content, &path)
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_string_map<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<IndexMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Object(map) = value else {
        return Ok(None);
    };

    Ok(Some(
        map.into_iter()
            .filter_map(|(name, range)| match range {
                serde_json::Value::String(range) => Some((name, range)),
                _ => None,
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<PackageJson> {
        PackageJson::parse(content, Path::new("package.json"))
    }

    #[test]
    fn test_parse_sections_in_declared_order() {
        let pkg = parse(
            r#"{
                "name": "bar",
                "version": "1.0.0",
                "dependencies": { "zed": "^1.0.0", "alpha": "*" },
                "devDependencies": { "foo": "~2.1" }
            }"#,
        )
        .unwrap();

        assert_eq!(pkg.identity(), Some(("bar", "1.0.0")));
        let deps: Vec<_> = pkg
            .section(DependencyType::Dependencies)
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(deps, vec!["zed", "alpha"]);
        assert_eq!(
            pkg.section(DependencyType::DevDependencies)
                .and_then(|d| d.get("foo"))
                .map(String::as_str),
            Some("~2.1")
        );
    }

    #[test]
    fn test_unexpected_types_are_ignored() {
        let pkg = parse(r#"{ "name": "x", "version": 2, "dependencies": { "a": "1", "b": true } }"#)
            .unwrap();

        assert_eq!(pkg.version, None);
        assert_eq!(pkg.identity(), None);
        assert_eq!(pkg.dependencies.unwrap().len(), 1);
        assert_eq!(pkg.dev_dependencies, None);
    }

    #[test]
    fn test_malformed_json_is_manifest_error() {
        let err = parse(r#"{ "name": "#).unwrap_err();
        assert!(matches!(err, LinkenError::ManifestError { .. }));
    }

    #[test]
    fn test_read_package_json_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!has_package_json(dir.path()));
        assert!(matches!(
            read_package_json(dir.path()),
            Err(LinkenError::IoError { .. })
        ));

        fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "qux", "version": "1.0.0" }"#,
        )
        .unwrap();
        assert!(has_package_json(dir.path()));
        assert_eq!(
            read_package_json(dir.path()).unwrap().name.as_deref(),
            Some("qux")
        );
    }

    #[test]
    fn test_non_utf8_manifest_is_manifest_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), [0xff, 0xfe, b'{', b'}']).unwrap();

        assert!(matches!(
            read_package_json(dir.path()),
            Err(LinkenError::ManifestError { .. })
        ));
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(
            DependencyType::PRIORITY,
            [DependencyType::Dependencies, DependencyType::DevDependencies]
        );
    }
}
