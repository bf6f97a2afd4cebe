use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

use linken_error::{LinkenError, Result};
use linken_project::{has_package_json, read_package_json};
use linken_resolver::{Version, cmp_precedence, parse_version};

use crate::options::LinkOptions;

/// One checkout of a package found under a source path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageVersion {
    pub name: String,
    pub version: String,
    /// `None` when `version` is not valid semver; such entries sort last and
    /// never satisfy a requirement.
    pub parsed: Option<Version>,
    pub path: PathBuf,
}

impl PackageVersion {
    fn same_version(&self, other: &Self) -> bool {
        match (&self.parsed, &other.parsed) {
            (Some(a), Some(b)) => cmp_precedence(a, b).is_eq(),
            _ => self.version == other.version,
        }
    }
}

/// Every package available for linking, keyed by name in discovery order.
/// Each name's versions are sorted highest first.
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    modules: IndexMap<String, Vec<PackageVersion>>,
}

impl ModuleCatalog {
    /// Scan each source path's immediate subdirectories for packages.
    ///
    /// Missing source paths are reported and skipped. A subdirectory without
    /// a `package.json` is not a package and is skipped silently, but a
    /// `package.json` that cannot be parsed aborts the scan.
    pub fn build<P: AsRef<Path>>(source_roots: &[P], options: &LinkOptions) -> Result<Self> {
        let mut catalog = Self::default();

        for root in source_roots {
            let root = root.as_ref();
            if !root.is_dir() {
                options
                    .log
                    .info(&format!("Ignoring invalid --src path \"{}\".", root.display()));
                continue;
            }

            let root = fs::canonicalize(root).map_err(|e| LinkenError::io(root, e))?;
            options
                .log
                .status(&format!("Scanning {}...", root.display()));

            for dir in package_dirs(&root)? {
                catalog.add_checkout(&dir, options)?;
            }
        }

        catalog.sort_versions();
        catalog.report(options);

        Ok(catalog)
    }

    fn add_checkout(&mut self, dir: &Path, options: &LinkOptions) -> Result<()> {
        let pkg = read_package_json(dir)?;
        let Some((name, version)) = pkg.identity() else {
            options.log.warn(&format!(
                "Ignoring package.json without a name and version in \"{}\".",
                dir.display()
            ));
            return Ok(());
        };

        if !is_linkable_name(name) {
            options.log.warn(&format!(
                "Ignoring package with unusable name \"{name}\" in \"{}\".",
                dir.display()
            ));
            return Ok(());
        }

        let package = PackageVersion {
            name: name.to_string(),
            version: version.to_string(),
            parsed: parse_version(version),
            path: dir.to_path_buf(),
        };
        self.insert(package, options);

        Ok(())
    }

    /// Add a checkout. A later checkout of an already known `name@version`
    /// replaces the earlier one; versions of equal precedence (`1.0.0`,
    /// `v1.0.0`, `1.0.0+build`) count as the same version.
    fn insert(&mut self, package: PackageVersion, options: &LinkOptions) {
        let versions = self.modules.entry(package.name.clone()).or_default();

        if let Some(existing) = versions.iter_mut().find(|v| v.same_version(&package)) {
            options.log.warn(&format!(
                "Found {}@{} in both \"{}\" and \"{}\"; using the latter.",
                package.name,
                package.version,
                existing.path.display(),
                package.path.display()
            ));
            *existing = package;
            return;
        }

        versions.push(package);
    }

    fn sort_versions(&mut self) {
        for versions in self.modules.values_mut() {
            versions.sort_by(|a, b| match (&a.parsed, &b.parsed) {
                (Some(a), Some(b)) => cmp_precedence(b, a),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
        }
    }

    fn report(&self, options: &LinkOptions) {
        if !options.debug {
            return;
        }

        let version_count = self.version_count();
        if version_count == self.len() {
            options.debug(&format!("Found {} modules:", self.len()));
        } else {
            options.debug(&format!(
                "Found {version_count} versions of {} modules:",
                self.len()
            ));
        }

        for (name, versions) in &self.modules {
            let list: Vec<&str> = versions.iter().map(|v| v.version.as_str()).collect();
            options.debug(&format!("* {name} ({})", list.join(", ")));
        }
    }

    /// Package names in the order they were first discovered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Versions of `name`, highest first.
    #[must_use]
    pub fn versions(&self, name: &str) -> &[PackageVersion] {
        self.modules.get(name).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn path(&self, name: &str, version: &str) -> Option<&Path> {
        self.versions(name)
            .iter()
            .find(|v| v.version == version)
            .map(|v| v.path.as_path())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    #[must_use]
    pub fn version_count(&self) -> usize {
        self.modules.values().map(Vec::len).sum()
    }
}

/// Keep the source paths that are existing directories, reporting the rest.
pub fn valid_source_roots<P: AsRef<Path>>(
    source_roots: &[P],
    options: &LinkOptions,
) -> Vec<PathBuf> {
    source_roots
        .iter()
        .map(|root| root.as_ref())
        .filter(|root| {
            let valid = root.is_dir();
            if !valid {
                options
                    .log
                    .info(&format!("Ignoring invalid --src path \"{}\".", root.display()));
            }
            valid
        })
        .map(Path::to_path_buf)
        .collect()
}

/// Immediate subdirectories of `root` holding a `package.json`, sorted by
/// directory name.
fn package_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(root).map_err(|e| LinkenError::io(root, e))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| LinkenError::io(root, e))?.path();
        if path.is_dir() && has_package_json(&path) {
            dirs.push(path);
        }
    }
    dirs.sort();

    Ok(dirs)
}

/// Names that map to a single entry (or `@scope/entry`) inside the link
/// directory.
fn is_linkable_name(name: &str) -> bool {
    let valid_part = |part: &str| {
        !part.is_empty() && part != "." && part != ".." && !part.contains(['/', '\\'])
    };

    match name.strip_prefix('@').and_then(|scoped| scoped.split_once('/')) {
        Some((scope, entry)) => valid_part(scope) && valid_part(entry),
        None => valid_part(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linken_logger::{LogLevel, LogSink};
    use std::sync::{Arc, Mutex};

    fn write_package(root: &Path, dir: &str, manifest: &str) -> PathBuf {
        let path = root.join(dir);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("package.json"), manifest).unwrap();
        path
    }

    fn package(root: &Path, dir: &str, name: &str, version: &str) -> PathBuf {
        write_package(
            root,
            dir,
            &format!(r#"{{ "name": "{name}", "version": "{version}" }}"#),
        )
    }

    fn capture() -> (LinkOptions, Arc<Mutex<Vec<(LogLevel, String)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            LogSink::custom(move |level, msg| seen.lock().unwrap().push((level, msg.to_string())))
        };
        (LinkOptions::new().with_log(sink), seen)
    }

    #[test]
    fn test_versions_sorted_descending() {
        let src = tempfile::tempdir().unwrap();
        package(src.path(), "foo-a", "foo", "1.0.0");
        package(src.path(), "foo-b", "foo", "2.0.0");
        package(src.path(), "foo-c", "foo", "1.10.0");
        package(src.path(), "foo-d", "foo", "2.0.0-beta.1");

        let catalog = ModuleCatalog::build(&[src.path()], &LinkOptions::new().silent()).unwrap();
        let versions: Vec<&str> = catalog
            .versions("foo")
            .iter()
            .map(|v| v.version.as_str())
            .collect();

        assert_eq!(versions, vec!["2.0.0", "2.0.0-beta.1", "1.10.0", "1.0.0"]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.version_count(), 4);
    }

    #[test]
    fn test_invalid_versions_sort_last() {
        let src = tempfile::tempdir().unwrap();
        package(src.path(), "a", "foo", "not-a-version");
        package(src.path(), "b", "foo", "0.1.0");

        let catalog = ModuleCatalog::build(&[src.path()], &LinkOptions::new().silent()).unwrap();
        let versions = catalog.versions("foo");

        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].version, "0.1.0");
        assert_eq!(versions[1].parsed, None);
    }

    #[test]
    fn test_directories_without_manifest_are_skipped() {
        let src = tempfile::tempdir().unwrap();
        package(src.path(), "baz", "baz", "1.0.0");
        fs::create_dir_all(src.path().join("not-a-package/lib")).unwrap();
        fs::write(src.path().join("README.md"), "hello").unwrap();

        let catalog = ModuleCatalog::build(&[src.path()], &LinkOptions::new().silent()).unwrap();

        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["baz"]);
        assert!(catalog.versions("not-a-package").is_empty());
    }

    #[test]
    fn test_missing_source_root_is_reported() {
        let src = tempfile::tempdir().unwrap();
        package(src.path(), "baz", "baz", "1.0.0");
        let missing = src.path().join("nope");
        let (options, seen) = capture();

        let catalog = ModuleCatalog::build(&[missing.as_path(), src.path()], &options).unwrap();

        assert_eq!(catalog.len(), 1);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].1.starts_with("Ignoring invalid --src path"));
    }

    #[test]
    fn test_malformed_manifest_is_fatal() {
        let src = tempfile::tempdir().unwrap();
        write_package(src.path(), "broken", "{ \"name\": ");

        let err = ModuleCatalog::build(&[src.path()], &LinkOptions::new().silent()).unwrap_err();
        assert!(matches!(err, LinkenError::ManifestError { .. }));
    }

    #[test]
    fn test_later_root_wins_for_duplicate_version() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        package(first.path(), "qux", "qux", "1.0.0");
        let winner = package(second.path(), "qux-copy", "qux", "1.0.0");
        let (options, seen) = capture();

        let catalog = ModuleCatalog::build(&[first.path(), second.path()], &options).unwrap();

        assert_eq!(catalog.versions("qux").len(), 1);
        assert_eq!(
            catalog.path("qux", "1.0.0"),
            Some(fs::canonicalize(winner).unwrap().as_path())
        );
        assert!(
            seen.lock()
                .unwrap()
                .iter()
                .any(|(level, msg)| *level == LogLevel::Warning && msg.contains("qux@1.0.0"))
        );
    }

    #[test]
    fn test_equal_precedence_versions_are_duplicates() {
        let src = tempfile::tempdir().unwrap();
        package(src.path(), "a", "foo", "1.0.0");
        package(src.path(), "b", "foo", "v1.0.0");
        package(src.path(), "c", "foo", "1.0.0+local");
        package(src.path(), "d", "foo", "0.9.0");
        let (options, seen) = capture();

        let catalog = ModuleCatalog::build(&[src.path()], &options).unwrap();
        let versions = catalog.versions("foo");

        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].version, "1.0.0+local");
        assert_eq!(versions[1].version, "0.9.0");
        assert!(versions[0].path.ends_with("c"));
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_nameless_and_unsafe_packages_are_skipped() {
        let src = tempfile::tempdir().unwrap();
        write_package(src.path(), "nameless", r#"{ "version": "1.0.0" }"#);
        package(src.path(), "sneaky", "../escape", "1.0.0");
        package(src.path(), "scoped", "@acme/widget", "1.0.0");

        let catalog = ModuleCatalog::build(&[src.path()], &LinkOptions::new().silent()).unwrap();

        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["@acme/widget"]);
    }

    #[test]
    fn test_debug_summary() {
        let src = tempfile::tempdir().unwrap();
        package(src.path(), "a", "foo", "1.0.0");
        package(src.path(), "b", "foo", "2.0.0");
        package(src.path(), "c", "bar", "1.0.0");
        let (options, seen) = capture();

        ModuleCatalog::build(&[src.path()], &options.with_debug(true)).unwrap();

        let messages: Vec<String> = seen.lock().unwrap().iter().map(|(_, m)| m.clone()).collect();
        assert_eq!(
            messages,
            vec![
                "Found 3 versions of 2 modules:".to_string(),
                "* foo (2.0.0, 1.0.0)".to_string(),
                "* bar (1.0.0)".to_string(),
            ]
        );
    }
}
