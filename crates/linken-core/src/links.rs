use indexmap::IndexMap;
use std::path::PathBuf;

use linken_project::{DependencyType, PackageJson};
use linken_resolver::resolve_requirement;

use crate::catalog::ModuleCatalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedLink {
    pub name: String,
    pub version: String,
    pub path: PathBuf,
}

/// The single version chosen for each dependency of one consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSelection {
    links: IndexMap<String, SelectedLink>,
}

impl LinkSelection {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SelectedLink> {
        self.links.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.links.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedLink> {
        self.links.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    fn insert(&mut self, link: SelectedLink) {
        self.links.entry(link.name.clone()).or_insert(link);
    }
}

/// Decide which catalog packages a consumer should link.
///
/// `dependencies` are consulted before `devDependencies`; within a section
/// names are visited in catalog order, and for each name the first version
/// (highest first) satisfying the requirement is taken. Once a name is
/// chosen no later section can change it.
#[must_use]
pub fn resolve_links(pkg: &PackageJson, catalog: &ModuleCatalog) -> LinkSelection {
    let mut selection = LinkSelection::default();

    for dep_type in DependencyType::PRIORITY {
        let Some(declared) = pkg.section(dep_type) else {
            continue;
        };

        for name in catalog.names() {
            if selection.contains(name) {
                continue;
            }
            let Some(requirement) = resolve_requirement(declared.get(name).map(String::as_str))
            else {
                continue;
            };

            let chosen = catalog.versions(name).iter().find(|candidate| {
                candidate
                    .parsed
                    .as_ref()
                    .is_some_and(|version| requirement.satisfied_by(version))
            });

            if let Some(chosen) = chosen {
                selection.insert(SelectedLink {
                    name: chosen.name.clone(),
                    version: chosen.version.clone(),
                    path: chosen.path.clone(),
                });
            }
        }
    }

    selection
}
