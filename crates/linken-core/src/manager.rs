use std::fs;
use std::path::{Path, PathBuf};

use linken_error::{LinkenError, Result};
use linken_project::{has_package_json, read_package_json};

use crate::catalog::{ModuleCatalog, valid_source_roots};
use crate::linker::PackageLinker;
use crate::links::{LinkSelection, resolve_links};
use crate::options::LinkOptions;

/// What happened to one destination project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerReport {
    pub path: PathBuf,
    pub selection: LinkSelection,
    /// Number of link entries created or removed.
    pub affected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub consumers: Vec<ConsumerReport>,
}

impl LinkReport {
    #[must_use]
    pub fn total_affected(&self) -> usize {
        self.consumers.iter().map(|c| c.affected).sum()
    }
}

pub struct LinkManager {
    options: LinkOptions,
}

impl LinkManager {
    #[must_use]
    pub const fn new(options: LinkOptions) -> Self {
        Self { options }
    }

    /// Link (or unlink) packages found under `sources` into every project in
    /// `destinations`.
    ///
    /// The catalog is built once and shared by all destinations. The first
    /// manifest or filesystem error stops the whole run.
    pub fn run<S, D>(&self, sources: &[S], destinations: &[D]) -> Result<LinkReport>
    where
        S: AsRef<Path>,
        D: AsRef<Path>,
    {
        let destinations = self.valid_destinations(destinations);
        if destinations.is_empty() {
            return Err(LinkenError::NoValidDestinations);
        }

        let sources = valid_source_roots(sources, &self.options);
        if sources.is_empty() {
            return Err(LinkenError::NoValidSources);
        }

        let catalog = ModuleCatalog::build(sources.as_slice(), &self.options)?;

        let mut report = LinkReport::default();
        for dest in destinations {
            report.consumers.push(self.process_destination(&dest, &catalog)?);
        }

        Ok(report)
    }

    fn process_destination(&self, dest: &Path, catalog: &ModuleCatalog) -> Result<ConsumerReport> {
        let dest = fs::canonicalize(dest).map_err(|e| LinkenError::io(dest, e))?;
        let pkg = read_package_json(&dest)?;
        let selection = resolve_links(&pkg, catalog);
        let affected = PackageLinker::reconcile(&dest, &selection, &self.options)?;

        Ok(ConsumerReport {
            path: dest,
            selection,
            affected,
        })
    }

    fn valid_destinations<D: AsRef<Path>>(&self, destinations: &[D]) -> Vec<PathBuf> {
        destinations
            .iter()
            .map(|dest| dest.as_ref())
            .filter(|dest| {
                if !dest.is_dir() {
                    self.options
                        .log
                        .info(&format!("Ignoring invalid path \"{}\".", dest.display()));
                    false
                } else if !has_package_json(dest) {
                    self.options.log.info(&format!(
                        "Missing package.json file in path \"{}\".",
                        dest.display()
                    ));
                    false
                } else {
                    true
                }
            })
            .map(Path::to_path_buf)
            .collect()
    }
}
