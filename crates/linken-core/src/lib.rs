pub mod catalog;
pub mod linker;
pub mod links;
pub mod list;
pub mod manager;
pub mod options;

pub use catalog::{ModuleCatalog, PackageVersion};
pub use linker::PackageLinker;
pub use links::{LinkSelection, SelectedLink, resolve_links};
pub use list::{LinkEntry, ListManager};
pub use manager::{ConsumerReport, LinkManager, LinkReport};
pub use options::LinkOptions;

use std::path::Path;

use linken_error::Result;

/// Link packages from `sources` into each project in `destinations`, or
/// remove them again when `options.unlink` is set.
pub fn run<S, D>(sources: &[S], destinations: &[D], options: LinkOptions) -> Result<LinkReport>
where
    S: AsRef<Path>,
    D: AsRef<Path>,
{
    LinkManager::new(options).run(sources, destinations)
}

pub fn link<S, D>(sources: &[S], destinations: &[D], options: LinkOptions) -> Result<LinkReport>
where
    S: AsRef<Path>,
    D: AsRef<Path>,
{
    run(sources, destinations, options.with_unlink(false))
}

pub fn unlink<S, D>(sources: &[S], destinations: &[D], options: LinkOptions) -> Result<LinkReport>
where
    S: AsRef<Path>,
    D: AsRef<Path>,
{
    run(sources, destinations, options.with_unlink(true))
}

pub fn list_links(project_dir: &Path) -> Result<Option<Vec<LinkEntry>>> {
    ListManager::list_links(project_dir)
}
