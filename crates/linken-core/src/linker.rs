use std::path::{Path, PathBuf};
use std::{fs, io};

use linken_constants::LINK_DIR;
use linken_error::{LinkenError, Result};

use crate::links::LinkSelection;
use crate::options::LinkOptions;

pub struct PackageLinker;

impl PackageLinker {
    /// Make `dest/node_modules` reflect `selection`.
    ///
    /// Whatever sits at each selected name is removed first, so running this
    /// twice leaves the same result. In unlink mode nothing is recreated.
    /// Returns how many entries were linked or unlinked.
    pub fn reconcile(
        dest: &Path,
        selection: &LinkSelection,
        options: &LinkOptions,
    ) -> Result<usize> {
        let count = selection.len();
        let action = if options.unlink { "unlink" } else { "link" };

        if count > 0 || options.debug {
            let dest_name = dest
                .file_name()
                .map_or_else(|| dest.display().to_string(), |n| n.to_string_lossy().into_owned());
            options.log.info(&format!(
                "{dest_name}: {action}ing {count} module{}",
                if count == 1 { "" } else { "s" }
            ));
        }

        if count == 0 {
            return Ok(0);
        }

        let link_dir = dest.join(LINK_DIR);
        fs::create_dir_all(&link_dir).map_err(|e| LinkenError::io(&link_dir, e))?;

        for link in selection.iter() {
            options.debug(&format!(
                "* {}@{} ({})",
                link.name,
                link.version,
                link.path.display()
            ));

            let target = Self::get_package_destination(&link_dir, &link.name);
            let linked = Self::remove_existing_package(&target).and_then(|()| {
                if options.unlink {
                    return Ok(());
                }
                Self::ensure_parent_directory_exists(&target)?;
                Self::create_symlink(&link.path, &target)
            });

            linked.map_err(|source| LinkenError::LinkingFailed {
                action,
                name: link.name.clone(),
                dest: dest.to_path_buf(),
                source,
            })?;
        }

        Ok(count)
    }

    pub(crate) fn get_package_destination(link_dir: &Path, package_name: &str) -> PathBuf {
        match package_name
            .strip_prefix('@')
            .and_then(|scoped| scoped.split_once('/'))
        {
            // @types/node -> node_modules/@types/node
            Some((scope, name)) => link_dir.join(format!("@{scope}")).join(name),
            None => link_dir.join(package_name),
        }
    }

    fn ensure_parent_directory_exists(dest: &Path) -> io::Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Remove a file, directory tree or link at `dest`. Links are removed
    /// themselves and never followed.
    fn remove_existing_package(dest: &Path) -> io::Result<()> {
        let metadata = match fs::symlink_metadata(dest) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };

        if metadata.is_dir() {
            fs::remove_dir_all(dest)
        } else if metadata.file_type().is_symlink() {
            Self::remove_symlink(dest)
        } else {
            fs::remove_file(dest)
        }
    }

    fn remove_symlink(dest: &Path) -> io::Result<()> {
        #[cfg(target_family = "windows")]
        if fs::remove_dir(dest).is_ok() {
            return Ok(());
        }

        fs::remove_file(dest)
    }

    fn create_symlink(source: &Path, dest: &Path) -> io::Result<()> {
        #[cfg(target_family = "unix")]
        std::os::unix::fs::symlink(source, dest)?;

        #[cfg(target_family = "windows")]
        std::os::windows::fs::symlink_dir(source, dest)?;

        Ok(())
    }
}
