use std::fs;
use std::path::{Path, PathBuf};

use linken_constants::LINK_DIR;
use linken_error::{LinkenError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    /// Package name, including the scope for scoped packages.
    pub name: String,
    /// Where the link resolves to; the raw link text if it dangles.
    pub target: PathBuf,
}

pub struct ListManager;

impl ListManager {
    /// The symbolic links currently in `project_dir`'s link directory, sorted
    /// by name. `None` when the link directory does not exist at all, which is
    /// different from existing but holding no links.
    pub fn list_links(project_dir: &Path) -> Result<Option<Vec<LinkEntry>>> {
        let link_dir = project_dir.join(LINK_DIR);
        if !link_dir.is_dir() {
            return Ok(None);
        }

        let mut links = Vec::new();
        Self::collect(&link_dir, None, &mut links)?;
        links.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Some(links))
    }

    fn collect(dir: &Path, scope: Option<&str>, links: &mut Vec<LinkEntry>) -> Result<()> {
        let entries = fs::read_dir(dir).map_err(|e| LinkenError::io(dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| LinkenError::io(dir, e))?;
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type().map_err(|e| LinkenError::io(&path, e))?;

            if file_type.is_symlink() {
                let target = fs::canonicalize(&path)
                    .or_else(|_| fs::read_link(&path))
                    .map_err(|e| LinkenError::io(&path, e))?;
                let name = match scope {
                    Some(scope) => format!("{scope}/{file_name}"),
                    None => file_name,
                };
                links.push(LinkEntry { name, target });
            } else if file_type.is_dir() && scope.is_none() && file_name.starts_with('@') {
                Self::collect(&path, Some(&file_name), links)?;
            }
        }

        Ok(())
    }
}
