pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Link local development copies of npm packages into the projects that use them";
pub const BIN_NAME: &str = "linken";

/// File that marks a directory as a package or a consumer project.
pub const MANIFEST_FILE: &str = "package.json";
/// Per-consumer directory that holds the created links.
pub const LINK_DIR: &str = "node_modules";

/// Environment variable that can supply `--src` paths.
pub const SRC_ENV: &str = "LINKEN_SRC";

pub const EXAMPLES: &[(&str, &str)] = &[
    (
        "linken link --src ..",
        "Link sibling checkouts into the current project",
    ),
    (
        "linken link app-a app-b --src ../libs --src ../vendor",
        "Link into several projects from several source paths",
    ),
    (
        "linken unlink --src ..",
        "Remove links previously created from the same sources",
    ),
    ("linken list app-a", "Show which links a project currently has"),
];

/// Separator for path lists given through the environment.
pub const PATH_LIST_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };
