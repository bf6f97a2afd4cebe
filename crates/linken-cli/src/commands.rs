use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use linken_constants::{BIN_NAME, DESCRIPTION, PATH_LIST_SEPARATOR, SRC_ENV, VERSION};

#[derive(Parser, Debug)]
#[command(name = BIN_NAME)]
#[command(version = VERSION)]
#[command(propagate_version = true)]
#[command(about = DESCRIPTION, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Enable debug mode for verbose output
    #[arg(long, global = true)]
    pub debug: bool,
    /// Only print errors
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Links packages found under the source paths into each project
    #[command(alias = "ln")]
    Link(LinkArgs),
    /// Removes links to packages found under the source paths
    #[command(aliases = ["un", "rm"])]
    Unlink(LinkArgs),
    /// Lists the links each project currently has
    #[command(alias = "ls")]
    List {
        /// Project directories to inspect
        #[arg(default_value = ".")]
        dests: Vec<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Project directories containing a package.json
    #[arg(default_value = ".")]
    pub dests: Vec<PathBuf>,
    /// Directory whose subdirectories are package checkouts (repeatable)
    #[arg(
        short = 's',
        long = "src",
        env = SRC_ENV,
        value_delimiter = PATH_LIST_SEPARATOR,
        required = true
    )]
    pub sources: Vec<PathBuf>,
}
