//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zipstage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Package application sources into a zip archive
    Pack(PackArgs),
    /// List the entries of an existing archive
    List(ListArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct PackArgs {
    /// Files or directories to package, relative to the source directory
    #[arg(value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// TOML file with build settings (default: zipstage.toml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory the build runs in (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,

    /// Application directory, relative to the working directory
    #[arg(short = 's', long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Archive file name, written inside the source directory
    #[arg(short, long, value_name = "NAME")]
    pub output_name: Option<String>,

    /// Path to leave out, relative to each source (can be repeated)
    #[arg(short = 'i', long = "ignore", value_name = "PATH")]
    pub ignore: Vec<String>,

    /// Overwrite the archive if it already exists
    #[arg(short = 'f', long)]
    pub overwrite: bool,

    /// Put only the source directory's contents at the archive root
    #[arg(long)]
    pub collapse_top_level_folder: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show entry sizes
    #[arg(short, long)]
    pub long: bool,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
