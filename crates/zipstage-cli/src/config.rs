//! Build settings file.
//!
//! Settings come from an optional TOML file and are overridden by command
//! line flags. The merged result is turned into a `PackRequest` and
//! validated once.

use crate::cli::PackArgs;
use crate::error::convert_pack_error;
use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use zipstage_core::PackRequest;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "zipstage.toml";

/// Contents of a settings file.
///
/// ```toml
/// source_dir = "app"
/// sources = ["."]
/// output_name = "webapp.zip"
/// overwrite_existing = true
/// ignore = ["node_modules", "src/docs/README.md"]
/// collapse_top_level_folder = true
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub source_dir: Option<PathBuf>,
    pub sources: Vec<String>,
    pub output_name: Option<String>,
    pub overwrite_existing: bool,
    pub ignore: Vec<String>,
    pub collapse_top_level_folder: bool,
}

impl FileConfig {
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content)
            .with_context(|| format!("invalid config file: {}", origin.display()))
    }
}

/// Loads the explicit config file, or the default one if it exists.
///
/// A missing explicit file is an error; a missing default file is not.
pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<FileConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = working_dir.join(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "no config file found");
                return Ok(FileConfig::default());
            }
            candidate
        }
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed reading config file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config file");
    FileConfig::parse(&content, &path)
}

/// Merges flags over file settings into a validated request.
///
/// Lists given on the command line replace the file's lists; boolean
/// flags can only switch a setting on.
pub fn build_request(args: &PackArgs, file: FileConfig, working_dir: &Path) -> Result<PackRequest> {
    let sources = if args.sources.is_empty() {
        file.sources
    } else {
        args.sources.clone()
    };
    let ignore = if args.ignore.is_empty() {
        file.ignore
    } else {
        args.ignore.clone()
    };
    let output_name = args
        .output_name
        .clone()
        .or(file.output_name)
        .unwrap_or_default();
    let source_dir = args
        .source_dir
        .clone()
        .or(file.source_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let request = PackRequest::new(output_name)
        .with_working_dir(working_dir)
        .with_source_dir(source_dir)
        .with_sources(sources)
        .with_ignore(ignore)
        .with_overwrite_existing(args.overwrite || file.overwrite_existing)
        .with_collapse_top_level_folder(
            args.collapse_top_level_folder || file.collapse_top_level_folder,
        );

    request.validate().map_err(convert_pack_error)?;
    Ok(request)
}
