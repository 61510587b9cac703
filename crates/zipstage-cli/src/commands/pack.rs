//! Pack command implementation.

use crate::cli::PackArgs;
use crate::config;
use crate::error::convert_pack_error;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use std::env;
use zipstage_core::NoopProgress;
use zipstage_core::pack;

pub fn execute(
    args: &PackArgs,
    formatter: &dyn OutputFormatter,
    quiet: bool,
    json: bool,
) -> Result<()> {
    let working_dir = match &args.working_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let file = config::load(args.config.as_deref(), &working_dir)?;
    let request = config::build_request(args, file, &working_dir)?;

    tracing::debug!(?request, "pack request");

    // Use progress bar if TTY is detected (not quiet, not JSON, is terminal)
    let result = if !quiet && !json && CliProgress::should_show() {
        let mut progress = CliProgress::new("Creating archive");
        pack(&request, &mut progress)
    } else {
        pack(&request, &mut NoopProgress)
    };
    let report = result.map_err(convert_pack_error)?;

    formatter.format_pack_result(&report)
}
