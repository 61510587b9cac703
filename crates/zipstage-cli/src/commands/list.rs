//! List command implementation

use crate::cli::ListArgs;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use zipstage_core::list_archive;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let entries = list_archive(&args.archive)
        .with_context(|| format!("failed to read archive '{}'", args.archive.display()))?;

    formatter.format_listing(&entries, args.long)
}
