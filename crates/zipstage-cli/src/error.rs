//! Error conversion utilities for CLI.
//!
//! Converts zipstage-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use zipstage_core::PackError;

/// Converts `PackError` to user-friendly anyhow error with context
pub fn convert_pack_error(err: PackError) -> anyhow::Error {
    match err {
        PackError::SourceNotFound { path } => {
            anyhow!(
                "Source not found: {}\n\
                 HINT: Sources are resolved relative to the source directory (--source-dir).",
                path.display()
            )
        }
        PackError::Traversal { path, source } => {
            anyhow!(
                "Cannot read '{}' while expanding sources: {}\n\
                 HINT: Check permissions, or add the path to --ignore.",
                path.display(),
                source
            )
        }
        PackError::OutsideBasePath { path, base } => {
            anyhow!(
                "File '{}' is not inside '{}' and cannot be named in the archive\n\
                 HINT: Sources must live under the source directory.",
                path.display(),
                base.display()
            )
        }
        PackError::OutputExists { path } => {
            anyhow!(
                "Output file already exists: {}\n\
                 HINT: Use --overwrite (or overwrite_existing = true) to replace it.",
                path.display()
            )
        }
        PackError::InvalidConfig(reason) => anyhow!("Invalid configuration: {reason}"),
        _ => anyhow::Error::from(err).context("Archive build failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_output_exists() {
        let err = PackError::OutputExists {
            path: PathBuf::from("/srv/app/app.zip"),
        };
        let msg = format!("{:?}", convert_pack_error(err));
        assert!(msg.contains("already exists"));
        assert!(msg.contains("--overwrite"));
    }

    #[test]
    fn test_convert_source_not_found() {
        let err = PackError::SourceNotFound {
            path: PathBuf::from("/srv/app/missing"),
        };
        let msg = format!("{:?}", convert_pack_error(err));
        assert!(msg.contains("/srv/app/missing"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_io_error_keeps_cause() {
        let err = PackError::Io(io::Error::new(io::ErrorKind::StorageFull, "disk full"));
        let msg = format!("{:?}", convert_pack_error(err));
        assert!(msg.contains("Archive build failed"));
        assert!(msg.contains("disk full"));
    }
}
