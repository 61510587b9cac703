//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io;
use std::io::Write;
use zipstage_core::ListedEntry;
use zipstage_core::PackReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct PackOutput<'a> {
    output_path: String,
    files_added: usize,
    files_skipped: usize,
    bytes_written: u64,
    archive_size: u64,
    compression_ratio: f64,
    duration_ms: u128,
    entries: &'a [String],
}

#[derive(Serialize)]
struct ListOutput<'a> {
    name: &'a str,
    size: u64,
    compressed_size: u64,
}

impl OutputFormatter for JsonFormatter {
    fn format_pack_result(&self, report: &PackReport) -> Result<()> {
        let data = PackOutput {
            output_path: report.output_path.display().to_string(),
            files_added: report.files_added,
            files_skipped: report.files_skipped,
            bytes_written: report.bytes_written,
            archive_size: report.archive_size,
            compression_ratio: report.compression_ratio(),
            duration_ms: report.duration.as_millis(),
            entries: &report.entries,
        };

        Self::output(&JsonOutput::success("pack", data))
    }

    fn format_listing(&self, entries: &[ListedEntry], _long: bool) -> Result<()> {
        let data: Vec<ListOutput<'_>> = entries
            .iter()
            .map(|e| ListOutput {
                name: &e.name,
                size: e.size,
                compressed_size: e.compressed_size,
            })
            .collect();

        Self::output(&JsonOutput::success("list", data))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("unknown", format!("{error:?}"));
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_output_structure() {
        let entries = vec!["app/index.js".to_string()];
        let data = PackOutput {
            output_path: "/srv/app/app.zip".to_string(),
            files_added: 1,
            files_skipped: 0,
            bytes_written: 2,
            archive_size: 120,
            compression_ratio: 0.0,
            duration_ms: 3,
            entries: &entries,
        };

        let json = serde_json::to_value(JsonOutput::success("pack", data)).unwrap();

        assert_eq!(json["operation"], "pack");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["entries"][0], "app/index.js");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_error_output_structure() {
        let json = serde_json::to_value(JsonOutput::error("pack", "boom")).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "boom");
        assert!(json.get("data").is_none());
    }
}
