//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use zipstage_core::ListedEntry;
use zipstage_core::PackReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_pack_result(&self, report: &PackReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let headline = format!("Archive saved to '{}'", report.output_path.display());
        if self.use_colors {
            self.line(&format!("{} {headline}", style("✓").green().bold()));
        } else {
            self.line(&headline);
        }

        self.line(&format!("  Files added:      {}", report.files_added));
        self.line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));
        self.line(&format!(
            "  Archive size:     {}",
            Self::format_size(report.archive_size)
        ));

        if report.skipped_output() {
            self.line("  Skipped the output archive found among the sources");
        }

        if self.verbose {
            self.line(&format!("  Duration:         {:?}", report.duration));
            self.line("");
            for entry in &report.entries {
                self.line(&format!("  {entry}"));
            }
        }

        Ok(())
    }

    fn format_listing(&self, entries: &[ListedEntry], long: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in entries {
            if long {
                self.line(&format!(
                    "{:>10} {:>10}  {}",
                    Self::format_size(entry.size),
                    Self::format_size(entry.compressed_size),
                    entry.name
                ));
            } else {
                self.line(&entry.name);
            }
        }

        if long {
            let total: u64 = entries.iter().map(|e| e.size).sum();
            self.line("");
            self.line(&format!(
                "Total: {} files, {}",
                entries.len(),
                Self::format_size(total)
            ));
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}
