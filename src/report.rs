/*!
 * Reporting functionality for codetxt
 *
 * Renders the run statistics as a console table using the tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::formatter::DigestStats;
use crate::scanner::ScanStatistics;
use crate::utils::{format_count, format_file_size};

/// Everything known about a finished run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Output destination, `-` for stdout
    pub output_file: String,
    /// Time taken to scan and format
    pub duration: Duration,
    pub scan: ScanStatistics,
    pub digest: DigestStats,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Metric")]
    key: String,

    #[tabled(rename = "Value")]
    value: String,
}

impl ReportRow {
    fn new(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &RunReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stderr, keeping stdout free for the digest
    pub fn print_report(&self, report: &RunReport) {
        eprintln!("\n{}", self.generate_report(report));
    }

    fn generate_console_report(&self, report: &RunReport) -> String {
        let scan = &report.scan;
        let mut rows = vec![
            ReportRow::new("Output File", report.output_file.clone()),
            ReportRow::new("Process Time", format!("{:.4?}", report.duration)),
            ReportRow::new("Files Analyzed", format_count(report.digest.files_analyzed)),
            ReportRow::new("Total Text Size", format_file_size(report.digest.text_size)),
            ReportRow::new(
                "Estimated Tokens",
                format!(
                    "~{} ({})",
                    format_count(report.digest.tokens),
                    report.digest.encoding
                ),
            ),
        ];

        let skipped = [
            ("Binary Files", scan.binary_files),
            ("Unreadable Files", scan.unreadable_files),
            ("Oversized Files", scan.oversized_files),
            ("Excluded Entries", scan.excluded_entries),
            ("Pruned Directories", scan.pruned_directories),
            ("Unsupported Entries", scan.unsupported_entries),
        ];
        // Only show counters that actually fired
        rows.extend(
            skipped
                .iter()
                .filter(|(_, count)| *count > 0)
                .map(|(key, count)| ReportRow::new(key, format_count(*count))),
        );

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        format!("INGESTION COMPLETE\n{}", table)
    }
}
