//! Human-readable summary printed after a successful run.

use std::fmt;
use std::path::PathBuf;

use bulk_loader_shared::IngestionReport;

/// A completed run, ready to print.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input_file: PathBuf,
    pub host: String,
    pub report: IngestionReport,
}

impl RunSummary {
    pub fn new(input_file: impl Into<PathBuf>, host: impl Into<String>, report: IngestionReport) -> Self {
        Self {
            input_file: input_file.into(),
            host: host.into(),
            report,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = &self.report;
        let operations: Vec<&str> = report.operations.iter().map(String::as_str).collect();

        writeln!(f, "File:          {}", self.input_file.display())?;
        writeln!(f, "Host:          {}", self.host)?;
        writeln!(f, "Index:         {}", report.index)?;
        writeln!(f, "Started:       {}", report.started_at.to_rfc3339())?;
        writeln!(f, "Elapsed:       {:.3}s", report.elapsed.as_secs_f64())?;
        writeln!(f, "Docs found:    {}", report.processed)?;
        writeln!(
            f,
            "Docs loaded:   {} ({:.1}%)",
            report.succeeded,
            report.success_rate() * 100.0
        )?;
        writeln!(f, "Docs failed:   {}", report.failed())?;
        if !report.refreshed {
            writeln!(f, "Refresh:       failed")?;
        }
        write!(f, "Operations:    {}", operations.join(", "))
    }
}
