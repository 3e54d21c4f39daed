// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Report rendering and artifact emission.
//!
//! Two fixed-column markdown tables (general comparison and stress read)
//! plus a machine-readable JSON dump of the full run report. Everything is
//! rendered in memory first and written only after every backend has
//! completed, so artifacts are all-or-nothing.

use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::metrics::RunReport;
use crate::normalize::NormalizeContext;

/// General-schema comparison table artifact.
pub const GENERAL_TABLE_FILE: &str = "performance.md";
/// Stress-schema read-only table artifact.
pub const STRESS_TABLE_FILE: &str = "flat-read.md";
/// Machine-readable dump of the full run report.
pub const JSON_REPORT_FILE: &str = "results.json";

const NOT_AVAILABLE: &str = "N/A";

/// Writes the report artifacts into one output directory.
pub struct Reporter {
    output_dir: PathBuf,
}

impl Reporter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Render and write all artifacts. Returns the paths written, in
    /// artifact order.
    pub fn write(
        &self,
        report: &RunReport,
        ctx: &NormalizeContext,
    ) -> Result<Vec<PathBuf>, ReportError> {
        // Render everything before touching the filesystem.
        let general = render_general_table(report, ctx);
        let stress = render_stress_table(report, ctx);
        let json = serde_json::to_vec_pretty(report)?;

        fs::create_dir_all(&self.output_dir)?;
        let artifacts = [
            (GENERAL_TABLE_FILE, general.into_bytes()),
            (STRESS_TABLE_FILE, stress.into_bytes()),
            (JSON_REPORT_FILE, json),
        ];

        let mut paths = Vec::with_capacity(artifacts.len());
        for (filename, contents) in artifacts {
            let path = self.output_dir.join(filename);
            let mut file = fs::File::create(&path)?;
            file.write_all(&contents)?;
            paths.push(path);
        }
        Ok(paths)
    }
}

/// Render the general comparison table:
/// `| Library | Roundtrip (s) | Write (MB/s) | Read (MB/s) |`.
pub fn render_general_table(report: &RunReport, ctx: &NormalizeContext) -> String {
    let mut out = String::new();
    render_header(&mut out, "JSON codec performance", report, ctx);
    out.push_str("| Library | Roundtrip (s) | Write (MB/s) | Read (MB/s) |\n");
    out.push_str("| --- | --- | --- | --- |\n");
    for record in &report.backends {
        let roundtrip = record
            .text
            .roundtrip_s
            .map(|s| format!("{s:.2}"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let write = throughput_cell(ctx.document_throughput(
            record.text.bytes,
            record.text.write_s,
            record.iterations,
        ));
        let read = throughput_cell(ctx.document_throughput(
            record.text.bytes,
            record.text.read_s,
            record.iterations,
        ));
        let _ = writeln!(
            out,
            "| [{}]({}) | {} | {} | {} |",
            record.name, record.url, roundtrip, write, read
        );
    }
    out
}

/// Render the stress-schema read-only table: `| Library | Read (MB/s) |`.
pub fn render_stress_table(report: &RunReport, ctx: &NormalizeContext) -> String {
    let mut out = String::new();
    render_header(&mut out, "Flat stress schema, read", report, ctx);
    out.push_str("| Library | Read (MB/s) |\n");
    out.push_str("| --- | --- |\n");
    for record in &report.stress {
        let read = throughput_cell(ctx.flat_throughput(
            record.bytes,
            record.read_s,
            record.iterations,
        ));
        let _ = writeln!(out, "| [{}]({}) | {} |", record.name, record.url, read);
    }
    out
}

fn render_header(out: &mut String, title: &str, report: &RunReport, ctx: &NormalizeContext) {
    let _ = writeln!(out, "# {title}");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Generated {} on {} ({} cores).",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        report.system_info.cpu_model,
        report.system_info.cpu_cores
    );
    let _ = writeln!(
        out,
        "Iterations: {} (stress: {}). Throughput basis: {}.",
        report.iterations,
        report.stress_iterations,
        ctx.basis()
    );
    let _ = writeln!(out);
}

/// Throughput is truncated to an integer MB/s; a missing metric renders as
/// `N/A`, never as zero.
fn throughput_cell(mbps: Option<f64>) -> String {
    match mbps {
        Some(value) => format!("{}", value as u64),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{BackendRecord, StressRecord};
    use crate::normalize::Basis;
    use tempfile::TempDir;

    fn complete_record(name: &str, roundtrip_s: f64) -> BackendRecord {
        let mut record = BackendRecord::new(name, "https://example.invalid", 1000);
        record.text.bytes = Some(600);
        record.text.read_s = Some(0.5);
        record.text.write_s = Some(0.25);
        record.text.roundtrip_s = Some(roundtrip_s);
        record
    }

    fn report_with(records: Vec<BackendRecord>) -> RunReport {
        let mut report = RunReport::new(Basis::SharedMinified, 1000, 100);
        for record in records {
            report.push(record);
        }
        report
    }

    fn data_rows(table: &str) -> Vec<&str> {
        table
            .lines()
            .filter(|line| line.starts_with("| ["))
            .collect()
    }

    #[test]
    fn test_general_table_shape_and_order() {
        let report = report_with(vec![
            complete_record("alpha", 1.0),
            complete_record("beta", 2.0),
            complete_record("gamma", 3.0),
        ]);
        let ctx = NormalizeContext::new(Basis::SharedMinified, 600, 600);
        let table = render_general_table(&report, &ctx);

        let rows = data_rows(&table);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("[alpha]"));
        assert!(rows[1].contains("[beta]"));
        assert!(rows[2].contains("[gamma]"));
        assert!(table.contains("| Library | Roundtrip (s) | Write (MB/s) | Read (MB/s) |"));
    }

    #[test]
    fn test_roundtrip_rounds_to_two_decimals_and_throughput_truncates() {
        let mut record = complete_record("alpha", 1.2345);
        // 1000 iterations * 600 bytes / (0.5 s * 1048576) = 1.144... MB/s
        record.text.read_s = Some(0.5);
        let report = report_with(vec![record]);
        let ctx = NormalizeContext::new(Basis::SharedMinified, 600, 600);
        let table = render_general_table(&report, &ctx);

        let rows = data_rows(&table);
        assert!(rows[0].contains("| 1.23 |"));
        assert!(rows[0].ends_with("| 1 |"));
    }

    #[test]
    fn test_missing_metrics_render_as_na() {
        let mut record = BackendRecord::new("hobbled", "https://example.invalid", 1000);
        record.text.write_s = Some(0.25);
        record.text.bytes = Some(600);
        let report = report_with(vec![record]);
        let ctx = NormalizeContext::new(Basis::SharedMinified, 600, 600);
        let table = render_general_table(&report, &ctx);

        let rows = data_rows(&table);
        // Roundtrip and read were not measured.
        assert!(rows[0].starts_with("| [hobbled](https://example.invalid) | N/A |"));
        assert!(rows[0].ends_with("| N/A |"));
        assert!(!rows[0].contains("| 0 |"));
    }

    #[test]
    fn test_stress_table_shape() {
        let mut report = RunReport::new(Basis::SharedMinified, 1000, 100);
        let mut record = StressRecord::new("alpha", "https://example.invalid", 100);
        record.bytes = Some(1_048_576);
        record.read_s = Some(1.0);
        report.push_stress(record);
        report.push_stress(StressRecord::new("beta", "https://example.invalid", 100));

        let ctx = NormalizeContext::new(Basis::SharedMinified, 600, 1_048_576);
        let table = render_stress_table(&report, &ctx);
        let rows = data_rows(&table);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].ends_with("| 100 |"));
        assert!(rows[1].ends_with("| N/A |"));
    }

    #[test]
    fn test_artifacts_written_after_completion() {
        let dir = TempDir::new().unwrap();
        let report = report_with(vec![complete_record("alpha", 1.0)]);
        let ctx = NormalizeContext::new(Basis::SharedMinified, 600, 600);

        let reporter = Reporter::new(dir.path());
        let paths = reporter.write(&report, &ctx).unwrap();
        assert_eq!(paths.len(), 3);
        for path in &paths {
            assert!(path.exists());
        }

        let json = fs::read_to_string(dir.path().join(JSON_REPORT_FILE)).unwrap();
        let reread: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(reread.backends.len(), 1);
    }

    #[test]
    fn test_header_records_basis() {
        let report = report_with(vec![]);
        let ctx = NormalizeContext::new(Basis::OwnLength, 600, 600);
        let table = render_general_table(&report, &ctx);
        assert!(table.contains("own-length"));
    }
}
