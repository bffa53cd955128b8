//src/output.rs

use std::fmt::Write as FmtWrite;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{Result, SintaxError};
use crate::types::{AsvFullResult, ClassificationReport};

pub const FULL_RESULT_FILE: &str = "result_full.tsv";
pub const REPORT_FILE: &str = "result.json";

/// Where `write_outputs` put its files.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub full_table: PathBuf,
    pub report: PathBuf,
}

/// `asv\tscores` table, one row per ASV.
pub fn render_full_table(full_results: &[AsvFullResult]) -> String {
    let mut output = String::new();
    output.push_str("asv\tscores\n");
    for full in full_results {
        // Writing into a String cannot fail
        let _ = writeln!(output, "{}\t{}", full.asv_id, full.scores_string());
    }
    output
}

/// `{"result": {...}}` with 4-space indentation.
pub fn render_report_json(report: &ClassificationReport) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    report.serialize(&mut ser)?;
    String::from_utf8(buf)
        .map_err(|e| SintaxError::Io(std::io::Error::new(ErrorKind::InvalidData, e)))
}

/// Writes `result_full.tsv` and `result.json` into `outdir`, creating it if needed.
pub fn write_outputs<P: AsRef<Path>>(
    full_results: &[AsvFullResult],
    report: &ClassificationReport,
    outdir: P,
) -> Result<OutputPaths> {
    let outdir = outdir.as_ref();
    fs::create_dir_all(outdir)?;

    let paths = OutputPaths {
        full_table: outdir.join(FULL_RESULT_FILE),
        report: outdir.join(REPORT_FILE),
    };

    // Render both before touching the disk
    let table = render_full_table(full_results);
    let json = render_report_json(report)?;

    fs::write(&paths.full_table, table)?;
    fs::write(&paths.report, json)?;

    log::info!(
        "Wrote {} and {}",
        paths.full_table.display(),
        paths.report.display()
    );
    Ok(paths)
}
