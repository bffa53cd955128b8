// src/lib.rs
pub mod best_call;
pub mod classify;
pub mod config;
pub mod error;
pub mod hits;
pub mod lineage;
pub mod output;
pub mod rank;
pub mod types;
pub mod vote;

use std::path::Path;

use crate::classify::classify_hits;
use crate::config::Config;
use crate::error::Result;
use crate::hits::read_hit_records;
use crate::output::{render_full_table, render_report_json, write_outputs, OutputPaths};
use crate::types::{AsvFullResult, ClassificationReport};

pub use crate::best_call::CallPolicy;
pub use crate::error::SintaxError;
pub use crate::rank::Rank;

/// Everything one aggregation run produces.
/// Text outputs are generated on demand from the structured data.
#[derive(Debug, Clone)]
pub struct ClassificationResults {
    /// Seven rank votes for every ASV, sorted by ASV id
    pub full_results: Vec<AsvFullResult>,

    /// Best calls for the ASVs that cleared the threshold
    pub report: ClassificationReport,
}

impl ClassificationResults {
    /// Generate `result_full.tsv` text on demand
    pub fn get_full_table(&self) -> String {
        render_full_table(&self.full_results)
    }

    /// Generate `result.json` text on demand
    pub fn get_report_json(&self) -> Result<String> {
        render_report_json(&self.report)
    }

    /// Write both outputs into `outdir`
    pub fn write_to<P: AsRef<Path>>(&self, outdir: P) -> Result<OutputPaths> {
        write_outputs(&self.full_results, &self.report, outdir)
    }
}

/// Read a SINTAX hit table and classify every ASV in it.
///
/// The configuration is validated before the input is touched.
pub fn classify_tsv<P: AsRef<Path>>(tsv_path: P, config: &Config) -> Result<ClassificationResults> {
    // 1. Validate settings
    config.validate()?;

    // 2. Load hit table
    let records = read_hit_records(tsv_path)?;

    // 3. Vote and select
    classify_hits(&records, config)
}
