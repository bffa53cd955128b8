//src/hits.rs

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{Result, SintaxError};
use crate::types::HitRecord;

/// Reads a headerless SINTAX hit table:
/// ```text
/// <asv>\t<reference>\t<num_hits>\t<iteration>
/// ```
/// Files ending in `.gz` are decompressed on the fly.
pub fn read_hit_records<P: AsRef<Path>>(path: P) -> Result<Vec<HitRecord>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(SintaxError::MissingInput(path.to_path_buf()));
    }

    let f = File::open(path).map_err(|e| {
        log::debug!("cannot open {}: {e}", path.display());
        SintaxError::MissingInput(path.to_path_buf())
    })?;
    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };

    let records = parse_hit_records(reader)?;
    log::info!("Read {} hit records from {}", records.len(), path.display());
    Ok(records)
}

/// Parses hit records from any buffered reader. Blank lines are skipped.
pub fn parse_hit_records<R: BufRead>(reader: R) -> Result<Vec<HitRecord>> {
    let mut records = Vec::new();

    for (i, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| match e.kind() {
            ErrorKind::InvalidData => SintaxError::MalformedRow {
                line: i + 1,
                reason: e.to_string(),
            },
            _ => SintaxError::Io(e),
        })?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_hit_line(line, i + 1)?);
    }

    Ok(records)
}

fn parse_hit_line(line: &str, line_no: usize) -> Result<HitRecord> {
    let malformed = |reason: String| SintaxError::MalformedRow { line: line_no, reason };

    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 4 {
        return Err(malformed(format!("expected 4 tab-separated columns, found {}", parts.len())));
    }
    if parts.len() > 4 {
        log::debug!("line {line_no}: ignoring {} extra column(s)", parts.len() - 4);
    }

    let parse_int = |name: &str, value: &str| {
        value
            .trim()
            .parse::<u64>()
            .map_err(|_| malformed(format!("{name} '{value}' is not a non-negative integer")))
    };

    Ok(HitRecord {
        asv_id: parts[0].trim().to_string(),
        reference_annotation: parts[1].trim().to_string(),
        hit_count: parse_int("num_hits", parts[2])?,
        iteration: parse_int("iteration", parts[3])?,
    })
}
