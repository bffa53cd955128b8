//src/classify.rs

use ahash::AHashMap;
use rayon::prelude::*;

use crate::best_call::select_best_call;
use crate::config::Config;
use crate::error::Result;
use crate::lineage::extract_lineage;
use crate::rank::Rank;
use crate::types::{AsvBestCall, AsvFullResult, ClassificationReport, HitRecord};
use crate::vote::AsvTally;
use crate::ClassificationResults;

/// One pass over the hit table: parse each lineage and add it to its ASV's tally.
/// Fails on the first malformed lineage.
pub fn group_by_asv(records: &[HitRecord]) -> Result<AHashMap<String, AsvTally>> {
    let mut groups: AHashMap<String, AsvTally> = AHashMap::new();

    for record in records {
        let lineage = extract_lineage(&record.asv_id, &record.reference_annotation)?;
        groups.entry(record.asv_id.clone()).or_default().add(&lineage);
    }

    Ok(groups)
}

/// Votes every rank of one ASV and picks its best call.
pub fn classify_asv(
    asv_id: &str,
    tally: &AsvTally,
    config: &Config,
) -> (AsvFullResult, Option<AsvBestCall>) {
    let votes = tally.votes();
    let best = select_best_call(&votes, config.threshold, config.policy);
    let full = AsvFullResult {
        asv_id: asv_id.to_string(),
        votes,
    };
    (full, best)
}

/// Classifies all ASVs in `records`.
///
/// Output rows are sorted by ASV id, so results do not depend on hashing
/// or on how the work was split across threads.
pub fn classify_hits(records: &[HitRecord], config: &Config) -> Result<ClassificationResults> {
    config.validate()?;

    // 1. Group
    let groups = group_by_asv(records)?;
    let mut groups: Vec<(String, AsvTally)> = groups.into_iter().collect();
    groups.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    log::debug!("Grouped {} records into {} ASVs", records.len(), groups.len());

    // 2. Vote per ASV
    let classify_all = || -> Vec<(AsvFullResult, Option<AsvBestCall>)> {
        groups
            .par_iter()
            .map(|(asv, tally)| classify_asv(asv, tally, config))
            .collect()
    };
    let per_asv: Vec<(AsvFullResult, Option<AsvBestCall>)> = match config.threads {
        1 => groups
            .iter()
            .map(|(asv, tally)| classify_asv(asv, tally, config))
            .collect(),
        _ => match worker_pool(config.threads)? {
            Some(pool) => pool.install(classify_all),
            None => classify_all(),
        },
    };

    // 3. Assemble
    let mut full_results = Vec::with_capacity(per_asv.len());
    let mut report = ClassificationReport::default();
    for (full, best) in per_asv {
        if let Some(call) = best {
            report.result.insert(full.asv_id.clone(), call);
        }
        full_results.push(full);
    }

    log_summary(&full_results, &report);

    Ok(ClassificationResults {
        full_results,
        report,
    })
}

/// A dedicated pool only when a thread count above one is requested;
/// otherwise the global rayon pool is used.
fn worker_pool(threads: usize) -> Result<Option<rayon::ThreadPool>> {
    if threads <= 1 {
        return Ok(None);
    }
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    Ok(Some(pool))
}

fn log_summary(full_results: &[AsvFullResult], report: &ClassificationReport) {
    let mut per_rank = [0usize; Rank::COUNT];
    for call in report.result.values() {
        per_rank[call.level.index()] += 1;
    }

    log::info!(
        "Classified {} of {} ASVs above threshold",
        report.len(),
        full_results.len()
    );
    for rank in Rank::ALL {
        if per_rank[rank.index()] > 0 {
            log::info!("  {:<8} {}", rank.as_str(), per_rank[rank.index()]);
        }
    }
    let unclassified = full_results.len() - report.len();
    if unclassified > 0 {
        log::warn!("{unclassified} ASV(s) did not reach the threshold at any rank");
    }
}
