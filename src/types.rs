//src/types.rs

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::rank::Rank;

/// One row of the SINTAX hit table.
///   asv  reference  num_hits  iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRecord {
    pub asv_id: String,
    pub reference_annotation: String,
    pub hit_count: u64,
    pub iteration: u64,
}

/// The plurality label at one rank for one ASV.
#[derive(Debug, Clone, PartialEq)]
pub struct RankVote {
    pub rank: Rank,
    pub label: String,
    /// Records carrying `label` at this rank
    pub count: usize,
    /// All records of the ASV
    pub total: usize,
}

impl RankVote {
    /// Share of the ASV's records that voted for the winning label.
    pub fn score(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count as f64 / self.total as f64
        }
    }
}

impl fmt::Display for RankVote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.label, format_score(self.score()))
    }
}

/// All seven rank votes of one ASV, kingdom -> species.
#[derive(Debug, Clone, PartialEq)]
pub struct AsvFullResult {
    pub asv_id: String,
    pub votes: [RankVote; Rank::COUNT],
}

impl AsvFullResult {
    pub fn vote(&self, rank: Rank) -> &RankVote {
        &self.votes[rank.index()]
    }

    /// `label(score)|label(score)|...` in rank order.
    pub fn scores_string(&self) -> String {
        self.votes
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// The rank an ASV is finally called at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsvBestCall {
    pub level: Rank,
    pub tax_name: String,
    pub score: f64,
}

impl From<&RankVote> for AsvBestCall {
    fn from(vote: &RankVote) -> Self {
        Self {
            level: vote.rank,
            tax_name: vote.label.clone(),
            score: vote.score(),
        }
    }
}

/// ASV id -> best call. Only ASVs that cleared the threshold are present.
/// Serializes as `{"result": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub result: BTreeMap<String, AsvBestCall>,
}

impl ClassificationReport {
    pub fn get(&self, asv_id: &str) -> Option<&AsvBestCall> {
        self.result.get(asv_id)
    }

    pub fn len(&self) -> usize {
        self.result.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

/// Shortest round-trip form that always keeps a fractional part,
/// e.g. `1.0`, `0.5`, `0.6666666666666666`.
pub fn format_score(score: f64) -> String {
    format!("{score:?}")
}
