//src/best_call.rs

use crate::rank::Rank;
use crate::types::{AsvBestCall, RankVote};

/// How the best call is picked among ranks that clear the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallPolicy {
    /// Scan kingdom -> species and keep the first rank that qualifies.
    /// A finer rank never replaces it, even with a higher score.
    #[default]
    FirstQualifying,
    /// Scan species -> kingdom: the finest qualifying rank wins.
    FinestQualifying,
}

/// Picks the best call from the seven rank votes of one ASV.
/// Returns `None` if no rank reaches `threshold`.
pub fn select_best_call(
    votes: &[RankVote; Rank::COUNT],
    threshold: f64,
    policy: CallPolicy,
) -> Option<AsvBestCall> {
    let qualifies = |vote: &&RankVote| vote.score() >= threshold;

    let winner = match policy {
        CallPolicy::FirstQualifying => votes.iter().find(qualifies),
        CallPolicy::FinestQualifying => votes.iter().rev().find(qualifies),
    };

    winner.map(AsvBestCall::from)
}
