//src/vote.rs

use ahash::AHashMap;

use crate::lineage::{strip_rank_code, Lineage};
use crate::rank::Rank;
use crate::types::RankVote;

/// Label frequencies at one rank, remembering first-seen order for tie-breaks.
#[derive(Debug, Default, Clone)]
pub struct LabelCounts {
    /// label -> slot in `entries`
    index: AHashMap<String, usize>,
    /// (label, count) in the order labels were first seen
    entries: Vec<(String, usize)>,
}

impl LabelCounts {
    pub fn add(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), 1));
            }
        }
    }

    pub fn count(&self, label: &str) -> usize {
        self.index.get(label).map(|&slot| self.entries[slot].1).unwrap_or(0)
    }

    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Highest count wins; on equal counts the label seen first wins.
    /// Same as a stable sort by count descending, taking the head.
    pub fn plurality(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (label, count) in &self.entries {
            if best.map_or(true, |(_, best_count)| *count > best_count) {
                best = Some((label.as_str(), *count));
            }
        }
        best
    }
}

/// Per-ASV accumulator: one `LabelCounts` per rank plus the record total.
#[derive(Debug, Default, Clone)]
pub struct AsvTally {
    total: usize,
    ranks: [LabelCounts; Rank::COUNT],
}

impl AsvTally {
    /// Counts one hit record. Rank codes are stripped before counting.
    pub fn add(&mut self, lineage: &Lineage) {
        self.total += 1;
        for (counts, label) in self.ranks.iter_mut().zip(lineage.fields()) {
            counts.add(strip_rank_code(label));
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn counts(&self, rank: Rank) -> &LabelCounts {
        &self.ranks[rank.index()]
    }

    /// Plurality vote at a single rank. One record is one vote; `hit_count`
    /// is not used as a weight.
    pub fn vote(&self, rank: Rank) -> RankVote {
        let (label, count) = self.counts(rank).plurality().unwrap_or(("", 0));
        RankVote {
            rank,
            label: label.to_string(),
            count,
            total: self.total,
        }
    }

    /// Votes for all ranks, kingdom -> species.
    pub fn votes(&self) -> [RankVote; Rank::COUNT] {
        Rank::ALL.map(|rank| self.vote(rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineage::extract_lineage;

    fn lineage(genus: &str, species: &str) -> Lineage {
        let annotation = format!("ref;tax=k:K,p:P,c:C,o:O,f:F,g:{genus},s:{species}");
        extract_lineage("A1", &annotation).unwrap()
    }

    fn tally(lineages: &[Lineage]) -> AsvTally {
        let mut tally = AsvTally::default();
        for l in lineages {
            tally.add(l);
        }
        tally
    }

    #[test]
    fn test_plurality_and_score() {
        let t = tally(&[lineage("Foo", "a"), lineage("Foo", "b"), lineage("Bar", "c")]);
        let genus = t.vote(Rank::Genus);
        assert_eq!(genus.label, "Foo");
        assert_eq!(genus.count, 2);
        assert_eq!(genus.total, 3);
        assert!((genus.score() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_unanimous_rank_scores_exactly_one() {
        let t = tally(&[lineage("Foo", "a"), lineage("Bar", "b")]);
        assert_eq!(t.vote(Rank::Family).score(), 1.0);
        assert_eq!(t.vote(Rank::Family).label, "F");
    }

    #[test]
    fn test_rank_code_is_stripped_before_counting() {
        let mut t = tally(&[lineage("Foo", "a")]);
        t.add(&extract_lineage("A1", "ref;tax=K,P,C,O,F,Foo,a").unwrap());
        assert_eq!(t.counts(Rank::Genus).count("Foo"), 2);
        assert_eq!(t.counts(Rank::Genus).distinct(), 1);
    }

    #[test]
    fn test_tie_goes_to_first_seen_label() {
        let t = tally(&[
            lineage("Bar", "x"),
            lineage("Foo", "y"),
            lineage("Foo", "x"),
            lineage("Bar", "y"),
        ]);
        assert_eq!(t.vote(Rank::Genus).label, "Bar");
        assert_eq!(t.vote(Rank::Species).label, "x");

        let t = tally(&[lineage("Foo", "y"), lineage("Bar", "x")]);
        assert_eq!(t.vote(Rank::Genus).label, "Foo");
        assert_eq!(t.vote(Rank::Species).label, "y");
    }

    #[test]
    fn test_later_label_wins_once_it_overtakes() {
        let t = tally(&[lineage("Bar", "x"), lineage("Foo", "x"), lineage("Foo", "x")]);
        assert_eq!(t.vote(Rank::Genus).label, "Foo");
    }

    #[test]
    fn test_label_shares_sum_to_one() {
        let t = tally(&[
            lineage("Foo", "a"),
            lineage("Bar", "a"),
            lineage("Baz", "a"),
            lineage("Foo", "a"),
            lineage("Qux", "a"),
        ]);
        let counts = t.counts(Rank::Genus);
        let sum: f64 = ["Foo", "Bar", "Baz", "Qux"]
            .iter()
            .map(|l| counts.count(l) as f64 / t.total() as f64)
            .sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_votes_cover_all_ranks_in_order() {
        let t = tally(&[lineage("Foo", "a")]);
        let votes = t.votes();
        for (vote, rank) in votes.iter().zip(Rank::ALL) {
            assert_eq!(vote.rank, rank);
        }
    }

    #[test]
    fn test_empty_tally_has_no_plurality() {
        let t = AsvTally::default();
        assert!(t.counts(Rank::Kingdom).plurality().is_none());
        let vote = t.vote(Rank::Kingdom);
        assert_eq!(vote.count, 0);
        assert_eq!(vote.score(), 0.0);
    }
}
