//! Working set of scored advisor–candidate pairs.
//!
//! The pool starts with one entry per (advisor, candidate) pair and only
//! ever shrinks: committing a candidate removes all of its entries, and
//! filling an advisor removes all of that advisor's entries.
//!
//! # Layout
//!
//! Entries are generated in build order (advisors by ID, candidates by ID
//! within each advisor) and then stably ranked by descending score, so
//! entries with equal scores keep their build order. Removal marks entries
//! dead through per-advisor and per-candidate position lists and advances a
//! head cursor past dead entries; the best-score tier is always the live
//! prefix starting at the head.
//!
//! # Complexity
//! Build: O(a·c·log(a·c)). `remove_candidate`: O(a). `remove_advisor`: O(c).
//! `best_ties`: O(tier size + dead entries inside the tier).

use crate::models::{CandidateMatch, MatchProblem};
use crate::scoring::CompatibilityScorer;

/// One scored pair in the pool.
///
/// `advisor` and `candidate` index into [`MatchProblem::advisors`] and
/// [`MatchProblem::candidates`].
#[derive(Debug, Clone, PartialEq)]
pub struct PoolEntry {
    /// Advisor position.
    pub advisor: usize,
    /// Candidate position.
    pub candidate: usize,
    /// Position in build order.
    pub seq: usize,
    /// Compatibility score.
    pub score: f64,
    /// Score justification.
    pub reasons: Vec<String>,
}

/// Live candidate pairs for one trial.
#[derive(Debug, Clone)]
pub struct CandidatePool<'p> {
    problem: &'p MatchProblem,
    entries: Vec<PoolEntry>,
    live: Vec<bool>,
    by_advisor: Vec<Vec<usize>>,
    by_candidate: Vec<Vec<usize>>,
    live_count: usize,
    head: usize,
}

impl<'p> CandidatePool<'p> {
    /// Scores every (advisor, candidate) pair of `problem`.
    ///
    /// Advisors whose program is missing from the lookup are scored as
    /// uncategorized. The miss itself is reported once, by
    /// [`MatchProblem::diagnostics`].
    pub fn build(problem: &'p MatchProblem, scorer: &CompatibilityScorer) -> Self {
        let advisors = problem.advisors();
        let candidates = problem.candidates();
        let mut entries = Vec::with_capacity(advisors.len() * candidates.len());

        for (a, advisor) in advisors.iter().enumerate() {
            for (c, candidate) in candidates.iter().enumerate() {
                let compat = scorer.score_lenient(advisor, candidate, problem.catalog());
                let seq = entries.len();
                entries.push(PoolEntry {
                    advisor: a,
                    candidate: c,
                    seq,
                    score: compat.score,
                    reasons: compat.reasons,
                });
            }
        }

        // Stable sort keeps build order among equal scores.
        entries.sort_by(|x, y| y.score.total_cmp(&x.score));

        let mut by_advisor = vec![Vec::new(); advisors.len()];
        let mut by_candidate = vec![Vec::new(); candidates.len()];
        for (pos, e) in entries.iter().enumerate() {
            by_advisor[e.advisor].push(pos);
            by_candidate[e.candidate].push(pos);
        }

        let live_count = entries.len();
        Self {
            problem,
            live: vec![true; live_count],
            entries,
            by_advisor,
            by_candidate,
            live_count,
            head: 0,
        }
    }

    /// The problem this pool was built from.
    pub fn problem(&self) -> &'p MatchProblem {
        self.problem
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Whether no live entries remain.
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Live entries, best score first.
    pub fn iter(&self) -> impl Iterator<Item = &PoolEntry> + '_ {
        self.entries
            .iter()
            .zip(&self.live)
            .filter(|(_, live)| **live)
            .map(|(e, _)| e)
    }

    /// Live entries in build order.
    pub fn in_build_order(&self) -> Vec<&PoolEntry> {
        let mut entries: Vec<&PoolEntry> = self.iter().collect();
        entries.sort_by_key(|e| e.seq);
        entries
    }

    /// Entry at a pool position.
    pub fn entry(&self, pos: usize) -> &PoolEntry {
        &self.entries[pos]
    }

    /// Whether a pair is still in the pool.
    pub fn contains(&self, advisor: usize, candidate: usize) -> bool {
        self.by_candidate
            .get(candidate)
            .is_some_and(|positions| {
                positions
                    .iter()
                    .any(|&pos| self.live[pos] && self.entries[pos].advisor == advisor)
            })
    }

    /// Highest live score.
    pub fn max_score(&self) -> Option<f64> {
        self.entries.get(self.head).map(|e| e.score)
    }

    /// Positions of all live entries sharing the highest score, in build
    /// order.
    pub fn best_ties(&self) -> Vec<usize> {
        let Some(max) = self.max_score() else {
            return Vec::new();
        };
        (self.head..self.entries.len())
            .filter(|&pos| self.live[pos])
            .take_while(|&pos| self.entries[pos].score == max)
            .collect()
    }

    /// Materializes the entry at `pos` as a match.
    pub fn to_match(&self, pos: usize) -> CandidateMatch<'p> {
        let e = &self.entries[pos];
        CandidateMatch::new(
            &self.problem.advisors()[e.advisor],
            &self.problem.candidates()[e.candidate],
            e.score,
            e.reasons.clone(),
        )
    }

    /// Drops every entry for a candidate. Returns the number removed.
    pub fn remove_candidate(&mut self, candidate: usize) -> usize {
        let positions = self
            .by_candidate
            .get_mut(candidate)
            .map(std::mem::take)
            .unwrap_or_default();
        self.retire(&positions)
    }

    /// Drops every entry for an advisor. Returns the number removed.
    pub fn remove_advisor(&mut self, advisor: usize) -> usize {
        let positions = self
            .by_advisor
            .get_mut(advisor)
            .map(std::mem::take)
            .unwrap_or_default();
        self.retire(&positions)
    }

    fn retire(&mut self, positions: &[usize]) -> usize {
        let mut removed = 0;
        for &pos in positions {
            if self.live[pos] {
                self.live[pos] = false;
                removed += 1;
            }
        }
        self.live_count -= removed;
        while self.head < self.live.len() && !self.live[self.head] {
            self.head += 1;
        }
        removed
    }
}
