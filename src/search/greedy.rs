//! Greedy randomized assignment (one trial).
//!
//! # Algorithm
//!
//! 1. Prune advisors whose effective capacity is zero.
//! 2. Take every live pair sharing the highest score.
//! 3. Draw one of them uniformly from the random source.
//! 4. Commit it; drop the candidate's remaining pairs.
//! 5. If the advisor reached `min(capacity, max_new_advisees)`, drop the
//!    advisor's remaining pairs.
//! 6. Repeat until every candidate is matched (`Complete`) or the pool runs
//!    dry first (`Stuck`).
//!
//! Ties are broken randomly rather than by ID so that restarts explore
//! different, equally greedy assignments.
//!
//! # Complexity
//! O(c · (a + t)) steps after the pool build, where t is the size of the
//! best-score tier.

use rand::Rng;
use tracing::debug;

use super::pool::CandidatePool;
use crate::config::DEFAULT_MAX_NEW_ADVISEES;
use crate::error::{MatchError, Result};
use crate::models::{Assignment, Candidate, MatchProblem};
use crate::scoring::CompatibilityScorer;

/// Progress of a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialState {
    /// Candidates remain and the pool still has pairs.
    Searching,
    /// Candidates remain but the pool is empty.
    Stuck,
    /// Every candidate is matched.
    Complete,
}

/// Mutable state of one greedy trial.
///
/// Owns its pool and assignment; nothing is shared with other trials.
#[derive(Debug, Clone)]
pub struct Trial<'p> {
    pool: CandidatePool<'p>,
    assignment: Assignment<'p>,
    caps: Vec<usize>,
    loads: Vec<usize>,
    assigned: Vec<bool>,
    committed: usize,
}

impl<'p> Trial<'p> {
    /// Starts a trial on a freshly built pool.
    pub fn new(mut pool: CandidatePool<'p>, max_new_advisees: u32) -> Self {
        let problem = pool.problem();
        let caps: Vec<usize> = problem
            .advisors()
            .iter()
            .map(|a| a.effective_capacity(max_new_advisees) as usize)
            .collect();

        for (advisor, &cap) in caps.iter().enumerate() {
            if cap == 0 {
                pool.remove_advisor(advisor);
            }
        }

        Self {
            pool,
            assignment: Assignment::new(),
            loads: vec![0; caps.len()],
            caps,
            assigned: vec![false; problem.candidates().len()],
            committed: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> TrialState {
        if self.committed == self.assigned.len() {
            TrialState::Complete
        } else if self.pool.is_empty() {
            TrialState::Stuck
        } else {
            TrialState::Searching
        }
    }

    /// Commits one match. No-op once the trial is `Stuck` or `Complete`.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> TrialState {
        if self.state() != TrialState::Searching {
            return self.state();
        }

        let ties = self.pool.best_ties();
        debug_assert!(!ties.is_empty());
        let pos = ties[rng.random_range(0..ties.len())];

        let m = self.pool.to_match(pos);
        let (advisor, candidate) = {
            let e = self.pool.entry(pos);
            (e.advisor, e.candidate)
        };
        debug!(
            advisor = %m.advisor.id,
            candidate = %m.candidate.id,
            score = m.score,
            ties = ties.len(),
            "commit"
        );
        self.assignment.commit(m);
        self.assigned[candidate] = true;
        self.committed += 1;
        self.loads[advisor] += 1;

        self.pool.remove_candidate(candidate);
        if self.loads[advisor] >= self.caps[advisor] {
            self.pool.remove_advisor(advisor);
        }

        self.state()
    }

    /// Steps until the trial leaves `Searching`.
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> TrialState {
        while self.step(rng) == TrialState::Searching {}
        self.state()
    }

    /// Number of committed matches.
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Live pool.
    pub fn pool(&self) -> &CandidatePool<'p> {
        &self.pool
    }

    /// Assignment so far.
    pub fn assignment(&self) -> &Assignment<'p> {
        &self.assignment
    }

    /// Candidates without a match, in ID order.
    pub fn unassigned(&self) -> Vec<&'p Candidate> {
        let candidates = self.pool.problem().candidates();
        self.assigned
            .iter()
            .zip(candidates)
            .filter(|(assigned, _)| !**assigned)
            .map(|(_, c)| c)
            .collect()
    }

    /// Converts a finished trial into its result.
    ///
    /// # Errors
    /// [`MatchError::Infeasible`] unless the trial is `Complete`.
    pub fn into_result(self) -> Result<Assignment<'p>> {
        match self.state() {
            TrialState::Complete => Ok(self.assignment),
            TrialState::Stuck | TrialState::Searching => Err(MatchError::Infeasible {
                committed: self.committed,
                unassigned: self.unassigned().iter().map(|c| c.id.clone()).collect(),
            }),
        }
    }
}

/// Greedy randomized assigner.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_match::models::{Advisor, Candidate, Catalog, MatchProblem};
/// use u_match::search::GreedyAssigner;
///
/// let catalog = Catalog::new()
///     .with_program("CS", "Science")
///     .with_program("Art", "Humanities");
/// let problem = MatchProblem::new(
///     catalog,
///     vec![Advisor::new("P1", "CS", 1), Advisor::new("P2", "Art", 1)],
///     vec![
///         Candidate::new("S1").with_major("Art"),
///         Candidate::new("S2").with_major("CS"),
///     ],
/// ).unwrap();
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let assignment = GreedyAssigner::new(10).assign(&problem, &mut rng).unwrap();
/// assert_eq!(assignment.matches_for("P1")[0].candidate.id, "S2");
/// assert!((assignment.total_score() - 2.5).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GreedyAssigner {
    scorer: CompatibilityScorer,
    max_new_advisees: u32,
}

impl GreedyAssigner {
    /// Creates an assigner with a global new-advisee cap.
    pub fn new(max_new_advisees: u32) -> Self {
        Self {
            scorer: CompatibilityScorer::new(),
            max_new_advisees,
        }
    }

    /// Sets the scorer used to build pools.
    pub fn with_scorer(mut self, scorer: CompatibilityScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Scorer used to build pools.
    pub fn scorer(&self) -> &CompatibilityScorer {
        &self.scorer
    }

    /// Global new-advisee cap.
    pub fn max_new_advisees(&self) -> u32 {
        self.max_new_advisees
    }

    /// Builds a fresh pool for `problem`.
    pub fn build_pool<'p>(&self, problem: &'p MatchProblem) -> CandidatePool<'p> {
        CandidatePool::build(problem, &self.scorer)
    }

    /// Runs one trial on `pool`.
    ///
    /// # Errors
    /// [`MatchError::Infeasible`] if the pool runs dry before every
    /// candidate is matched.
    pub fn run<'p, R: Rng>(&self, pool: CandidatePool<'p>, rng: &mut R) -> Result<Assignment<'p>> {
        let mut trial = Trial::new(pool, self.max_new_advisees);
        trial.run(rng);
        trial.into_result()
    }

    /// Builds a pool for `problem` and runs one trial on it.
    pub fn assign<'p, R: Rng>(&self, problem: &'p MatchProblem, rng: &mut R) -> Result<Assignment<'p>> {
        self.run(self.build_pool(problem), rng)
    }
}

impl Default for GreedyAssigner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_NEW_ADVISEES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Advisor, Candidate, Catalog};
    use crate::validation::validate_assignment;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Random source that always yields zero, so every tie resolves to the
    /// first entry in build order.
    struct ZeroRng;

    impl rand::RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn catalog() -> Catalog {
        Catalog::new()
            .with_program("CS", "Science")
            .with_program("Math", "Science")
            .with_program("Art", "Humanities")
            .with_program("History", "Humanities")
    }

    fn problem(advisors: Vec<Advisor>, candidates: Vec<Candidate>) -> MatchProblem {
        MatchProblem::new(catalog(), advisors, candidates).unwrap()
    }

    #[test]
    fn test_capacity_shortfall_is_stuck() {
        let p = problem(
            vec![Advisor::new("1", "CS", 1)],
            vec![
                Candidate::new("10").with_major("CS"),
                Candidate::new("11").with_major("Art"),
            ],
        );

        let err = GreedyAssigner::new(10)
            .assign(&p, &mut ZeroRng)
            .unwrap_err();
        match err {
            MatchError::Infeasible {
                committed,
                unassigned,
            } => {
                assert_eq!(committed, 1);
                assert_eq!(unassigned, vec!["11".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_best_pairs_first() {
        let p = problem(
            vec![Advisor::new("P1", "CS", 1), Advisor::new("P2", "Art", 1)],
            vec![
                Candidate::new("S1").with_major("Art"),
                Candidate::new("S2").with_major("CS"),
            ],
        );

        let a = GreedyAssigner::new(10).assign(&p, &mut ZeroRng).unwrap();
        assert_eq!(a.matches_for("P1")[0].candidate.id, "S2");
        assert_eq!(a.matches_for("P2")[0].candidate.id, "S1");
        assert!((a.total_score() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_tie_uses_random_draw() {
        // S1 and S2 tie for P1; the zero draw takes the first in build order.
        let p = problem(
            vec![Advisor::new("P1", "CS", 1), Advisor::new("P2", "Art", 1)],
            vec![
                Candidate::new("S1").with_major("CS"),
                Candidate::new("S2").with_major("CS"),
            ],
        );

        let a = GreedyAssigner::new(10).assign(&p, &mut ZeroRng).unwrap();
        assert_eq!(a.matches_for("P1")[0].candidate.id, "S1");
        assert_eq!(a.matches_for("P2")[0].candidate.id, "S2");
    }

    #[test]
    fn test_tie_breaks_vary_with_seed() {
        let p = problem(
            vec![Advisor::new("P1", "CS", 1), Advisor::new("P2", "Art", 1)],
            vec![
                Candidate::new("S1").with_major("CS"),
                Candidate::new("S2").with_major("CS"),
            ],
        );
        let assigner = GreedyAssigner::new(10);

        let winners: std::collections::HashSet<String> = (0..32u64)
            .map(|seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let a = assigner.assign(&p, &mut rng).unwrap();
                a.matches_for("P1")[0].candidate.id.clone()
            })
            .collect();
        assert_eq!(winners.len(), 2);
    }

    #[test]
    fn test_zero_capacity_advisor_never_matched() {
        let p = problem(
            vec![Advisor::new("P1", "CS", 0), Advisor::new("P2", "Art", 5)],
            vec![Candidate::new("S1").with_major("CS")],
        );

        let a = GreedyAssigner::new(10).assign(&p, &mut ZeroRng).unwrap();
        assert_eq!(a.count_for("P1"), 0);
        assert_eq!(a.count_for("P2"), 1);
        assert_eq!(a.total_score(), 0.0);
    }

    #[test]
    fn test_global_cap_spreads_load() {
        let p = problem(
            vec![Advisor::new("P1", "CS", 10), Advisor::new("P2", "Art", 10)],
            vec![
                Candidate::new("S1").with_major("CS"),
                Candidate::new("S2").with_major("CS"),
            ],
        );

        let a = GreedyAssigner::new(1).assign(&p, &mut ZeroRng).unwrap();
        assert_eq!(a.count_for("P1"), 1);
        assert_eq!(a.count_for("P2"), 1);
    }

    #[test]
    fn test_zero_global_cap_is_stuck() {
        let p = problem(
            vec![Advisor::new("P1", "CS", 10)],
            vec![Candidate::new("S1").with_major("CS")],
        );

        let err = GreedyAssigner::new(0).assign(&p, &mut ZeroRng).unwrap_err();
        assert!(matches!(err, MatchError::Infeasible { committed: 0, .. }));
    }

    #[test]
    fn test_trial_state_machine() {
        let p = problem(
            vec![Advisor::new("P1", "CS", 2)],
            vec![
                Candidate::new("S1").with_major("CS"),
                Candidate::new("S2").with_major("Math"),
            ],
        );
        let assigner = GreedyAssigner::new(10);
        let mut trial = Trial::new(assigner.build_pool(&p), assigner.max_new_advisees());

        assert_eq!(trial.state(), TrialState::Searching);
        assert_eq!(trial.pool().len(), 2);

        assert_eq!(trial.step(&mut ZeroRng), TrialState::Searching);
        assert_eq!(trial.committed(), 1);
        assert_eq!(trial.assignment().matches_for("P1")[0].candidate.id, "S1");
        assert_eq!(trial.unassigned().len(), 1);

        assert_eq!(trial.step(&mut ZeroRng), TrialState::Complete);
        assert_eq!(trial.committed(), 2);
        assert!(trial.pool().is_empty());
        // Further steps are no-ops
        assert_eq!(trial.step(&mut ZeroRng), TrialState::Complete);
        assert_eq!(trial.committed(), 2);

        let a = trial.into_result().unwrap();
        assert!((a.total_score() - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_no_candidates_is_complete() {
        let p = problem(vec![Advisor::new("P1", "CS", 2)], vec![]);
        let a = GreedyAssigner::new(10).assign(&p, &mut ZeroRng).unwrap();
        assert!(a.is_empty());
    }

    #[test]
    fn test_no_advisors_is_stuck() {
        let p = problem(vec![], vec![Candidate::new("S1"), Candidate::new("S2")]);
        let assigner = GreedyAssigner::new(10);
        let trial = Trial::new(assigner.build_pool(&p), 10);
        assert_eq!(trial.state(), TrialState::Stuck);

        let err = assigner.assign(&p, &mut ZeroRng).unwrap_err();
        assert!(
            matches!(err, MatchError::Infeasible { committed: 0, ref unassigned } if unassigned.len() == 2)
        );
    }

    #[test]
    fn test_seeded_runs_satisfy_invariants() {
        let programs = ["CS", "Math", "Art", "History"];
        let advisors: Vec<Advisor> = (0..6)
            .map(|i| Advisor::new(format!("P{i}"), programs[i % 4], 2 + (i as u32 % 3)))
            .collect();
        let candidates: Vec<Candidate> = (0..15)
            .map(|i| {
                Candidate::new(format!("S{i:02}"))
                    .with_major(programs[i % 4])
                    .with_minor(programs[(i + 1) % 4])
            })
            .collect();
        let p = problem(advisors, candidates);

        for seed in 0..10 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let a = GreedyAssigner::new(3).assign(&p, &mut rng).unwrap();
            assert_eq!(a.match_count(), 15);
            assert!(validate_assignment(&a, p.advisors(), p.candidates(), 3).is_ok());
        }
    }
}
