//! Greedy randomized matching with restarts.
//!
//! # Algorithm
//!
//! `GreedyAssigner` repeatedly commits a pair drawn uniformly from the
//! highest-scoring live pairs, pruning candidates once matched and advisors
//! once full. `RestartController` runs it several times and keeps the best
//! complete assignment. The result is not optimal; randomized tie-breaking
//! plus restarts trades a little quality for speed and simplicity.
//!
//! # Components
//!
//! | Type | Role |
//! |------|------|
//! | `CandidatePool` | Ranked, shrinking set of scored pairs |
//! | `Trial` | One greedy run: pool, loads, assignment |
//! | `GreedyAssigner` | Builds pools and drives trials |
//! | `RestartController` | Repeats trials, validates, keeps the best |
//!
//! # Reference
//! Feo & Resende (1995), "Greedy Randomized Adaptive Search Procedures"

mod greedy;
mod pool;
mod restart;

pub use greedy::{GreedyAssigner, Trial, TrialState};
pub use pool::{CandidatePool, PoolEntry};
pub use restart::{MatchOutcome, RestartController};

use crate::config::MatchConfig;
use crate::error::Result;
use crate::models::MatchProblem;

/// Runs a full matching search as configured.
///
/// # Errors
/// - [`crate::MatchError::Config`] if `config` is invalid
/// - [`crate::MatchError::Infeasible`] if no trial matches every candidate
/// - [`crate::MatchError::InvariantViolation`] if a result breaks an invariant
pub fn solve<'p>(problem: &'p MatchProblem, config: &MatchConfig) -> Result<MatchOutcome<'p>> {
    config.validate()?;
    RestartController::from_config(config).run(problem, config.random_seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrialMode;
    use crate::error::MatchError;
    use crate::models::{Advisor, Candidate, Catalog};

    fn problem() -> MatchProblem {
        let catalog = Catalog::new()
            .with_program("CS", "Science")
            .with_program("Math", "Science")
            .with_program("Art", "Humanities");
        MatchProblem::new(
            catalog,
            vec![
                Advisor::new("P1", "CS", 2).with_name("Ada", "Lovelace"),
                Advisor::new("P2", "Art", 2).with_name("Frida", "Kahlo"),
            ],
            vec![
                Candidate::new("S1").with_major("CS"),
                Candidate::new("S2").with_major("Art"),
                Candidate::new("S3").with_major("Math").with_minor("Art"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_solve_default_config() {
        let p = problem();
        let outcome = solve(&p, &MatchConfig::default()).unwrap();

        assert_eq!(outcome.trial_scores.len(), 3);
        assert_eq!(outcome.assignment.match_count(), 3);
        // S1→P1 (1.25), S2→P2 (1.25), S3→P2 (0.75 beats 0.25 for P1)
        assert_eq!(outcome.assignment.match_for_candidate("S3").unwrap().advisor.id, "P2");
        assert!((outcome.total_score - 3.25).abs() < 1e-10);
    }

    #[test]
    fn test_solve_modes_agree_on_unique_optimum() {
        let p = problem();
        let sequential = solve(&p, &MatchConfig::default()).unwrap();
        let independent = solve(
            &p,
            &MatchConfig::default().with_trial_mode(TrialMode::Independent),
        )
        .unwrap();
        assert_eq!(sequential.assignment, independent.assignment);
    }

    #[test]
    fn test_solve_rejects_invalid_config() {
        let p = problem();
        let config = MatchConfig::default().with_trial_count(0);
        assert!(matches!(solve(&p, &config), Err(MatchError::Config(_))));
    }
}
