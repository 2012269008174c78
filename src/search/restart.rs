//! Randomized restarts.
//!
//! Runs the greedy assigner several times and keeps the best complete
//! assignment.
//!
//! # Selection
//!
//! - A trial that completes is validated; any violation aborts the run.
//! - The first complete trial becomes the best. A later trial replaces it
//!   only with a strictly greater total score, so ties keep the earlier one.
//! - Stuck trials never compete. If every trial is stuck, the error of the
//!   trial that committed the most candidates is returned (earliest on ties).
//!
//! # Trial Modes
//!
//! | Mode | Randomness | Execution |
//! |------|-----------|-----------|
//! | `Sequential` | One ChaCha8 stream from `seed`, continued across trials | In order |
//! | `Independent` | ChaCha8 stream `t` from `seed` for trial `t` | Parallel (rayon) |
//!
//! Both modes are reproducible for a given seed. Independent mode observes
//! results in trial order, so thread scheduling never changes the outcome.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{info, warn};

use super::greedy::GreedyAssigner;
use crate::config::{ConfigError, MatchConfig, TrialMode, DEFAULT_TRIAL_COUNT};
use crate::diagnostics::Diagnostic;
use crate::error::{MatchError, Result};
use crate::models::{Assignment, MatchProblem};
use crate::scoring::CompatibilityScorer;
use crate::validation::validate_assignment;

/// Result of a restart run.
#[derive(Debug, Clone)]
pub struct MatchOutcome<'p> {
    /// Best complete assignment.
    pub assignment: Assignment<'p>,
    /// Total score of `assignment`.
    pub total_score: f64,
    /// 1-based index of the trial that produced `assignment`.
    pub best_trial: usize,
    /// Total score per trial, `None` for stuck trials.
    pub trial_scores: Vec<Option<f64>>,
    /// Warnings found while loading the problem.
    pub diagnostics: Vec<Diagnostic>,
}

impl MatchOutcome<'_> {
    /// Number of trials that completed.
    pub fn completed_trials(&self) -> usize {
        self.trial_scores.iter().filter(|s| s.is_some()).count()
    }
}

/// Repeats greedy trials and keeps the best.
#[derive(Debug, Clone, Copy)]
pub struct RestartController {
    assigner: GreedyAssigner,
    trial_count: usize,
    mode: TrialMode,
}

impl RestartController {
    /// Creates a controller running `trial_count` sequential trials.
    pub fn new(assigner: GreedyAssigner, trial_count: usize) -> Self {
        Self {
            assigner,
            trial_count,
            mode: TrialMode::Sequential,
        }
    }

    /// Creates a controller from a run configuration.
    pub fn from_config(config: &MatchConfig) -> Self {
        let scorer = CompatibilityScorer::new().with_weights(config.weights);
        let assigner = GreedyAssigner::new(config.max_new_advisees).with_scorer(scorer);
        Self::new(assigner, config.trial_count).with_mode(config.trial_mode)
    }

    /// Sets the number of trials.
    pub fn with_trial_count(mut self, trial_count: usize) -> Self {
        self.trial_count = trial_count;
        self
    }

    /// Sets the trial mode.
    pub fn with_mode(mut self, mode: TrialMode) -> Self {
        self.mode = mode;
        self
    }

    /// Number of trials.
    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    /// Trial mode.
    pub fn mode(&self) -> TrialMode {
        self.mode
    }

    /// Runs every trial with randomness derived from `seed`.
    ///
    /// # Errors
    /// - [`MatchError::Config`] if the trial count is zero
    /// - [`MatchError::Infeasible`] if no trial completes
    /// - [`MatchError::InvariantViolation`] if a completed trial is invalid
    pub fn run<'p>(&self, problem: &'p MatchProblem, seed: u64) -> Result<MatchOutcome<'p>> {
        self.preflight(problem)?;
        info!(
            event = "run_start",
            trials = self.trial_count,
            mode = ?self.mode,
            seed,
            advisors = problem.advisors().len(),
            candidates = problem.candidates().len(),
        );

        match self.mode {
            TrialMode::Sequential => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                self.run_trials(problem, &mut rng)
            }
            TrialMode::Independent => {
                let results: Vec<Result<Assignment<'p>>> = (0..self.trial_count)
                    .into_par_iter()
                    .map(|t| {
                        let mut rng = ChaCha8Rng::seed_from_u64(seed);
                        rng.set_stream(t as u64);
                        self.assigner.assign(problem, &mut rng)
                    })
                    .collect();

                let mut tracker = BestTracker::new(self.assigner.max_new_advisees());
                for (t, result) in results.into_iter().enumerate() {
                    tracker.observe(t + 1, result, problem)?;
                }
                tracker.finish(problem)
            }
        }
    }

    /// Runs every trial sequentially on a caller-supplied random source.
    ///
    /// The trial mode is ignored.
    pub fn run_with_rng<'p, R: Rng>(
        &self,
        problem: &'p MatchProblem,
        rng: &mut R,
    ) -> Result<MatchOutcome<'p>> {
        self.preflight(problem)?;
        self.run_trials(problem, rng)
    }

    fn run_trials<'p, R: Rng>(
        &self,
        problem: &'p MatchProblem,
        rng: &mut R,
    ) -> Result<MatchOutcome<'p>> {
        let mut tracker = BestTracker::new(self.assigner.max_new_advisees());
        for t in 1..=self.trial_count {
            let result = self.assigner.assign(problem, rng);
            tracker.observe(t, result, problem)?;
        }
        tracker.finish(problem)
    }

    /// Rejects a zero trial count and warns when capacity is short. Trials
    /// still run on a shortfall; each one ends stuck.
    fn preflight(&self, problem: &MatchProblem) -> Result<()> {
        if self.trial_count == 0 {
            return Err(ConfigError::Invalid("trial_count must be at least 1".into()).into());
        }
        let max_new_advisees = self.assigner.max_new_advisees();
        if !problem.has_sufficient_capacity(max_new_advisees) {
            warn!(
                event = "capacity_shortfall",
                capacity = problem.total_capacity(max_new_advisees),
                candidates = problem.candidates().len(),
                max_new_advisees,
            );
        }
        Ok(())
    }
}

impl Default for RestartController {
    fn default() -> Self {
        Self::new(GreedyAssigner::default(), DEFAULT_TRIAL_COUNT)
    }
}

/// Best-so-far bookkeeping across trials.
struct BestTracker<'p> {
    max_new_advisees: u32,
    best: Option<(usize, Assignment<'p>, f64)>,
    stuck: Option<(usize, MatchError)>,
    trial_scores: Vec<Option<f64>>,
}

impl<'p> BestTracker<'p> {
    fn new(max_new_advisees: u32) -> Self {
        Self {
            max_new_advisees,
            best: None,
            stuck: None,
            trial_scores: Vec::new(),
        }
    }

    /// Records one trial result. Errors other than infeasibility abort.
    fn observe(
        &mut self,
        trial: usize,
        result: Result<Assignment<'p>>,
        problem: &MatchProblem,
    ) -> Result<()> {
        let assignment = match result {
            Ok(assignment) => assignment,
            Err(err) => return self.observe_stuck(trial, err),
        };

        validate_assignment(
            &assignment,
            problem.advisors(),
            problem.candidates(),
            self.max_new_advisees,
        )
        .map_err(MatchError::InvariantViolation)?;

        let score = assignment.total_score();
        self.trial_scores.push(Some(score));

        let improved = self
            .best
            .as_ref()
            .map_or(true, |(_, _, best)| score > *best);
        if improved {
            self.best = Some((trial, assignment, score));
        }

        let best_score = self.best.as_ref().map_or(score, |(_, _, s)| *s);
        info!(event = "trial_end", trial, score, best_score, improved);
        Ok(())
    }

    fn observe_stuck(&mut self, trial: usize, err: MatchError) -> Result<()> {
        let MatchError::Infeasible {
            committed,
            unassigned,
        } = &err
        else {
            return Err(err);
        };
        warn!(
            event = "trial_stuck",
            trial,
            committed = *committed,
            unassigned = unassigned.len(),
        );
        self.trial_scores.push(None);

        let committed = *committed;
        let replace = self
            .stuck
            .as_ref()
            .map_or(true, |(most, _)| committed > *most);
        if replace {
            self.stuck = Some((committed, err));
        }
        Ok(())
    }

    fn finish(self, problem: &MatchProblem) -> Result<MatchOutcome<'p>> {
        let completed = self.trial_scores.iter().filter(|s| s.is_some()).count();
        match (self.best, self.stuck) {
            (Some((best_trial, assignment, total_score)), _) => {
                info!(
                    event = "run_end",
                    best_trial,
                    total_score,
                    completed,
                    trials = self.trial_scores.len(),
                );
                Ok(MatchOutcome {
                    assignment,
                    total_score,
                    best_trial,
                    trial_scores: self.trial_scores,
                    diagnostics: problem.diagnostics().to_vec(),
                })
            }
            (None, Some((committed, err))) => {
                warn!(
                    event = "run_end",
                    completed,
                    trials = self.trial_scores.len(),
                    most_committed = committed,
                );
                Err(err)
            }
            (None, None) => Err(ConfigError::Invalid("no trials were run".into()).into()),
        }
    }
}
