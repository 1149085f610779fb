//! The round driver: satisfiability search over the active candidate set.
//!
//! One candidate seeds the search; every round, each active candidate drains
//! its current-round queues through the expansion rules. Closed candidates
//! are dropped, siblings spawned by disjunctive rules join the active set at
//! the round boundary, and the first candidate to finish with every queue
//! empty is a satisfying model. An empty active set means every branch
//! closed: unsatisfiable.
//!
//! Candidates are fully independent after branching, so when `parallel` is
//! set the per-candidate rounds of one pass run on the rayon thread pool; a
//! round is the unit of isolation and outcomes are merged sequentially
//! afterwards. Cancellation (model found, budget exhausted) only ever
//! happens at a round boundary, leaving no candidate half-expanded.

use std::sync::Arc;

use rayon::prelude::*;

use crate::candidate::{ModelCandidate, RoundOutcome, RoundStatus};
use crate::error::{TableauError, TableauResult};
use crate::formula::Formula;
use crate::frame::FrameProperties;

/// Configuration for a satisfiability search.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Frame conditions on the accessibility relation.
    pub frame: FrameProperties,
    /// Round budget before the search gives up with
    /// [`TableauError::BudgetExhausted`].
    pub max_rounds: usize,
    /// Run each pass's candidate rounds on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            frame: FrameProperties::K,
            max_rounds: 10_000,
            parallel: false,
        }
    }
}

/// Verdict of a satisfiability search.
#[derive(Debug)]
pub enum Satisfiability {
    /// An open branch survived: the formula is satisfiable, and the carried
    /// candidate is a satisfying Kripke model.
    Satisfiable(ModelCandidate),
    /// Every branch closed on a contradiction.
    Unsatisfiable,
}

impl Satisfiability {
    /// Whether a model was found.
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, Satisfiability::Satisfiable(_))
    }

    /// The satisfying model, if any.
    pub fn model(&self) -> Option<&ModelCandidate> {
        match self {
            Satisfiability::Satisfiable(model) => Some(model),
            Satisfiability::Unsatisfiable => None,
        }
    }
}

/// Tableau satisfiability solver.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Create a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver for the given frame conditions, defaults otherwise.
    pub fn for_frame(frame: FrameProperties) -> Self {
        Self::new(SolverConfig {
            frame,
            ..SolverConfig::default()
        })
    }

    /// The configuration in force.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Decide satisfiability of `formula`.
    ///
    /// Returns the first satisfying model found, or
    /// [`Satisfiability::Unsatisfiable`] once every branch has closed.
    /// Errors with [`TableauError::BudgetExhausted`] if the active set is
    /// still growing after `max_rounds` rounds.
    pub fn solve(&self, formula: Arc<Formula>) -> TableauResult<Satisfiability> {
        tracing::info!(
            formula = %formula,
            frame = %self.config.frame,
            "starting tableau search"
        );

        let mut active = vec![ModelCandidate::new(self.config.frame, formula)];

        for round in 1..=self.config.max_rounds {
            tracing::trace!(round, candidates = active.len(), "expansion pass");

            let outcomes = self.run_pass(std::mem::take(&mut active))?;

            for (candidate, outcome) in outcomes {
                match outcome.status {
                    RoundStatus::Closed => {}
                    RoundStatus::Model => {
                        tracing::info!(
                            round,
                            worlds = candidate.world_count(),
                            "open branch finished: satisfiable"
                        );
                        return Ok(Satisfiability::Satisfiable(candidate));
                    }
                    RoundStatus::Open => active.push(candidate),
                }
                active.extend(outcome.spawned);
            }

            if active.is_empty() {
                tracing::info!(round, "all branches closed: unsatisfiable");
                return Ok(Satisfiability::Unsatisfiable);
            }
        }

        tracing::warn!(
            rounds = self.config.max_rounds,
            candidates = active.len(),
            "round budget exhausted"
        );
        Err(TableauError::BudgetExhausted {
            rounds: self.config.max_rounds,
        })
    }

    /// Run one round on every candidate, in parallel when configured.
    fn run_pass(
        &self,
        candidates: Vec<ModelCandidate>,
    ) -> TableauResult<Vec<(ModelCandidate, RoundOutcome)>> {
        if self.config.parallel && candidates.len() > 1 {
            candidates
                .into_par_iter()
                .map(|mut candidate| {
                    let outcome = candidate.run_round()?;
                    Ok((candidate, outcome))
                })
                .collect()
        } else {
            candidates
                .into_iter()
                .map(|mut candidate| {
                    let outcome = candidate.run_round()?;
                    Ok((candidate, outcome))
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> Arc<Formula> {
        Formula::atom("p")
    }

    fn solve_k(formula: Arc<Formula>) -> Satisfiability {
        Solver::default().solve(formula).unwrap()
    }

    #[test]
    fn atomic_formula_is_satisfiable() {
        let verdict = solve_k(p());
        let model = verdict.model().expect("atom must be satisfiable");
        assert_eq!(model.world_count(), 1);
    }

    #[test]
    fn direct_contradiction_is_unsatisfiable() {
        let verdict = solve_k(Formula::and(p(), Formula::not(p())));
        assert!(!verdict.is_satisfiable());
    }

    #[test]
    fn excluded_middle_is_satisfiable() {
        let verdict = solve_k(Formula::or(p(), Formula::not(p())));
        assert!(verdict.is_satisfiable());
    }

    #[test]
    fn budget_exhaustion_is_an_error() {
        let solver = Solver::new(SolverConfig {
            max_rounds: 1,
            ..SolverConfig::default()
        });
        // One round only queues the conjuncts; the search cannot finish.
        let err = solver
            .solve(Formula::and(p(), Formula::atom("q")))
            .unwrap_err();
        assert!(matches!(err, TableauError::BudgetExhausted { rounds: 1 }));
    }

    #[test]
    fn parallel_pass_agrees_with_sequential() {
        let formula = Formula::and(
            Formula::or(p(), Formula::atom("q")),
            Formula::or(Formula::not(p()), Formula::atom("r")),
        );
        let sequential = Solver::default().solve(formula.clone()).unwrap();
        let parallel = Solver::new(SolverConfig {
            parallel: true,
            ..SolverConfig::default()
        })
        .solve(formula)
        .unwrap();
        assert_eq!(sequential.is_satisfiable(), parallel.is_satisfiable());
    }
}
