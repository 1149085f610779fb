//! Diagnostic error types for the tableau engine.
//!
//! The error surface is deliberately small. A contradiction (an atom asserted
//! both true and false in the same world) is *not* an error — it is the normal
//! way a branch closes, signaled by the assignment operations returning
//! `false`. What remains is the fatal stuff: internal invariant violations and
//! a search that refuses to terminate within its round budget.
//!
//! Malformed formulas have no error variant at all: [`crate::formula::Formula`]
//! is a closed sum type, so an unknown operator tag is unrepresentable and the
//! compiler enforces exhaustive rule coverage.

use miette::Diagnostic;
use thiserror::Error;

use crate::graph::WorldId;

/// Errors surfaced by candidates and the solver.
#[derive(Debug, Error, Diagnostic)]
pub enum TableauError {
    #[error("world {world} is not present in this candidate")]
    #[diagnostic(
        code(tableau::candidate::unknown_world),
        help(
            "World ids are only valid within the candidate that allocated them. \
             This indicates an internal invariant violation — a rule addressed \
             a world from a different candidate, or an id was fabricated. \
             Please file a bug report with the offending formula."
        )
    )]
    UnknownWorld { world: WorldId },

    #[error("search did not terminate within {rounds} expansion rounds")]
    #[diagnostic(
        code(tableau::solver::budget_exhausted),
        help(
            "The tableau kept generating work past the configured round budget. \
             Increase `max_rounds` in SolverConfig, or check whether the input \
             formula forces an unbounded chain of fresh worlds."
        )
    )]
    BudgetExhausted { rounds: usize },
}

/// Convenience alias for functions returning tableau results.
pub type TableauResult<T> = std::result::Result<T, TableauError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_world_message_names_the_world() {
        let err = TableauError::UnknownWorld {
            world: WorldId::new(7),
        };
        let msg = format!("{err}");
        assert!(msg.contains("w7"));
    }

    #[test]
    fn budget_message_names_the_round_count() {
        let err = TableauError::BudgetExhausted { rounds: 500 };
        let msg = format!("{err}");
        assert!(msg.contains("500"));
    }
}
