//! Export types for rendering a terminal model.
//!
//! A satisfying candidate is an in-memory structure; visualization lives
//! outside this crate and only needs the world set, the accessibility edges
//! and the per-world atom labels. These types capture exactly that surface
//! in a deterministic, JSON-friendly shape.

use serde::{Deserialize, Serialize};

use crate::candidate::ModelCandidate;
use crate::error::TableauResult;

/// One world with its truth assignment, labels sorted for stable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldExport {
    /// World number.
    pub id: u32,
    /// Atoms asserted true here, sorted.
    pub true_atoms: Vec<String>,
    /// Atoms asserted false here, sorted.
    pub false_atoms: Vec<String>,
}

/// A labeled directed graph snapshot of a model candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelExport {
    /// Frame conditions the model was built under.
    pub reflexive: bool,
    /// See [`crate::frame::FrameProperties`].
    pub symmetric: bool,
    /// See [`crate::frame::FrameProperties`].
    pub transitive: bool,
    /// Worlds in ascending id order.
    pub worlds: Vec<WorldExport>,
    /// Accessibility edges as (from, to) world numbers, sorted.
    pub edges: Vec<(u32, u32)>,
}

impl ModelCandidate {
    /// Snapshot this candidate for rendering or serialization.
    pub fn export(&self) -> TableauResult<ModelExport> {
        let frame = self.frame();
        let mut worlds = Vec::with_capacity(self.world_count());
        for id in self.world_ids() {
            let mut true_atoms: Vec<String> = self.true_atoms(id)?.iter().cloned().collect();
            let mut false_atoms: Vec<String> = self.false_atoms(id)?.iter().cloned().collect();
            true_atoms.sort_unstable();
            false_atoms.sort_unstable();
            worlds.push(WorldExport {
                id: id.get(),
                true_atoms,
                false_atoms,
            });
        }
        Ok(ModelExport {
            reflexive: frame.reflexive,
            symmetric: frame.symmetric,
            transitive: frame.transitive,
            worlds,
            edges: self
                .edges()
                .into_iter()
                .map(|(a, b)| (a.get(), b.get()))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Formula;
    use crate::frame::FrameProperties;
    use crate::solver::Solver;

    #[test]
    fn export_is_deterministic_and_sorted() {
        let formula = Formula::and(
            Formula::atom("zeta"),
            Formula::and(Formula::atom("alpha"), Formula::not(Formula::atom("mu"))),
        );
        let verdict = Solver::default().solve(formula).unwrap();
        let export = verdict.model().unwrap().export().unwrap();
        assert_eq!(export.worlds.len(), 1);
        assert_eq!(export.worlds[0].true_atoms, vec!["alpha", "zeta"]);
        assert_eq!(export.worlds[0].false_atoms, vec!["mu"]);
        assert!(!export.reflexive);
    }

    #[test]
    fn export_round_trips_through_json() {
        let formula = Formula::possibly(Formula::atom("p"));
        let verdict = Solver::for_frame(FrameProperties::T).solve(formula).unwrap();
        let export = verdict.model().unwrap().export().unwrap();

        let json = serde_json::to_string(&export).unwrap();
        let back: ModelExport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, export);
        // Reflexive frame: world 0 carries its self-loop.
        assert!(back.edges.contains(&(0, 0)));
        assert!(back.reflexive);
    }
}
