//! The per-operator expansion rules.
//!
//! Each formula pulled from a current-round queue is dispatched through one
//! exhaustive match on its top operator. A rule does exactly one of:
//! resolve to a truth assignment, enqueue obligations in the same world,
//! rewrite to a dual form, spawn a fresh accessible world, record a box
//! obligation, or branch the candidate into siblings. Siblings are returned
//! through the `spawned` buffer and merged into the active set by the driver
//! only after the handler returns.
//!
//! Rules:
//!
//! | shape              | action                                             |
//! |--------------------|----------------------------------------------------|
//! | `p`                | assert true; contradiction closes the branch       |
//! | `~p`               | assert false; contradiction closes the branch      |
//! | `~~phi`            | `phi`, next round                                  |
//! | `phi & psi`        | both conjuncts, same world, next round             |
//! | `~(phi \| psi)`    | `~phi` and `~psi`, same world (De Morgan)          |
//! | `~(phi -> psi)`    | `phi` and `~psi`, same world                       |
//! | `phi \| psi`       | branch: parent keeps `phi`, sibling takes `psi`    |
//! | `~(phi & psi)`     | branch on `~phi \| ~psi` (De Morgan)               |
//! | `phi -> psi`       | branch on `~phi \| psi`                            |
//! | `[]phi`            | inherited obligation; pushed to all children       |
//! | `~[]phi`           | `<>~phi`, next round (duality)                     |
//! | `<>phi`            | fresh child; plus one sibling per existing child   |
//! | `~<>phi`           | `[]~phi`, next round (duality)                     |

use std::sync::Arc;

use crate::candidate::ModelCandidate;
use crate::error::TableauResult;
use crate::formula::Formula;
use crate::graph::WorldId;

impl ModelCandidate {
    /// Expand one formula at one world.
    ///
    /// Returns `false` when the expansion hit a contradiction and the branch
    /// must close; the caller discards the candidate. Siblings created by
    /// disjunctive rules are pushed onto `spawned`.
    pub(crate) fn expand(
        &mut self,
        world: WorldId,
        formula: Arc<Formula>,
        spawned: &mut Vec<ModelCandidate>,
    ) -> TableauResult<bool> {
        match formula.as_ref() {
            Formula::Atom(name) => self.assert_true(world, name),
            Formula::Not(phi) => self.expand_negation(world, phi, spawned),
            Formula::And(phi, psi) => {
                self.queue_next(world, phi.clone());
                self.queue_next(world, psi.clone());
                Ok(true)
            }
            Formula::Or(phi, psi) => {
                self.branch_disjunction(world, phi.clone(), psi.clone(), spawned);
                Ok(true)
            }
            // Standard tableau rule: phi -> psi is satisfied exactly when
            // ~phi or psi holds here.
            Formula::Implies(phi, psi) => {
                self.branch_disjunction(world, Formula::not(phi.clone()), psi.clone(), spawned);
                Ok(true)
            }
            Formula::Necessity(phi) => {
                self.enforce_on_children(world, phi.clone());
                Ok(true)
            }
            Formula::Possibility(phi) => {
                self.witness_possibility(world, phi.clone(), spawned)?;
                Ok(true)
            }
        }
    }

    /// Expand `~phi` by the shape of `phi`.
    fn expand_negation(
        &mut self,
        world: WorldId,
        phi: &Arc<Formula>,
        spawned: &mut Vec<ModelCandidate>,
    ) -> TableauResult<bool> {
        match phi.as_ref() {
            Formula::Atom(name) => self.assert_false(world, name),
            // Double negation elimination.
            Formula::Not(inner) => {
                self.queue_next(world, inner.clone());
                Ok(true)
            }
            // De Morgan: ~(phi & psi) branches like ~phi | ~psi.
            Formula::And(a, b) => {
                self.branch_disjunction(
                    world,
                    Formula::not(a.clone()),
                    Formula::not(b.clone()),
                    spawned,
                );
                Ok(true)
            }
            // De Morgan: ~(phi | psi) is ~phi and ~psi, non-branching.
            Formula::Or(a, b) => {
                self.queue_next(world, Formula::not(a.clone()));
                self.queue_next(world, Formula::not(b.clone()));
                Ok(true)
            }
            // ~(phi -> psi) is phi and ~psi, non-branching.
            Formula::Implies(a, b) => {
                self.queue_next(world, a.clone());
                self.queue_next(world, Formula::not(b.clone()));
                Ok(true)
            }
            // Duality: ~[]phi rewrites to <>~phi.
            Formula::Necessity(inner) => {
                self.queue_next(world, Formula::possibly(Formula::not(inner.clone())));
                Ok(true)
            }
            // Duality: ~<>phi rewrites to []~phi.
            Formula::Possibility(inner) => {
                self.queue_next(world, Formula::necessarily(Formula::not(inner.clone())));
                Ok(true)
            }
        }
    }

    /// Branch on a disjunction: the parent keeps `keep` in its next-round
    /// queue, a sibling takes `give` in its current-round queue.
    ///
    /// The sibling is cloned before `keep` is queued, so it inherits exactly
    /// the parent's pending work plus its own disjunct.
    fn branch_disjunction(
        &mut self,
        world: WorldId,
        keep: Arc<Formula>,
        give: Arc<Formula>,
        spawned: &mut Vec<ModelCandidate>,
    ) {
        let mut sibling = self.branch();
        self.queue_next(world, keep);
        sibling.queue_current(world, give);
        tracing::trace!(world = %world, "disjunctive branch");
        spawned.push(sibling);
    }

    /// Witness `<>phi` at `world`.
    ///
    /// A diamond can be witnessed by a fresh accessible world or by any
    /// existing one; all possibilities are explored. The original candidate
    /// takes the fresh-world branch, and one sibling per existing child
    /// (ascending world id, for reproducibility) attaches `phi` to that
    /// child instead.
    fn witness_possibility(
        &mut self,
        world: WorldId,
        phi: Arc<Formula>,
        spawned: &mut Vec<ModelCandidate>,
    ) -> TableauResult<()> {
        if self.has_successors(world) {
            for child in self.successors(world) {
                let mut sibling = self.branch();
                sibling.queue_current(child, phi.clone());
                tracing::trace!(world = %world, witness = %child, "diamond reuses existing child");
                spawned.push(sibling);
            }
        }
        let fresh = self.spawn_world(phi);
        self.connect(world, fresh)?;
        tracing::trace!(world = %world, witness = %fresh, "diamond spawned fresh child");
        Ok(())
    }
}
