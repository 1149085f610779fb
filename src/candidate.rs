//! Model candidates: the unit of tableau branching.
//!
//! A [`ModelCandidate`] is one hypothesis being explored — an accessibility
//! graph over worlds, plus per-world truth assignments, formula queues and
//! inherited (box) obligations. Disjunctive rules branch a candidate into
//! siblings; a contradiction discards exactly the offending candidate.
//!
//! Candidates own their state exclusively. [`ModelCandidate::branch`] is an
//! explicit deep copy — no queue or assignment table is ever aliased between
//! siblings, so the solver may run their rounds on independent workers.
//!
//! Formula queues come in two generations per world: the current round, being
//! drained now, and the next round, filled by expansion and promoted at the
//! round boundary.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use crate::error::{TableauError, TableauResult};
use crate::formula::Formula;
use crate::frame::FrameProperties;
use crate::graph::{AccessibilityGraph, WorldId};

/// Per-world state: truth assignment, formula queues, inherited obligations.
#[derive(Debug, Clone, Default)]
struct WorldState {
    /// Atoms asserted true here. Disjoint from `false_atoms`.
    true_atoms: HashSet<String>,
    /// Atoms asserted false here.
    false_atoms: HashSet<String>,
    /// Formulas being expanded this round.
    current: VecDeque<Arc<Formula>>,
    /// Formulas queued for the next round.
    next: Vec<Arc<Formula>>,
    /// Box obligations copied into every child, present and future.
    inherited: Vec<Arc<Formula>>,
}

/// How a candidate left its expansion round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    /// Work remains; keep the candidate active.
    Open,
    /// A contradiction closed this branch; discard the candidate.
    Closed,
    /// Every queue is empty — the candidate is a satisfying model.
    Model,
}

/// Result of running one round on a candidate.
#[derive(Debug)]
pub struct RoundOutcome {
    /// The candidate's fate this round.
    pub status: RoundStatus,
    /// Siblings spawned by disjunctive rules, to be merged into the active
    /// set by the driver. Populated even when the spawning candidate closed
    /// later in the same round.
    pub spawned: Vec<ModelCandidate>,
}

/// One branch of the tableau: a labeled possible-world graph under
/// construction.
#[derive(Debug, Clone)]
pub struct ModelCandidate {
    graph: AccessibilityGraph,
    /// Dense per-world state, indexed by `WorldId`.
    worlds: Vec<WorldState>,
}

impl ModelCandidate {
    /// Create a candidate with a single root world holding `root` in its
    /// current-round queue.
    pub fn new(frame: FrameProperties, root: Arc<Formula>) -> Self {
        let mut candidate = Self {
            graph: AccessibilityGraph::new(frame),
            worlds: Vec::new(),
        };
        let world = candidate.graph.add_world();
        candidate.worlds.push(WorldState::default());
        candidate.worlds[world.index()].current.push_back(root);
        if frame.reflexive {
            candidate.connect_known(world, world);
        }
        candidate
    }

    /// The frame conditions in force, shared by every sibling.
    pub fn frame(&self) -> FrameProperties {
        self.graph.frame()
    }

    /// Allocate a fresh world seeded with `formula` in its next-round queue.
    ///
    /// Used by the diamond rule mid-round; the new world's formulas are only
    /// picked up after the round boundary.
    pub fn spawn_world(&mut self, formula: Arc<Formula>) -> WorldId {
        let world = self.graph.add_world();
        self.worlds.push(WorldState::default());
        self.worlds[world.index()].next.push(formula);
        if self.frame().reflexive {
            self.connect_known(world, world);
        }
        tracing::trace!(world = %world, "spawned world");
        world
    }

    /// Connect `from` to `to`, cascading closure edges, and copy the source
    /// world's inherited obligations across every edge actually inserted.
    ///
    /// Idempotent; errors only on a world id foreign to this candidate.
    pub fn connect(&mut self, from: WorldId, to: WorldId) -> TableauResult<()> {
        self.ensure_world(from)?;
        self.ensure_world(to)?;
        self.connect_known(from, to);
        Ok(())
    }

    /// Assert `atom` true at `world`.
    ///
    /// Returns `false` without mutating if the atom is already asserted
    /// false there — the branch-closing contradiction.
    pub fn assert_true(&mut self, world: WorldId, atom: &str) -> TableauResult<bool> {
        let state = self.world_state_mut(world)?;
        if state.false_atoms.contains(atom) {
            return Ok(false);
        }
        state.true_atoms.insert(atom.to_owned());
        Ok(true)
    }

    /// Assert `atom` false at `world`. Mirror image of [`Self::assert_true`].
    pub fn assert_false(&mut self, world: WorldId, atom: &str) -> TableauResult<bool> {
        let state = self.world_state_mut(world)?;
        if state.true_atoms.contains(atom) {
            return Ok(false);
        }
        state.false_atoms.insert(atom.to_owned());
        Ok(true)
    }

    /// Deep-copy this candidate for disjunctive branching.
    ///
    /// The sibling shares the frame conditions and graph structure, deep
    /// copies of truth assignments and inherited obligations, and for each
    /// world a current-round queue seeded from the parent's next-round queue
    /// followed by the parent's not-yet-processed current formulas. Its
    /// next-round queues start empty.
    pub fn branch(&self) -> Self {
        let mut sibling = self.clone();
        for state in &mut sibling.worlds {
            let remaining = std::mem::take(&mut state.current);
            let mut seeded: VecDeque<Arc<Formula>> = state.next.drain(..).collect();
            seeded.extend(remaining);
            state.current = seeded;
        }
        sibling
    }

    /// True iff every world's current- and next-round queues are empty.
    pub fn is_model(&self) -> bool {
        self.worlds
            .iter()
            .all(|state| state.current.is_empty() && state.next.is_empty())
    }

    /// Run one expansion round: drain every world's current-round queue
    /// through the rule set, then promote next-round queues.
    ///
    /// A contradiction aborts the rest of the round immediately; siblings
    /// spawned earlier in the round are still returned.
    pub fn run_round(&mut self) -> TableauResult<RoundOutcome> {
        let mut spawned = Vec::new();
        // Worlds spawned mid-round seed next-round queues only, so the
        // pre-round world count covers all current work.
        let world_count = self.worlds.len();
        for index in 0..world_count {
            let world = WorldId::new(index as u32);
            while let Some(formula) = self.worlds[index].current.pop_front() {
                tracing::trace!(world = %world, formula = %formula, "expanding");
                if !self.expand(world, formula, &mut spawned)? {
                    tracing::debug!(world = %world, "contradiction closed this branch");
                    return Ok(RoundOutcome {
                        status: RoundStatus::Closed,
                        spawned,
                    });
                }
            }
        }

        for state in &mut self.worlds {
            debug_assert!(state.current.is_empty());
            state.current = state.next.drain(..).collect();
        }

        let status = if self.is_model() {
            RoundStatus::Model
        } else {
            RoundStatus::Open
        };
        Ok(RoundOutcome { status, spawned })
    }

    // -- read-only surface for rendering a terminal model --------------------

    /// All world ids, ascending.
    pub fn world_ids(&self) -> impl Iterator<Item = WorldId> + '_ {
        self.graph.world_ids()
    }

    /// Number of worlds.
    pub fn world_count(&self) -> usize {
        self.worlds.len()
    }

    /// All accessibility edges, sorted.
    pub fn edges(&self) -> Vec<(WorldId, WorldId)> {
        self.graph.edges()
    }

    /// Atoms asserted true at `world`.
    pub fn true_atoms(&self, world: WorldId) -> TableauResult<&HashSet<String>> {
        Ok(&self.world_state(world)?.true_atoms)
    }

    /// Atoms asserted false at `world`.
    pub fn false_atoms(&self, world: WorldId) -> TableauResult<&HashSet<String>> {
        Ok(&self.world_state(world)?.false_atoms)
    }

    // -- internals shared with the rule set ----------------------------------

    pub(crate) fn queue_next(&mut self, world: WorldId, formula: Arc<Formula>) {
        self.worlds[world.index()].next.push(formula);
    }

    pub(crate) fn queue_current(&mut self, world: WorldId, formula: Arc<Formula>) {
        self.worlds[world.index()].current.push_back(formula);
    }

    /// Record a box obligation at `world`: every current child receives it in
    /// its next-round queue, and [`Self::connect`] replays it to every future
    /// child.
    pub(crate) fn enforce_on_children(&mut self, world: WorldId, formula: Arc<Formula>) {
        self.worlds[world.index()].inherited.push(formula.clone());
        for child in self.graph.successors(world) {
            self.worlds[child.index()].next.push(formula.clone());
        }
    }

    pub(crate) fn successors(&self, world: WorldId) -> Vec<WorldId> {
        self.graph.successors(world)
    }

    pub(crate) fn has_successors(&self, world: WorldId) -> bool {
        self.graph.has_successors(world)
    }

    pub(crate) fn connect_known(&mut self, from: WorldId, to: WorldId) {
        for (source, target) in self.graph.insert_edge(from, to) {
            let obligations = self.worlds[source.index()].inherited.clone();
            self.worlds[target.index()].next.extend(obligations);
        }
    }

    fn ensure_world(&self, world: WorldId) -> TableauResult<()> {
        if self.graph.contains(world) {
            Ok(())
        } else {
            Err(TableauError::UnknownWorld { world })
        }
    }

    fn world_state(&self, world: WorldId) -> TableauResult<&WorldState> {
        self.worlds
            .get(world.index())
            .ok_or(TableauError::UnknownWorld { world })
    }

    fn world_state_mut(&mut self, world: WorldId) -> TableauResult<&mut WorldState> {
        self.worlds
            .get_mut(world.index())
            .ok_or(TableauError::UnknownWorld { world })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(n: u32) -> WorldId {
        WorldId::new(n)
    }

    fn candidate(frame: FrameProperties) -> ModelCandidate {
        ModelCandidate::new(frame, Formula::atom("root"))
    }

    #[test]
    fn root_world_holds_the_formula() {
        let c = candidate(FrameProperties::K);
        assert_eq!(c.world_count(), 1);
        assert!(!c.is_model());
        assert!(c.edges().is_empty());
    }

    #[test]
    fn reflexive_root_gets_a_self_loop() {
        let c = candidate(FrameProperties::T);
        assert_eq!(c.edges(), vec![(w(0), w(0))]);
    }

    #[test]
    fn assignments_stay_disjoint() {
        let mut c = candidate(FrameProperties::K);
        assert!(c.assert_true(w(0), "p").unwrap());
        assert!(!c.assert_false(w(0), "p").unwrap());
        // The failed assertion must not have mutated the false set.
        assert!(c.false_atoms(w(0)).unwrap().is_empty());
        assert!(c.true_atoms(w(0)).unwrap().contains("p"));
    }

    #[test]
    fn assert_against_unknown_world_is_fatal() {
        let mut c = candidate(FrameProperties::K);
        let err = c.assert_true(w(5), "p").unwrap_err();
        assert!(matches!(
            err,
            crate::error::TableauError::UnknownWorld { world } if world == w(5)
        ));
    }

    #[test]
    fn connect_copies_inherited_obligations() {
        let mut c = candidate(FrameProperties::K);
        let child = c.spawn_world(Formula::atom("q"));
        c.enforce_on_children(w(0), Formula::atom("boxed"));
        // A second child connected later must receive the obligation too.
        let late = c.spawn_world(Formula::atom("r"));
        c.connect(w(0), late).unwrap();
        let sibling = c.branch();
        let queued: Vec<String> = sibling.worlds[late.index()]
            .current
            .iter()
            .map(|f| f.to_string())
            .collect();
        assert!(queued.contains(&"boxed".to_string()));
        // The early child only had the obligation pushed directly.
        c.connect(w(0), child).unwrap();
        let direct: Vec<String> = c.worlds[child.index()]
            .next
            .iter()
            .map(|f| f.to_string())
            .collect();
        assert!(direct.contains(&"boxed".to_string()));
    }

    #[test]
    fn connect_is_idempotent_for_obligations() {
        let mut c = candidate(FrameProperties::K);
        let child = c.spawn_world(Formula::atom("q"));
        c.enforce_on_children(w(0), Formula::atom("boxed"));
        c.connect(w(0), child).unwrap();
        let before = c.worlds[child.index()].next.len();
        c.connect(w(0), child).unwrap();
        assert_eq!(c.worlds[child.index()].next.len(), before);
    }

    #[test]
    fn branch_preserves_frame_and_assignments() {
        let mut c = candidate(FrameProperties::S5);
        c.assert_true(w(0), "p").unwrap();
        let sibling = c.branch();
        assert_eq!(sibling.frame(), FrameProperties::S5);
        assert!(sibling.true_atoms(w(0)).unwrap().contains("p"));
    }

    #[test]
    fn branch_seeds_current_from_next_then_unprocessed() {
        let mut c = candidate(FrameProperties::K);
        c.queue_next(w(0), Formula::atom("from-next"));
        let sibling = c.branch();
        let order: Vec<String> = sibling.worlds[0]
            .current
            .iter()
            .map(|f| f.to_string())
            .collect();
        // Next-round formulas come first, then the unprocessed current one.
        assert_eq!(order, vec!["from-next".to_string(), "root".to_string()]);
        assert!(sibling.worlds[0].next.is_empty());
    }

    #[test]
    fn branch_does_not_alias_parent_state() {
        let mut c = candidate(FrameProperties::K);
        let mut sibling = c.branch();
        sibling.assert_true(w(0), "only-in-sibling").unwrap();
        sibling.spawn_world(Formula::atom("x"));
        assert!(!c.true_atoms(w(0)).unwrap().contains("only-in-sibling"));
        assert_eq!(c.world_count(), 1);
        c.assert_false(w(0), "only-in-parent").unwrap();
        assert!(!sibling.false_atoms(w(0)).unwrap().contains("only-in-parent"));
    }

    #[test]
    fn spawn_world_seeds_next_round() {
        let mut c = candidate(FrameProperties::K);
        let child = c.spawn_world(Formula::atom("q"));
        assert_eq!(child, w(1));
        assert!(c.worlds[child.index()].current.is_empty());
        assert_eq!(c.worlds[child.index()].next.len(), 1);
    }

    #[test]
    fn is_model_after_draining_everything() {
        let mut c = candidate(FrameProperties::K);
        let outcome = c.run_round().unwrap();
        // `root` is an atom: asserted true, nothing queued after promotion.
        assert_eq!(outcome.status, RoundStatus::Model);
        assert!(c.is_model());
        assert!(c.true_atoms(w(0)).unwrap().contains("root"));
    }
}
