//! Modal formula trees.
//!
//! A [`Formula`] is either an atomic proposition or one of six compound
//! shapes: negation, conjunction, disjunction, implication, necessity (box)
//! and possibility (diamond). Formulas are immutable once built and shared by
//! `Arc` — candidates never mutate a formula, only the queues referencing it,
//! so branching a candidate never copies formula structure.
//!
//! The parser that produces these trees lives outside this crate; here the
//! trees are built through the constructor functions, each of which returns
//! an `Arc<Formula>` ready to be queued or nested.

use std::fmt;
use std::sync::Arc;

/// A propositional modal formula.
///
/// The enum is exhaustive by construction: rule dispatch matches on it, and
/// adding a new operator is a compile error until every rule site handles it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    /// An atomic proposition, identified by name.
    Atom(String),
    /// Negation: `~phi`.
    Not(Arc<Formula>),
    /// Conjunction: `phi & psi`.
    And(Arc<Formula>, Arc<Formula>),
    /// Disjunction: `phi | psi`.
    Or(Arc<Formula>, Arc<Formula>),
    /// Material implication: `phi -> psi`.
    Implies(Arc<Formula>, Arc<Formula>),
    /// Necessity (box): `[]phi` — phi holds in every accessible world.
    Necessity(Arc<Formula>),
    /// Possibility (diamond): `<>phi` — phi holds in some accessible world.
    Possibility(Arc<Formula>),
}

impl Formula {
    /// Build an atomic proposition.
    pub fn atom(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Formula::Atom(name.into()))
    }

    /// Build `~phi`.
    pub fn not(phi: Arc<Self>) -> Arc<Self> {
        Arc::new(Formula::Not(phi))
    }

    /// Build `phi & psi`.
    pub fn and(phi: Arc<Self>, psi: Arc<Self>) -> Arc<Self> {
        Arc::new(Formula::And(phi, psi))
    }

    /// Build `phi | psi`.
    pub fn or(phi: Arc<Self>, psi: Arc<Self>) -> Arc<Self> {
        Arc::new(Formula::Or(phi, psi))
    }

    /// Build `phi -> psi`.
    pub fn implies(phi: Arc<Self>, psi: Arc<Self>) -> Arc<Self> {
        Arc::new(Formula::Implies(phi, psi))
    }

    /// Build `[]phi`.
    pub fn necessarily(phi: Arc<Self>) -> Arc<Self> {
        Arc::new(Formula::Necessity(phi))
    }

    /// Build `<>phi`.
    pub fn possibly(phi: Arc<Self>) -> Arc<Self> {
        Arc::new(Formula::Possibility(phi))
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atom(name) => write!(f, "{name}"),
            Formula::Not(phi) => write!(f, "~{phi}"),
            Formula::And(phi, psi) => write!(f, "({phi} & {psi})"),
            Formula::Or(phi, psi) => write!(f, "({phi} | {psi})"),
            Formula::Implies(phi, psi) => write!(f, "({phi} -> {psi})"),
            Formula::Necessity(phi) => write!(f, "[]{phi}"),
            Formula::Possibility(phi) => write!(f, "<>{phi}"),
        }
    }
}
