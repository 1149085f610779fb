//! Frame conditions on the accessibility relation.
//!
//! The three classic frame attributes — reflexive, symmetric, transitive —
//! select the modal logic the tableau decides. They are fixed for the
//! lifetime of a search and inherited unchanged by every branched candidate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The accessibility-relation attributes in force for a search.
///
/// Closure under these attributes is enforced incrementally at edge-insertion
/// time by [`crate::graph::AccessibilityGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameProperties {
    /// Every world accesses itself.
    pub reflexive: bool,
    /// Every edge has a reverse edge.
    pub symmetric: bool,
    /// The edge set is closed under composition.
    pub transitive: bool,
}

impl FrameProperties {
    /// The minimal logic K: no frame conditions.
    pub const K: Self = Self {
        reflexive: false,
        symmetric: false,
        transitive: false,
    };

    /// Logic T: reflexive frames.
    pub const T: Self = Self {
        reflexive: true,
        symmetric: false,
        transitive: false,
    };

    /// Logic B: reflexive and symmetric frames.
    pub const B: Self = Self {
        reflexive: true,
        symmetric: true,
        transitive: false,
    };

    /// Logic S4: reflexive and transitive frames.
    pub const S4: Self = Self {
        reflexive: true,
        symmetric: false,
        transitive: true,
    };

    /// Logic S5: equivalence-relation frames.
    pub const S5: Self = Self {
        reflexive: true,
        symmetric: true,
        transitive: true,
    };

    /// Enable reflexivity.
    pub fn with_reflexive(mut self) -> Self {
        self.reflexive = true;
        self
    }

    /// Enable symmetry.
    pub fn with_symmetric(mut self) -> Self {
        self.symmetric = true;
        self
    }

    /// Enable transitivity.
    pub fn with_transitive(mut self) -> Self {
        self.transitive = true;
        self
    }
}

impl fmt::Display for FrameProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.reflexive, self.symmetric, self.transitive) {
            (false, false, false) => write!(f, "K"),
            (true, false, false) => write!(f, "T"),
            (false, true, false) => write!(f, "KB"),
            (false, false, true) => write!(f, "K4"),
            (true, true, false) => write!(f, "B"),
            (true, false, true) => write!(f, "S4"),
            (false, true, true) => write!(f, "K45"),
            (true, true, true) => write!(f, "S5"),
        }
    }
}
