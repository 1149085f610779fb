//! # modal-tableau
//!
//! Satisfiability for propositional modal logic by the semantic-tableau
//! method: the solver grows a forest of labeled possible-world graphs
//! (Kripke models under construction), expanding formulas rule-by-rule until
//! either an open branch yields a model or every branch closes on a
//! contradiction.
//!
//! ## Architecture
//!
//! - **Formulas** (`formula`): immutable, `Arc`-shared operator trees
//! - **Frames** (`frame`): reflexive/symmetric/transitive accessibility,
//!   selecting K, T, B, S4, S5 and friends
//! - **Graph** (`graph`): petgraph-backed accessibility relation with
//!   incremental closure at edge-insertion time
//! - **Candidates** (`candidate`, `rules`): one tableau branch each — world
//!   queues, truth assignments, box obligations, the expansion rule set
//! - **Solver** (`solver`): the round driver over the active candidate set,
//!   optionally fanning rounds out across the rayon thread pool
//!
//! ## Library usage
//!
//! ```
//! use modal_tableau::formula::Formula;
//! use modal_tableau::frame::FrameProperties;
//! use modal_tableau::solver::Solver;
//!
//! // <>p & []~p: the diamond's witness world must make p both true
//! // and false, so every branch closes.
//! let f = Formula::and(
//!     Formula::possibly(Formula::atom("p")),
//!     Formula::necessarily(Formula::not(Formula::atom("p"))),
//! );
//! let verdict = Solver::for_frame(FrameProperties::K).solve(f).unwrap();
//! assert!(!verdict.is_satisfiable());
//! ```

pub mod candidate;
pub mod error;
pub mod export;
pub mod formula;
pub mod frame;
pub mod graph;
pub mod rules;
pub mod solver;
