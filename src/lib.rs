//! # clique-reduce: SAT → 3-SAT → Clique, step by step
//!
//! **`clique-reduce`** turns a Boolean formula typed by a user into the three stages of the
//! classic NP-completeness reduction chain, ready to be displayed by a visualizer:
//!
//! 1. **SAT**: the formula as typed (trimmed).
//! 2. **3-CNF**: a list of clauses with exactly three literals each.
//! 3. **Clique**: a graph with one node per literal occurrence and an edge between every
//!    pair of compatible literals from different clauses.
//!
//! A clique of size `k` (the number of clauses) in the final graph picks one literal per
//! clause with no two of them contradicting each other.
//!
//! ## Caveat: this is not a real CNF conversion
//!
//! The input is expected to be a flat AND of ORs, e.g. `(A OR B) AND (NOT A OR C)`.
//! Clauses are padded (repeat the last literal) or truncated (drop everything after the
//! third literal) to width 3. Truncation can change satisfiability. Malformed input never
//! fails; it just produces a meaningless reduction.
//!
//! ## Basic Usage
//!
//! ```rust
//! use clique_reduce::reduce::process_formula;
//!
//! let data = process_formula("(A OR B) AND (NOT A OR C)").unwrap();
//!
//! assert_eq!(data.sat.formula, "(A OR B) AND (NOT A OR C)");
//! assert_eq!(data.cnf3.to_formula_string(), "(A ∨ B ∨ B) ∧ (¬A ∨ C ∨ C)");
//! assert_eq!(data.clique.nodes.len(), 6);
//! assert_eq!(data.clique.target_clique_size(), 2);
//! ```
//!
//! ## Core Components
//!
//! - **[`reduce`]**: The pipeline entry point [`process_formula`][crate::reduce::process_formula].
//! - **[`cnf`]**: Formula splitting and clause normalization.
//! - **[`clique`]**: Graph construction.
//! - **[`dot`]**: Graphviz export of the Clique graph.
//! - **[`server`]**: JSON-over-HTTP transport.

pub mod clique;
pub mod cnf;
pub mod dot;
pub mod literal;
pub mod reduce;
pub mod server;
pub mod types;
