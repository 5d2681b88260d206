//! The SAT → 3-CNF → Clique reduction pipeline.
//!
//! [`process_formula`] runs the whole chain in one pure, synchronous call and returns
//! a [`ReductionData`] record with one view per stage, each with a human-readable explanation.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::clique::{build_clique_graph, CliqueStep};
use crate::cnf::{convert_to_3cnf, Cnf3Step};

pub const SAT_EXPLANATION: &str = "Original SAT formula in Boolean form";

/// Formulas offered as starting points to users.
pub const EXAMPLE_FORMULAS: [&str; 3] = [
    "(A OR B) AND (NOT A OR C)",
    "(X OR Y OR Z) AND (NOT X OR W)",
    "(P OR Q) AND (NOT P OR R) AND (NOT Q OR R)",
];

/// Reduction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReduceError {
    /// Formula is missing, empty, or not text
    #[error("Invalid formula provided")]
    InvalidInput,

    /// Formula converts to more clauses than the caller allows
    #[error("Formula has {count} clauses, at most {max} are allowed")]
    TooManyClauses { count: usize, max: usize },

    /// Any other failure; the message is for logs, never for users
    #[error("Internal error: {0}")]
    Internal(String),
}

/// The SAT stage of a reduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatStep {
    pub formula: String,
    pub explanation: String,
}

/// All three stages of one reduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionData {
    pub sat: SatStep,
    pub cnf3: Cnf3Step,
    pub clique: CliqueStep,
}

impl Display for ReductionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SAT formula")?;
        writeln!(f, "  {}", self.sat.formula)?;
        writeln!(f, "  {}", self.sat.explanation)?;
        writeln!(f)?;

        writeln!(f, "3-CNF ({} clauses)", self.cnf3.clause_count())?;
        for (index, clause) in self.cnf3.indexed_clauses() {
            writeln!(f, "  Clause {}: {}", index, clause)?;
        }
        writeln!(f, "  = {}", self.cnf3.to_formula_string())?;
        writeln!(f, "  {}", self.cnf3.explanation)?;
        writeln!(f)?;

        writeln!(
            f,
            "Clique graph ({} nodes, {} edges, target clique size {})",
            self.clique.nodes.len(),
            self.clique.edges.len(),
            self.clique.target_clique_size()
        )?;
        for node in self.clique.nodes.iter() {
            writeln!(f, "  node {} [{}] clause {}", node.id, node.label, node.clause)?;
        }
        for edge in self.clique.edges.iter() {
            writeln!(f, "  edge {} -- {}", edge.source, edge.target)?;
        }
        writeln!(f, "  {}", self.clique.explanation)
    }
}

/// Reduces a SAT formula to 3-CNF and then to a Clique instance.
///
/// Returns [`ReduceError::InvalidInput`] for an empty string. Any other text is accepted:
/// malformed formulas (unbalanced parentheses, missing operators, whitespace only) produce
/// a structurally valid but meaningless reduction rather than an error.
///
/// The 3-CNF stage is a lossy normalization, see [`crate::cnf`].
///
/// ```
/// use clique_reduce::reduce::process_formula;
///
/// let data = process_formula("(A OR B) AND (NOT A OR C)").unwrap();
/// assert_eq!(data.cnf3.clauses.len(), 2);
/// assert_eq!(data.clique.nodes.len(), 6);
/// ```
pub fn process_formula(formula: &str) -> Result<ReductionData, ReduceError> {
    run_pipeline(formula, None)
}

/// Like [`process_formula`], but fails with [`ReduceError::TooManyClauses`] when the
/// 3-CNF stage has more than `max_clauses` clauses.
///
/// The check runs before the Clique graph is built, whose size grows quadratically
/// with the number of clauses.
///
/// ```
/// use clique_reduce::reduce::{process_formula_with_limit, ReduceError};
///
/// assert!(process_formula_with_limit("A AND B", 2).is_ok());
/// assert_eq!(
///     process_formula_with_limit("A AND B AND C", 2),
///     Err(ReduceError::TooManyClauses { count: 3, max: 2 })
/// );
/// ```
pub fn process_formula_with_limit(formula: &str, max_clauses: usize) -> Result<ReductionData, ReduceError> {
    run_pipeline(formula, Some(max_clauses))
}

fn run_pipeline(formula: &str, max_clauses: Option<usize>) -> Result<ReductionData, ReduceError> {
    if formula.is_empty() {
        log::warn!("Rejecting empty formula");
        return Err(ReduceError::InvalidInput);
    }

    let sat = SatStep {
        formula: formula.trim().to_string(),
        explanation: SAT_EXPLANATION.to_string(),
    };
    log::debug!("SAT stage: {:?}", sat.formula);

    let cnf3 = convert_to_3cnf(formula);
    if let Some(max) = max_clauses {
        let count = cnf3.clause_count();
        if count > max {
            log::warn!("Rejecting formula with {} clauses (limit {})", count, max);
            return Err(ReduceError::TooManyClauses { count, max });
        }
    }
    let clique = build_clique_graph(&cnf3.clauses);

    Ok(ReductionData { sat, cnf3, clique })
}

/// Extracts the formula from an untyped payload value.
///
/// Anything but a JSON string (`null`, numbers, arrays, objects) is rejected before
/// any parsing takes place.
pub fn formula_from_json(value: &Value) -> Result<&str, ReduceError> {
    match value {
        Value::String(formula) => Ok(formula.as_str()),
        other => {
            log::warn!("Rejecting non-textual formula: {}", other);
            Err(ReduceError::InvalidInput)
        }
    }
}
