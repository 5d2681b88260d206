//! Formula to 3-CNF conversion.
//!
//! The converter understands a flat conjunction of disjunctions:
//!
//! ```text
//! (A OR B) AND (NOT A OR C OR D)
//! ```
//!
//! Clauses are split on the `AND` keyword, literals on `OR`, and a leading `NOT` becomes `¬`.
//! Parentheses are simply deleted, so nested structure is **not** understood.
//!
//! # Lossy normalization
//!
//! Every clause is forced to exactly three literals:
//! - shorter clauses repeat their last literal (`A ∨ B` becomes `A ∨ B ∨ B`), which is harmless;
//! - longer clauses keep only their first three literals, which may change satisfiability.
//!
//! This is a visualization heuristic, not a satisfiability-preserving CNF transformation.

use std::collections::HashSet;
use std::fmt::{self, Display};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::literal::Literal;
use crate::types::ClauseIndex;

/// Number of literals in every normalized clause.
pub const CLAUSE_WIDTH: usize = 3;

pub const CNF3_EXPLANATION: &str =
    "Converted to 3-CNF with exactly 3 literals per clause. Each clause is a disjunction (OR) of three literals.";

lazy_static! {
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").expect("RE_WHITESPACE regex is valid");
    /// Clause separator: `AND` surrounded by whitespace, any case.
    static ref RE_AND: Regex = Regex::new(r"(?i)\s+AND\s+").expect("RE_AND regex is valid");
    /// Literal separator: `OR` surrounded by whitespace, any case.
    static ref RE_OR: Regex = Regex::new(r"(?i)\s+OR\s+").expect("RE_OR regex is valid");
}

/// A disjunction of exactly three literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Clause([Literal; CLAUSE_WIDTH]);

impl Clause {
    pub fn new(a: Literal, b: Literal, c: Literal) -> Self {
        Self([a, b, c])
    }

    /// Builds a clause from any number of literals.
    ///
    /// Fewer than three literals are padded by repeating the last one; extra literals
    /// beyond the third are discarded. An empty input yields three empty literals.
    pub fn from_literals<I>(literals: I) -> Self
    where
        I: IntoIterator<Item = Literal>,
    {
        let mut it = literals.into_iter();
        let first = it.next().unwrap_or_default();
        let second = it.next().unwrap_or_else(|| first.clone());
        let third = it.next().unwrap_or_else(|| second.clone());
        let dropped = it.count();
        if dropped > 0 {
            log::debug!("Clause truncated: dropped {} literal(s) after '{}'", dropped, third);
        }
        Self([first, second, third])
    }

    pub fn literals(&self) -> &[Literal; CLAUSE_WIDTH] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Literal> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = &self.0;
        write!(f, "{} ∨ {} ∨ {}", a, b, c)
    }
}

/// The 3-CNF stage of a reduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cnf3Step {
    pub clauses: Vec<Clause>,
    pub explanation: String,
}

impl Cnf3Step {
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Iterates clauses together with their 1-based index.
    pub fn indexed_clauses(&self) -> impl Iterator<Item = (ClauseIndex, &Clause)> {
        self.clauses
            .iter()
            .enumerate()
            .map(|(i, clause)| (ClauseIndex::from_position(i), clause))
    }

    /// Renders the clauses as a single formula, e.g. `(A ∨ B ∨ B) ∧ (¬A ∨ C ∨ C)`.
    pub fn to_formula_string(&self) -> String {
        self.clauses
            .iter()
            .map(|clause| format!("({})", clause))
            .collect::<Vec<_>>()
            .join(" ∧ ")
    }

    /// Distinct variable names in order of first appearance. Empty literals are skipped.
    pub fn variables(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for literal in self.clauses.iter().flat_map(|c| c.iter()) {
            let var = literal.variable();
            if !var.is_empty() && seen.insert(var.clone()) {
                result.push(var);
            }
        }
        result
    }
}

/// Converts a formula string into clauses of exactly three literals.
///
/// See the [module documentation][self] for the (lossy) normalization rules.
/// This never fails: an empty or malformed formula degrades into clauses of
/// empty or duplicated literals.
///
/// ```
/// use clique_reduce::cnf::convert_to_3cnf;
///
/// let step = convert_to_3cnf("(A OR B) AND (NOT A OR C)");
/// assert_eq!(step.to_formula_string(), "(A ∨ B ∨ B) ∧ (¬A ∨ C ∨ C)");
/// ```
pub fn convert_to_3cnf(formula: &str) -> Cnf3Step {
    let normalized = RE_WHITESPACE.replace_all(formula, " ");
    let normalized = normalized.trim();

    let clauses: Vec<Clause> = RE_AND.split(normalized).map(parse_clause).collect();
    log::debug!("Converted {:?} into {} clause(s)", normalized, clauses.len());

    Cnf3Step {
        clauses,
        explanation: CNF3_EXPLANATION.to_string(),
    }
}

fn parse_clause(segment: &str) -> Clause {
    let stripped: String = segment.chars().filter(|&c| c != '(' && c != ')').collect();
    Clause::from_literals(RE_OR.split(stripped.trim()).map(Literal::parse))
}
