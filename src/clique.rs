//! 3-CNF to Clique graph construction.
//!
//! Every literal occurrence becomes a node tagged with its clause index. Two nodes are
//! connected iff they come from different clauses and their literals are not complementary.
//! A clique of size `k` (the number of clauses) then picks one literal per clause with no
//! conflicts between them, i.e. a satisfying choice for the 3-CNF formula.
//!
//! The pairwise compatibility check is quadratic in the number of literal occurrences.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cnf::Clause;
use crate::literal::Literal;
use crate::types::{ClauseIndex, Slot};

pub const CLIQUE_EXPLANATION: &str = "Graph where nodes represent literals and edges connect compatible literals from different clauses. A clique of size k (number of clauses) indicates a satisfying assignment exists.";

/// A literal occurrence in a specific clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique within one reduction: `{literal}_{clause}`, or `{literal}_{clause}({slot})` for
    /// repeated occurrences of the same literal inside one clause. Converted literals never
    /// contain parentheses, so the two forms cannot collide.
    pub id: String,
    /// The literal text.
    pub label: String,
    pub clause: ClauseIndex,
}

impl GraphNode {
    fn new(literal: &Literal, clause: ClauseIndex, slot: Slot, repeated: bool) -> Self {
        let id = if repeated {
            format!("{}_{}({})", literal, clause, slot.index() + 1)
        } else {
            format!("{}_{}", literal, clause)
        };
        Self {
            id,
            label: literal.to_string(),
            clause,
        }
    }

    pub fn literal(&self) -> Literal {
        Literal::from(self.label.as_str())
    }
}

/// An undirected edge between two compatible nodes, identified by node ids.
///
/// `source` is always the node emitted first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// The Clique stage of a reduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliqueStep {
    /// Clause-major, slot-minor order.
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub explanation: String,
}

impl CliqueStep {
    /// Size of a clique witnessing satisfiability: the number of clauses.
    pub fn target_clique_size(&self) -> usize {
        self.nodes.iter().map(|n| n.clause).collect::<BTreeSet<_>>().len()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn are_adjacent(&self, a: &str, b: &str) -> bool {
        self.edges.iter().any(|e| e.connects(a, b))
    }

    /// Nodes originating from the given clause, in slot order.
    pub fn clause_nodes(&self, clause: ClauseIndex) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.clause == clause)
    }
}

/// Builds the Clique-problem graph for the given clauses.
///
/// ```
/// use clique_reduce::clique::build_clique_graph;
/// use clique_reduce::cnf::convert_to_3cnf;
///
/// let cnf = convert_to_3cnf("(A OR B) AND (NOT A OR C)");
/// let graph = build_clique_graph(&cnf.clauses);
/// assert_eq!(graph.nodes.len(), 6);
/// assert_eq!(graph.edges.len(), 8);
/// assert!(!graph.are_adjacent("A_1", "¬A_2"));
/// ```
pub fn build_clique_graph(clauses: &[Clause]) -> CliqueStep {
    let mut nodes = Vec::with_capacity(clauses.len() * 3);
    let mut literals = Vec::with_capacity(clauses.len() * 3);

    for (position, clause) in clauses.iter().enumerate() {
        let index = ClauseIndex::from_position(position);
        for (slot, literal) in clause.iter().enumerate() {
            let repeated = clause.literals()[..slot].contains(literal);
            nodes.push(GraphNode::new(literal, index, Slot::from(slot), repeated));
            literals.push(literal);
        }
    }

    let mut edges = Vec::new();
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            if nodes[i].clause == nodes[j].clause {
                continue;
            }
            if literals[i].is_complementary(literals[j]) {
                continue;
            }
            edges.push(GraphEdge {
                source: nodes[i].id.clone(),
                target: nodes[j].id.clone(),
            });
        }
    }

    log::debug!(
        "Built clique graph: {} clause(s), {} node(s), {} edge(s)",
        clauses.len(),
        nodes.len(),
        edges.len()
    );

    CliqueStep {
        nodes,
        edges,
        explanation: CLIQUE_EXPLANATION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    use crate::cnf::convert_to_3cnf;
    use test_log::test;

    fn graph(formula: &str) -> CliqueStep {
        build_clique_graph(&convert_to_3cnf(formula).clauses)
    }

    #[test]
    fn test_node_order_and_ids() {
        let g = graph("(A OR B) AND (NOT A OR C)");
        let ids: Vec<&str> = g.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A_1", "B_1", "B_1(3)", "¬A_2", "C_2", "C_2(3)"]);
        let labels: Vec<&str> = g.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "B", "¬A", "C", "C"]);
        let clauses: Vec<u32> = g.nodes.iter().map(|n| n.clause.get()).collect();
        assert_eq!(clauses, vec![1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn test_edges() {
        let g = graph("(A OR B) AND (NOT A OR C)");
        assert_eq!(g.edges.len(), 8);
        assert!(!g.are_adjacent("A_1", "¬A_2"));
        assert!(g.are_adjacent("A_1", "C_2"));
        assert!(g.are_adjacent("B_1(3)", "¬A_2"));
        assert!(!g.are_adjacent("A_1", "B_1"));
        for edge in g.edges.iter() {
            let source = g.node(&edge.source).unwrap();
            let target = g.node(&edge.target).unwrap();
            assert_ne!(source.clause, target.clause);
            assert!(!source.literal().is_complementary(&target.literal()));
        }
    }

    #[test]
    fn test_edge_source_precedes_target() {
        let g = graph("(P OR Q) AND (NOT P OR R) AND (NOT Q OR R)");
        let position = |id: &str| g.nodes.iter().position(|n| n.id == id).unwrap();
        for edge in g.edges.iter() {
            assert!(position(&edge.source) < position(&edge.target));
        }
    }

    #[test]
    fn test_node_cardinality() {
        for (formula, clauses) in [("A", 1), ("A AND B", 2), ("(A OR B) AND (C) AND (NOT A OR D OR E OR F)", 3)] {
            let g = graph(formula);
            assert_eq!(g.nodes.len(), 3 * clauses);
            assert_eq!(g.target_clique_size(), clauses);
        }
    }

    #[test]
    fn test_node_ids_unique() {
        for formula in ["(A) AND (A OR A) AND (NOT A OR B OR NOT A OR C)", "(A OR A) AND A_1 AND A_1_2"] {
            let g = graph(formula);
            let ids: HashSet<&str> = g.nodes.iter().map(|n| n.id.as_str()).collect();
            assert_eq!(ids.len(), g.nodes.len(), "formula = {:?}", formula);
        }
    }

    #[test]
    fn test_single_clause_has_no_edges() {
        let g = graph("A OR B OR C");
        assert_eq!(g.nodes.len(), 3);
        assert!(g.edges.is_empty());
    }

    #[test]
    fn test_same_literal_across_clauses_is_connected() {
        let g = graph("A AND A");
        // 3 x 3 pairs across the two clauses, none complementary.
        assert_eq!(g.edges.len(), 9);
        assert!(g.are_adjacent("A_1", "A_2"));
    }

    #[test]
    fn test_fully_contradictory_clauses() {
        let g = graph("A AND NOT A");
        assert!(g.edges.is_empty());
    }

    #[test]
    fn test_empty_clause_list() {
        let g = build_clique_graph(&[]);
        assert!(g.nodes.is_empty());
        assert!(g.edges.is_empty());
        assert_eq!(g.target_clique_size(), 0);
        assert_eq!(g.explanation, CLIQUE_EXPLANATION);
    }

    #[test]
    fn test_clause_nodes() {
        let g = graph("(X OR Y OR Z) AND (NOT X OR W)");
        let second: Vec<&str> = g.clause_nodes(ClauseIndex::new(2)).map(|n| n.label.as_str()).collect();
        assert_eq!(second, vec!["¬X", "W", "W"]);
    }

    #[test]
    fn test_serialized_shape() {
        let g = graph("A AND NOT B");
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["nodes"][0], serde_json::json!({"id": "A_1", "label": "A", "clause": 1}));
        assert_eq!(json["edges"][0], serde_json::json!({"source": "A_1", "target": "¬B_2"}));
        assert_eq!(json["explanation"], CLIQUE_EXPLANATION);
    }
}
