//! Clique graph to DOT (Graphviz) conversion.
//!
//! This module renders the Clique stage of a reduction in DOT format, so it can be
//! visualized with Graphviz tools like `dot`, `neato`, or online viewers.
//!
//! # DOT Format
//!
//! The generated DOT output follows these conventions:
//! - **Nodes** are literal occurrences, labeled with the literal text and filled
//!   with a color chosen by their source clause
//! - **Clusters**: nodes of the same clause are optionally grouped in a
//!   `subgraph cluster_<k>` box labeled `Clause k`
//! - **Edges** are undirected and connect compatible literals of different clauses
//!
//! # Examples
//!
//! ```
//! use clique_reduce::reduce::process_formula;
//!
//! let data = process_formula("(A OR B) AND (NOT A OR C)").unwrap();
//! let dot = data.clique.to_dot().unwrap();
//! // Write to file and render with: neato -Tpng output.dot -o output.png
//! assert!(dot.starts_with("graph {"));
//! ```

use std::fmt::Write as _;

use crate::clique::CliqueStep;
use crate::types::ClauseIndex;

/// Fill colors cycled through by clause index.
pub const CLAUSE_PALETTE: [&str; 6] = ["lightblue", "lightsalmon", "palegreen", "plum", "khaki", "lightcyan"];

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for standard settings.
///
/// # Examples
///
/// ```
/// use clique_reduce::dot::DotConfig;
/// use clique_reduce::reduce::process_formula;
///
/// let data = process_formula("A AND NOT B").unwrap();
/// let config = DotConfig {
///     node_shape: "box",
///     cluster_clauses: false,
///     ..DotConfig::default()
/// };
///
/// let dot = data.clique.to_dot_with_config(&config).unwrap();
/// assert!(!dot.contains("subgraph"));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for literal nodes (default: "circle")
    pub node_shape: &'static str,
    /// Style for compatibility edges (default: "solid")
    pub edge_style: &'static str,
    /// Whether to group each clause into its own cluster (default: true)
    pub cluster_clauses: bool,
    /// Whether to fill nodes with a per-clause color (default: true)
    pub color_by_clause: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            edge_style: "solid",
            cluster_clauses: true,
            color_by_clause: true,
        }
    }
}

/// Quotes a string as a DOT identifier.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn clause_color(clause: ClauseIndex) -> &'static str {
    CLAUSE_PALETTE[clause.position() % CLAUSE_PALETTE.len()]
}

impl CliqueStep {
    /// Converts the Clique graph to DOT (Graphviz) format.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - A DOT-formatted string representation of the graph
    /// * `Err(std::fmt::Error)` - If string formatting fails (rare)
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the Clique graph to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "node [shape={}];", config.node_shape)?;
        writeln!(dot, "edge [style={}];", config.edge_style)?;

        let mut clauses: Vec<ClauseIndex> = self.nodes.iter().map(|n| n.clause).collect();
        clauses.dedup();

        for clause in clauses {
            if config.cluster_clauses {
                writeln!(dot, "subgraph cluster_{} {{", clause)?;
                writeln!(dot, "label={};", quote(&format!("Clause {}", clause)))?;
            }
            for node in self.clause_nodes(clause) {
                if config.color_by_clause {
                    writeln!(
                        dot,
                        "{} [label={}, style=filled, fillcolor={}];",
                        quote(&node.id),
                        quote(&node.label),
                        clause_color(clause)
                    )?;
                } else {
                    writeln!(dot, "{} [label={}];", quote(&node.id), quote(&node.label))?;
                }
            }
            if config.cluster_clauses {
                writeln!(dot, "}}")?;
            }
        }

        for edge in self.edges.iter() {
            writeln!(dot, "{} -- {};", quote(&edge.source), quote(&edge.target))?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::reduce::process_formula;

    /// Basic test: verify DOT output is generated without errors
    #[test]
    fn test_to_dot_basic() {
        let data = process_formula("(A OR B) AND (NOT A OR C)").unwrap();
        let dot = data.clique.to_dot().unwrap();

        assert!(dot.starts_with("graph {"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("subgraph cluster_1 {"));
        assert!(dot.contains("subgraph cluster_2 {"));
        assert!(dot.contains("label=\"Clause 2\";"));
        assert!(dot.contains("\"¬A_2\" [label=\"¬A\", style=filled, fillcolor=lightsalmon];"));
    }

    #[test]
    fn test_to_dot_counts() {
        let data = process_formula("(P OR Q) AND (NOT P OR R) AND (NOT Q OR R)").unwrap();
        let dot = data.clique.to_dot().unwrap();

        let node_lines = dot.lines().filter(|l| l.contains("[label=")).count();
        assert_eq!(node_lines, data.clique.nodes.len());
        let edge_lines = dot.lines().filter(|l| l.contains(" -- ")).count();
        assert_eq!(edge_lines, data.clique.edges.len());
    }

    /// Test with custom configuration
    #[test]
    fn test_to_dot_with_config() {
        let data = process_formula("A AND B").unwrap();
        let config = DotConfig {
            node_shape: "ellipse",
            cluster_clauses: false,
            color_by_clause: false,
            ..DotConfig::default()
        };

        let dot = data.clique.to_dot_with_config(&config).unwrap();
        assert!(dot.contains("node [shape=ellipse];"));
        assert!(!dot.contains("subgraph"));
        assert!(!dot.contains("fillcolor"));
        assert!(dot.contains("\"A_1\" -- \"B_2\";"));
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(clause_color(ClauseIndex::new(1)), "lightblue");
        assert_eq!(clause_color(ClauseIndex::new(7)), "lightblue");
        assert_eq!(clause_color(ClauseIndex::new(8)), "lightsalmon");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote(""), "\"\"");
    }

    /// Helper test to write DOT file for manual inspection (disabled by default)
    #[test]
    #[ignore]
    fn test_write_dot_file() {
        let data = process_formula("(P OR Q) AND (NOT P OR R) AND (NOT Q OR R)").unwrap();
        let dot = data.clique.to_dot().unwrap();

        std::fs::write("test_output.dot", &dot).unwrap();
        println!("DOT output:\n{}", dot);

        for format in ["png", "svg"] {
            let output = std::process::Command::new("neato")
                .arg(format!("-T{}", format))
                .arg("test_output.dot")
                .arg("-o")
                .arg(format!("test_output.{}", format))
                .output();

            if let Ok(output) = output {
                if output.status.success() {
                    println!("Generated test_output.{}", format);
                }
            }
        }
    }
}
