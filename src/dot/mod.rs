//! Parsing for a scratchpad subset of the DOT graph-description language.
//!
//! The grammar covers what an interactive scratchpad needs: `graph` /
//! `digraph` headers (with an optional `strict` keyword), node statements,
//! edge chains (`a -> b -> c`), attribute lists, quoted and numeral
//! identifiers, and all three comment forms. Only the `label` attribute
//! is honored; everything else is parsed and ignored so that documents
//! written for Graphviz still load.
//!
//! Deliberately rejected with a positioned error: subgraphs/clusters,
//! ports (`a:n`), and HTML-like labels (`<...>`).

mod lexer;
mod parser;

use std::collections::HashMap;

pub use parser::parse;

/// A parse failure, positioned at the offending token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parse error at line {line}, column {column}: {message}")]
pub struct DotError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl DotError {
    fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// A parsed graph description, prior to layout.
///
/// Nodes keep first-appearance order (a node is created by its first
/// mention, whether in a node statement or as an edge endpoint); edges
/// keep statement order. Both orders are what the layout engine sees, so
/// parsing is fully deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DotGraph {
    /// True for `digraph`, false for `graph`.
    pub directed: bool,
    /// Optional graph name from the header.
    pub name: Option<String>,
    /// Nodes in first-appearance order.
    pub nodes: Vec<DotNode>,
    /// Edges in statement order; endpoints index into `nodes`.
    pub edges: Vec<DotEdge>,
    /// Graph-level attribute assignments (`rankdir = LR` and friends).
    /// Stored verbatim; the layout engine currently honors none of them.
    pub attrs: HashMap<String, String>,
}

impl DotGraph {
    /// Look up a node index by name.
    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }

    /// Whether the graph has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A node declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct DotNode {
    pub name: String,
    /// Explicit `label` attribute, if any; layout falls back to the name.
    pub label: Option<String>,
}

/// A single edge between two nodes.
///
/// An edge chain statement (`a -> b -> c`) expands into one `DotEdge` per
/// consecutive pair. Self-edges (`a -> a`) are legal.
#[derive(Debug, Clone, PartialEq)]
pub struct DotEdge {
    pub tail: usize,
    pub head: usize,
    /// Edge `label` attribute; parsed for fidelity, unused by layout.
    pub label: Option<String>,
}
