//! Recursive-descent parser over the token stream.

use std::collections::HashMap;

use super::lexer::{self, Token, TokenKind};
use super::{DotEdge, DotError, DotGraph, DotNode};

/// Parse a DOT document into a [`DotGraph`].
pub fn parse(text: &str) -> Result<DotGraph, DotError> {
    let tokens = lexer::tokenize(text)?;
    Parser::new(tokens).run()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    graph: DotGraph,
    index: HashMap<String, usize>,
    /// Default `label` from a `node [...]` statement, applied to nodes
    /// created after it.
    node_default_label: Option<String>,
    /// Default `label` from an `edge [...]` statement.
    edge_default_label: Option<String>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            graph: DotGraph::default(),
            index: HashMap::new(),
            node_default_label: None,
            edge_default_label: None,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.peek().map(|t| &t.kind == kind).unwrap_or(false)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Position just past the last token, for end-of-input errors.
    fn eof_position(&self) -> (usize, usize) {
        match self.tokens.last() {
            Some(t) => (t.line, t.column + 1),
            None => (1, 1),
        }
    }

    fn error_here(&self, message: impl Into<String>) -> DotError {
        match self.peek() {
            Some(t) => DotError::new(t.line, t.column, message),
            None => {
                let (line, column) = self.eof_position();
                DotError::new(line, column, message)
            }
        }
    }

    fn expect_id(&mut self, what: &str) -> Result<(String, usize, usize), DotError> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Id(name),
                line,
                column,
            }) => {
                let found = (name.clone(), *line, *column);
                self.pos += 1;
                Ok(found)
            }
            Some(t) => Err(DotError::new(
                t.line,
                t.column,
                format!("expected {what}"),
            )),
            None => Err(self.error_here(format!("expected {what}, found end of input"))),
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<(), DotError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error_here(format!("expected {what}")))
        }
    }

    fn run(mut self) -> Result<DotGraph, DotError> {
        let (mut kw, mut line, mut column) = self.expect_id("'graph' or 'digraph'")?;
        if kw.eq_ignore_ascii_case("strict") {
            (kw, line, column) = self.expect_id("'graph' or 'digraph'")?;
        }
        if kw.eq_ignore_ascii_case("digraph") {
            self.graph.directed = true;
        } else if kw.eq_ignore_ascii_case("graph") {
            self.graph.directed = false;
        } else {
            return Err(DotError::new(line, column, "expected 'graph' or 'digraph'"));
        }

        if let Some(Token {
            kind: TokenKind::Id(_),
            ..
        }) = self.peek()
        {
            let (name, _, _) = self.expect_id("graph name")?;
            self.graph.name = Some(name);
        }

        self.expect(&TokenKind::LBrace, "'{'")?;
        loop {
            while self.eat(&TokenKind::Semicolon) || self.eat(&TokenKind::Comma) {}
            if self.at(&TokenKind::RBrace) {
                break;
            }
            if self.peek().is_none() {
                return Err(self.error_here("expected '}', found end of input"));
            }
            self.statement()?;
        }
        self.expect(&TokenKind::RBrace, "'}'")?;

        if let Some(t) = self.peek() {
            return Err(DotError::new(
                t.line,
                t.column,
                "trailing content after closing '}'",
            ));
        }
        Ok(self.graph)
    }

    fn statement(&mut self) -> Result<(), DotError> {
        if self.at(&TokenKind::LBrace) {
            return Err(self.error_here("subgraphs are not supported"));
        }
        let (id, line, column) = self.expect_id("an identifier")?;
        if id.eq_ignore_ascii_case("subgraph") {
            return Err(DotError::new(line, column, "subgraphs are not supported"));
        }

        // key = value at statement level is a graph attribute.
        if self.eat(&TokenKind::Equals) {
            let (value, _, _) = self.expect_id("an attribute value")?;
            self.graph.attrs.insert(id, value);
            return Ok(());
        }

        // node / edge / graph default-attribute statements.
        if self.at(&TokenKind::LBracket) {
            if id.eq_ignore_ascii_case("node") {
                let attrs = self.attr_lists()?;
                if let Some(label) = last_attr(&attrs, "label") {
                    self.node_default_label = Some(label);
                }
                return Ok(());
            }
            if id.eq_ignore_ascii_case("edge") {
                let attrs = self.attr_lists()?;
                if let Some(label) = last_attr(&attrs, "label") {
                    self.edge_default_label = Some(label);
                }
                return Ok(());
            }
            if id.eq_ignore_ascii_case("graph") {
                let attrs = self.attr_lists()?;
                self.graph.attrs.extend(attrs);
                return Ok(());
            }
        }

        self.reject_port()?;
        let first = self.intern_node(id);
        let mut chain = vec![first];

        loop {
            let (directed, op_line, op_column) = match self.peek() {
                Some(Token {
                    kind: TokenKind::Arrow,
                    line,
                    column,
                }) => (true, *line, *column),
                Some(Token {
                    kind: TokenKind::Line,
                    line,
                    column,
                }) => (false, *line, *column),
                _ => break,
            };
            self.pos += 1;
            if directed && !self.graph.directed {
                return Err(DotError::new(
                    op_line,
                    op_column,
                    "'->' is not allowed in an undirected graph (use '--')",
                ));
            }
            if !directed && self.graph.directed {
                return Err(DotError::new(
                    op_line,
                    op_column,
                    "'--' is not allowed in a digraph (use '->')",
                ));
            }
            if self.at(&TokenKind::LBrace) {
                return Err(self.error_here("subgraphs are not supported"));
            }
            let (name, nline, ncolumn) = self.expect_id("a node name")?;
            if name.eq_ignore_ascii_case("subgraph") {
                return Err(DotError::new(nline, ncolumn, "subgraphs are not supported"));
            }
            self.reject_port()?;
            let idx = self.intern_node(name);
            chain.push(idx);
        }

        let attrs = if self.at(&TokenKind::LBracket) {
            self.attr_lists()?
        } else {
            Vec::new()
        };

        if chain.len() == 1 {
            // Plain node statement; a repeated statement merges attributes.
            if let Some(label) = last_attr(&attrs, "label") {
                self.graph.nodes[first].label = Some(label);
            }
        } else {
            let label = last_attr(&attrs, "label").or_else(|| self.edge_default_label.clone());
            for pair in chain.windows(2) {
                self.graph.edges.push(DotEdge {
                    tail: pair[0],
                    head: pair[1],
                    label: label.clone(),
                });
            }
        }
        Ok(())
    }

    fn reject_port(&self) -> Result<(), DotError> {
        if self.at(&TokenKind::Colon) {
            Err(self.error_here("ports are not supported"))
        } else {
            Ok(())
        }
    }

    /// One or more consecutive `[ key = value, ... ]` groups.
    fn attr_lists(&mut self) -> Result<Vec<(String, String)>, DotError> {
        let mut attrs = Vec::new();
        while self.eat(&TokenKind::LBracket) {
            loop {
                while self.eat(&TokenKind::Comma) || self.eat(&TokenKind::Semicolon) {}
                if self.eat(&TokenKind::RBracket) {
                    break;
                }
                let (key, _, _) = self.expect_id("an attribute name or ']'")?;
                self.expect(&TokenKind::Equals, "'=' after attribute name")?;
                let (value, _, _) = self.expect_id("an attribute value")?;
                attrs.push((key, value));
            }
        }
        Ok(attrs)
    }

    /// Look up a node by name, creating it on first mention.
    fn intern_node(&mut self, name: String) -> usize {
        if let Some(&idx) = self.index.get(&name) {
            return idx;
        }
        let idx = self.graph.nodes.len();
        self.graph.nodes.push(DotNode {
            name: name.clone(),
            label: self.node_default_label.clone(),
        });
        self.index.insert(name, idx);
        idx
    }
}

/// Last occurrence of an attribute wins, as in Graphviz.
fn last_attr(attrs: &[(String, String)], key: &str) -> Option<String> {
    attrs
        .iter()
        .rev()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_digraph() {
        let g = parse("digraph {}").unwrap();
        assert!(g.directed);
        assert!(g.is_empty());
        assert!(g.edges.is_empty());
    }

    #[test]
    fn test_named_graph() {
        let g = parse("digraph deps { }").unwrap();
        assert_eq!(g.name.as_deref(), Some("deps"));
    }

    #[test]
    fn test_strict_keyword_ignored() {
        let g = parse("strict digraph { a -> b }").unwrap();
        assert_eq!(g.edges.len(), 1);
    }

    #[test]
    fn test_edge_chain_expands() {
        let g = parse("digraph { a -> b -> c }").unwrap();
        assert_eq!(g.nodes.len(), 3);
        assert_eq!(g.edges.len(), 2);
        assert_eq!((g.edges[0].tail, g.edges[0].head), (0, 1));
        assert_eq!((g.edges[1].tail, g.edges[1].head), (1, 2));
    }

    #[test]
    fn test_first_appearance_order() {
        let g = parse("digraph { b; a -> b; c }").unwrap();
        let names: Vec<_> = g.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_node_label_attribute() {
        let g = parse(r#"digraph { a [shape=box, label="Start here"] }"#).unwrap();
        assert_eq!(g.nodes[0].label.as_deref(), Some("Start here"));
    }

    #[test]
    fn test_repeated_node_statement_merges() {
        let g = parse(r#"digraph { a; a [label="second"] }"#).unwrap();
        assert_eq!(g.nodes.len(), 1);
        assert_eq!(g.nodes[0].label.as_deref(), Some("second"));
    }

    #[test]
    fn test_last_label_wins() {
        let g = parse(r#"digraph { a [label="x"][label="y"] }"#).unwrap();
        assert_eq!(g.nodes[0].label.as_deref(), Some("y"));
    }

    #[test]
    fn test_edge_label() {
        let g = parse(r#"digraph { a -> b [label="uses"] }"#).unwrap();
        assert_eq!(g.edges[0].label.as_deref(), Some("uses"));
    }

    #[test]
    fn test_node_default_label() {
        let g = parse(r#"digraph { node [label="N"]; a; b [label="own"] }"#).unwrap();
        assert_eq!(g.nodes[0].label.as_deref(), Some("N"));
        assert_eq!(g.nodes[1].label.as_deref(), Some("own"));
    }

    #[test]
    fn test_graph_attr_assignment() {
        let g = parse("digraph { rankdir = LR; a }").unwrap();
        assert_eq!(g.attrs.get("rankdir").map(String::as_str), Some("LR"));
    }

    #[test]
    fn test_graph_default_attrs() {
        let g = parse("digraph { graph [ranksep=2]; a }").unwrap();
        assert_eq!(g.attrs.get("ranksep").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_quoted_and_numeral_names() {
        let g = parse(r#"digraph { "hello world" -> 3.14 }"#).unwrap();
        assert_eq!(g.nodes[0].name, "hello world");
        assert_eq!(g.nodes[1].name, "3.14");
    }

    #[test]
    fn test_undirected_graph() {
        let g = parse("graph { a -- b }").unwrap();
        assert!(!g.directed);
        assert_eq!(g.edges.len(), 1);
    }

    #[test]
    fn test_self_edge() {
        let g = parse("digraph { a -> a }").unwrap();
        assert_eq!(g.nodes.len(), 1);
        assert_eq!((g.edges[0].tail, g.edges[0].head), (0, 0));
    }

    #[test]
    fn test_edge_op_mismatch() {
        let err = parse("digraph { a -- b }").unwrap_err();
        assert!(err.message.contains("'--' is not allowed in a digraph"));
        let err = parse("graph { a -> b }").unwrap_err();
        assert!(err.message.contains("'->' is not allowed"));
    }

    #[test]
    fn test_subgraph_rejected() {
        let err = parse("digraph { subgraph cluster_a { x } }").unwrap_err();
        assert!(err.message.contains("subgraphs are not supported"));
        assert_eq!(err.line, 1);
        let err = parse("digraph { a -> { b c } }").unwrap_err();
        assert!(err.message.contains("subgraphs are not supported"));
    }

    #[test]
    fn test_port_rejected() {
        let err = parse("digraph { a:n -> b }").unwrap_err();
        assert!(err.message.contains("ports are not supported"));
    }

    #[test]
    fn test_missing_header() {
        let err = parse("flowchart { a }").unwrap_err();
        assert!(err.message.contains("expected 'graph' or 'digraph'"));
    }

    #[test]
    fn test_unclosed_brace() {
        let err = parse("digraph { a -> b").unwrap_err();
        assert!(err.message.contains("end of input"));
    }

    #[test]
    fn test_trailing_content() {
        let err = parse("digraph { a } extra").unwrap_err();
        assert!(err.message.contains("trailing content"));
    }

    #[test]
    fn test_error_position_reported() {
        let err = parse("digraph {\n  a -> ;\n}").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 8);
    }

    #[test]
    fn test_comments_between_statements() {
        let text = "digraph { // first\n a -> b /* mid */ -> c # tail\n }";
        let g = parse(text).unwrap();
        assert_eq!(g.edges.len(), 2);
    }

    #[test]
    fn test_statement_separators() {
        let g = parse("digraph { a; b, c\n d }").unwrap();
        assert_eq!(g.nodes.len(), 4);
    }
}
