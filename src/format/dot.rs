// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graphviz DOT export.

use std::borrow::Cow;

use memchr::{memchr, memchr3};

use crate::model::TreeGraph;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotOptions {
    pub graph_name: String,
    /// `strict` collapses repeated edges between the same pair of nodes.
    pub strict: bool,
    pub directed: bool,
    pub concentrate: bool,
    pub splines: Option<String>,
    pub node_shape: String,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            graph_name: "dtree".to_owned(),
            strict: true,
            directed: false,
            concentrate: true,
            splines: Some("polyline".to_owned()),
            node_shape: "box".to_owned(),
        }
    }
}

pub fn export_dot(graph: &TreeGraph, options: &DotOptions) -> String {
    let mut out = String::new();
    if options.strict {
        out.push_str("strict ");
    }
    out.push_str(if options.directed { "digraph " } else { "graph " });
    push_quoted(&mut out, &options.graph_name);
    out.push_str(" {\n");

    if options.concentrate {
        out.push_str("  concentrate=true;\n");
    }
    if let Some(splines) = &options.splines {
        out.push_str("  splines=");
        push_quoted(&mut out, splines);
        out.push_str(";\n");
    }
    out.push_str("  node [shape=");
    push_quoted(&mut out, &options.node_shape);
    out.push_str("];\n");

    for node in graph.nodes() {
        out.push_str("  ");
        push_quoted(&mut out, node.id().as_str());
        out.push_str(" [label=");
        push_quoted(&mut out, node.label());
        out.push_str("];\n");
    }

    let op = if options.directed { " -> " } else { " -- " };
    for edge in graph.edges() {
        out.push_str("  ");
        push_quoted(&mut out, edge.parent().as_str());
        out.push_str(op);
        push_quoted(&mut out, edge.child().as_str());
        out.push_str(";\n");
    }

    out.push_str("}\n");
    out
}

fn push_quoted(out: &mut String, value: &str) {
    out.push('"');
    out.push_str(&dot_escape(value));
    out.push('"');
}

fn dot_escape(value: &str) -> Cow<'_, str> {
    let bytes = value.as_bytes();
    if memchr3(b'"', b'\\', b'\n', bytes).is_none() && memchr(b'\r', bytes).is_none() {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{dot_escape, export_dot, DotOptions};
    use crate::model::{GraphSink, NodeId, TreeGraph};

    fn id(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    fn sample() -> TreeGraph {
        let mut graph = TreeGraph::new();
        graph.add_node(&NodeId::root(), "List");
        graph.add_node(&id("n0"), "s: say \"hi\"");
        graph.add_node(&id("n1"), "n: 1");
        graph.add_edge(&NodeId::root(), &id("n0"));
        graph.add_edge(&NodeId::root(), &id("n1"));
        graph
    }

    #[test]
    fn exports_strict_undirected_graph() {
        let dot = export_dot(&sample(), &DotOptions::default());
        assert_eq!(
            dot,
            concat!(
                "strict graph \"dtree\" {\n",
                "  concentrate=true;\n",
                "  splines=\"polyline\";\n",
                "  node [shape=\"box\"];\n",
                "  \"__init__\" [label=\"List\"];\n",
                "  \"n0\" [label=\"s: say \\\"hi\\\"\"];\n",
                "  \"n1\" [label=\"n: 1\"];\n",
                "  \"__init__\" -- \"n0\";\n",
                "  \"__init__\" -- \"n1\";\n",
                "}\n",
            )
        );
    }

    #[test]
    fn directed_output_uses_arrows() {
        let options = DotOptions {
            strict: false,
            directed: true,
            concentrate: false,
            splines: None,
            ..DotOptions::default()
        };
        let dot = export_dot(&sample(), &options);
        assert!(dot.starts_with("digraph \"dtree\" {\n  node [shape=\"box\"];\n"));
        assert!(dot.contains("\"__init__\" -> \"n0\";"));
        assert!(!dot.contains("concentrate"));
    }

    #[test]
    fn empty_graph_is_still_valid() {
        let dot = export_dot(&TreeGraph::new(), &DotOptions::default());
        assert!(dot.ends_with("node [shape=\"box\"];\n}\n"));
    }

    #[test]
    fn escaping_borrows_clean_labels() {
        assert!(matches!(dot_escape("n: 1"), Cow::Borrowed(_)));
        assert_eq!(dot_escape("a\\b\r\nc"), "a\\\\b\\nc");
    }
}
