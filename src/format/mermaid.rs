// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mermaid `flowchart` export.
//!
//! Node ids are arbitrary strings, so each node gets a positional Mermaid identifier (`n0`,
//! `n1`, ...) in first-insertion order. Labels are written as quoted strings with Mermaid
//! entity escapes.

use std::collections::HashMap;
use std::fmt;

use crate::model::{NodeId, TreeGraph};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MermaidExportError {
    MissingNode { node_id: NodeId },
}

impl fmt::Display for MermaidExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNode { node_id } => {
                write!(f, "edge references missing node id: {node_id}")
            }
        }
    }
}

impl std::error::Error for MermaidExportError {}

pub fn export_flowchart(graph: &TreeGraph) -> Result<String, MermaidExportError> {
    let mut out = String::new();
    out.push_str("flowchart TD\n");

    let mut positions = HashMap::<&NodeId, usize>::with_capacity(graph.nodes().len());
    let mut ident = itoa::Buffer::new();
    for (idx, node) in graph.nodes().iter().enumerate() {
        positions.insert(node.id(), idx);
        out.push('n');
        out.push_str(ident.format(idx));
        out.push_str("[\"");
        push_label(&mut out, node.label());
        out.push_str("\"]\n");
    }

    let lookup = |node_id: &NodeId| {
        positions
            .get(node_id)
            .copied()
            .ok_or_else(|| MermaidExportError::MissingNode { node_id: node_id.clone() })
    };
    for edge in graph.edges() {
        let from = lookup(edge.parent())?;
        let to = lookup(edge.child())?;
        out.push('n');
        out.push_str(ident.format(from));
        out.push_str(" --- n");
        out.push_str(ident.format(to));
        out.push('\n');
    }

    Ok(out)
}

fn push_label(out: &mut String, label: &str) {
    for ch in label.chars() {
        match ch {
            '"' => out.push_str("#quot;"),
            '#' => out.push_str("#35;"),
            '<' => out.push_str("#lt;"),
            '>' => out.push_str("#gt;"),
            '\n' => out.push_str("<br/>"),
            '\r' => {}
            other => out.push(other),
        }
    }
}
