// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use super::ids::NodeId;

/// Drawing surface consumed by the tree builder.
///
/// `add_node` must tolerate being called twice with the same identity and label. The builder
/// never queries the sink for existing state.
pub trait GraphSink {
    fn add_node(&mut self, id: &NodeId, label: &str);
    fn add_edge(&mut self, parent: &NodeId, child: &NodeId);
}

impl<S: GraphSink + ?Sized> GraphSink for &mut S {
    fn add_node(&mut self, id: &NodeId, label: &str) {
        (**self).add_node(id, label);
    }

    fn add_edge(&mut self, parent: &NodeId, child: &NodeId) {
        (**self).add_edge(parent, child);
    }
}

/// One parent→child edge as emitted by the builder, in visit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    parent_id: NodeId,
    parent_label: String,
    child_id: NodeId,
    child_label: String,
}

impl Emission {
    pub fn new(
        parent_id: NodeId,
        parent_label: impl Into<String>,
        child_id: NodeId,
        child_label: impl Into<String>,
    ) -> Self {
        Self {
            parent_id,
            parent_label: parent_label.into(),
            child_id,
            child_label: child_label.into(),
        }
    }

    pub fn parent_id(&self) -> &NodeId {
        &self.parent_id
    }

    pub fn parent_label(&self) -> &str {
        &self.parent_label
    }

    pub fn child_id(&self) -> &NodeId {
        &self.child_id
    }

    pub fn child_label(&self) -> &str {
        &self.child_label
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    id: NodeId,
    label: String,
}

impl GraphNode {
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    parent: NodeId,
    child: NodeId,
}

impl GraphEdge {
    pub fn parent(&self) -> &NodeId {
        &self.parent
    }

    pub fn child(&self) -> &NodeId {
        &self.child
    }
}

/// In-memory sink keeping nodes in first-insertion order and edges in emission order.
#[derive(Debug, Clone, Default)]
pub struct TreeGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<NodeId, usize>,
    edges: Vec<GraphEdge>,
}

impl TreeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassembles a graph from emissions listed in any order.
    pub fn from_emissions<'a>(emissions: impl IntoIterator<Item = &'a Emission>) -> Self {
        let mut graph = Self::new();
        for emission in emissions {
            graph.add_node(emission.parent_id(), emission.parent_label());
            graph.add_node(emission.child_id(), emission.child_label());
            graph.add_edge(emission.parent_id(), emission.child_id());
        }
        graph
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn label(&self, id: &NodeId) -> Option<&str> {
        self.node(id).map(GraphNode::label)
    }

    pub fn children_of<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.edges.iter().filter(move |edge| edge.parent == *id).map(|edge| &edge.child)
    }

    /// Nodes without an incoming edge, in insertion order.
    pub fn roots(&self) -> Vec<&NodeId> {
        let mut has_parent = vec![false; self.nodes.len()];
        for edge in &self.edges {
            if let Some(&idx) = self.index.get(&edge.child) {
                has_parent[idx] = true;
            }
        }
        self.nodes
            .iter()
            .zip(has_parent)
            .filter(|(_, has_parent)| !has_parent)
            .map(|(node, _)| &node.id)
            .collect()
    }

    /// True when the edges connect every node to exactly one root without sharing descendants.
    pub fn is_tree(&self) -> bool {
        if self.nodes.is_empty() {
            return self.edges.is_empty();
        }
        if self.edges.len() + 1 != self.nodes.len() {
            return false;
        }
        let roots = self.roots();
        let [root] = roots.as_slice() else {
            return false;
        };

        let children = self.child_index();
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![self.index[*root]];
        let mut visited = 0usize;
        while let Some(idx) = stack.pop() {
            if std::mem::replace(&mut seen[idx], true) {
                return false;
            }
            visited += 1;
            stack.extend(children[idx].iter().copied());
        }
        visited == self.nodes.len()
    }

    /// Indented label outline starting from every root, children in emission order.
    ///
    /// Identities are left out, so two builds of the same input yield identical outlines.
    pub fn to_outline(&self) -> String {
        let children = self.child_index();
        let mut out = String::new();
        let mut stack = self
            .roots()
            .into_iter()
            .rev()
            .map(|id| (self.index[id], 0usize))
            .collect::<Vec<_>>();

        while let Some((idx, depth)) = stack.pop() {
            for _ in 0..depth {
                out.push_str("  ");
            }
            out.push_str(&self.nodes[idx].label);
            out.push('\n');
            stack.extend(children[idx].iter().rev().map(|&child| (child, depth + 1)));
        }
        out
    }

    fn child_index(&self) -> Vec<Vec<usize>> {
        let mut children = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            if let (Some(&parent), Some(&child)) =
                (self.index.get(&edge.parent), self.index.get(&edge.child))
            {
                children[parent].push(child);
            }
        }
        children
    }
}

impl GraphSink for TreeGraph {
    fn add_node(&mut self, id: &NodeId, label: &str) {
        match self.index.get(id) {
            Some(&idx) => {
                if self.nodes[idx].label != label {
                    self.nodes[idx].label = label.to_owned();
                }
            }
            None => {
                self.index.insert(id.clone(), self.nodes.len());
                self.nodes.push(GraphNode {
                    id: id.clone(),
                    label: label.to_owned(),
                });
            }
        }
    }

    fn add_edge(&mut self, parent: &NodeId, child: &NodeId) {
        self.edges.push(GraphEdge {
            parent: parent.clone(),
            child: child.clone(),
        });
    }
}
