// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tree builder: walks a [`TaggedNode`] tree and emits labeled parent→child edges.
//!
//! The walk is depth-first and pre-order, driven by an explicit work stack so deeply nested
//! input cannot exhaust the call stack. Each scheduled visit carries its own copy of the parent
//! context; siblings never observe each other's emissions.
//!
//! Per node:
//! - `Skip` tags draw nothing; their children attach to the current parent.
//! - `Expand` tags (mappings desugared first) draw one fresh node under the current parent and
//!   become the parent of their own children. The very first expanded node names the root
//!   instead of drawing an edge.
//! - `Opaque` tags drop the node and everything below it.
//!
//! Scalars and markers are never drawn; scalar content reaches the graph only through labels.

use std::fmt;

use rayon::prelude::*;
use smol_str::SmolStr;

use crate::config::Rules;
use crate::model::{
    Emission, FieldValue, GraphSink, IdentityGenerator, NodeId, TaggedNode, TreeGraph, TypeTag,
};
use crate::tree::classify::{Classification, ShapeKind};
use crate::tree::desugar::DesugarError;

/// Draws per node before giving up on a generator that only yields the root identity.
const ID_ATTEMPTS: usize = 8;

pub struct GraphBuilder<'r> {
    rules: &'r Rules,
    ids: &'r dyn IdentityGenerator,
    root_id: NodeId,
}

impl<'r> GraphBuilder<'r> {
    pub fn new(rules: &'r Rules, ids: &'r dyn IdentityGenerator) -> Self {
        Self {
            rules,
            ids,
            root_id: NodeId::root(),
        }
    }

    pub fn with_root_id(mut self, root_id: NodeId) -> Self {
        self.root_id = root_id;
        self
    }

    pub fn root_id(&self) -> &NodeId {
        &self.root_id
    }

    pub fn build(&self, root: &TaggedNode, sink: &mut dyn GraphSink) -> BuildOutput {
        let span = tracing::debug_span!("build_tree", root = %root.type_tag());
        let _guard = span.enter();

        let mut run = Run {
            sink,
            root_label: None,
            edges: Vec::new(),
            issues: Vec::new(),
        };
        let mut stack = vec![Visit {
            node: Subtree::Borrowed(root),
            field: SmolStr::default(),
            depth: 0,
            parent: Context {
                label: None,
                id: self.root_id.clone(),
            },
        }];

        while let Some(visit) = stack.pop() {
            self.visit(visit, &mut stack, &mut run);
        }

        tracing::debug!(
            edges = run.edges.len(),
            issues = run.issues.len(),
            "tree build finished"
        );
        BuildOutput {
            root_id: self.root_id.clone(),
            root_label: run.root_label.map(String::from),
            edges: run.edges,
            issues: run.issues,
        }
    }

    /// Builds independent trees in parallel, each into its own [`TreeGraph`].
    ///
    /// Every tree is rooted at a fresh identity from the shared generator, so the results can be
    /// merged into one graph without collisions.
    pub fn build_batch(&self, roots: &[TaggedNode]) -> Vec<(TreeGraph, BuildOutput)> {
        roots
            .par_iter()
            .map(|root| {
                let builder = GraphBuilder {
                    rules: self.rules,
                    ids: self.ids,
                    root_id: self.ids.next_id(),
                };
                let mut graph = TreeGraph::new();
                let output = builder.build(root, &mut graph);
                (graph, output)
            })
            .collect()
    }

    fn visit<'a>(&self, visit: Visit<'a>, stack: &mut Vec<Visit<'a>>, run: &mut Run<'_>) {
        let Visit {
            node,
            field,
            depth,
            parent,
        } = visit;

        // `None` marks a skipped wrapper.
        let shape = match self.rules.classifier().classify(node.get()) {
            Classification::Opaque => {
                tracing::debug!(tag = %node.get().type_tag(), field = %field, "dropping unrecognized subtree");
                return;
            }
            Classification::Skip => None,
            Classification::Expand(shape) => Some(shape),
        };
        if depth > self.rules.max_depth() {
            tracing::warn!(
                tag = %node.get().type_tag(),
                field = %field,
                depth,
                "dropping subtree nested past the depth limit"
            );
            run.issues.push(BuildIssue::DepthLimit {
                type_tag: node.get().type_tag().clone(),
                field,
                depth,
            });
            return;
        }

        match shape {
            None => schedule_children(node, &parent, depth + 1, stack),
            Some(shape) => {
                let node = if shape == ShapeKind::Mapping {
                    match node.desugar(self.rules) {
                        Ok(node) => node,
                        Err(source) => {
                            tracing::warn!(field = %field, error = %source, "dropping malformed mapping");
                            run.issues.push(BuildIssue::MalformedInput { field, source });
                            return;
                        }
                    }
                } else {
                    node
                };
                match self.enter(node.get(), parent, run) {
                    Some(parent) => schedule_children(node, &parent, depth + 1, stack),
                    None => stack.clear(),
                }
            }
        }
    }

    /// Draws `node` under `parent` and returns the context its children hang from.
    ///
    /// `None` means no identity distinct from the root could be drawn; the build stops.
    fn enter(&self, node: &TaggedNode, parent: Context, run: &mut Run<'_>) -> Option<Context> {
        let raw = self.rules.labels().extract(node);
        let label = self.rules.sanitizer().sanitize(&raw);
        if label.is_empty() {
            tracing::debug!(tag = %node.type_tag(), "skipping node with blank label");
            return Some(parent);
        }
        let label = SmolStr::from(label);

        let parent_label = match parent.label {
            Some(parent_label) => parent_label,
            None => match run.root_label.clone() {
                Some(root_label) => root_label,
                None => {
                    run.sink.add_node(&parent.id, &label);
                    run.root_label = Some(label.clone());
                    return Some(Context {
                        label: Some(label),
                        id: parent.id,
                    });
                }
            },
        };

        let Some(child_id) = self.fresh_id() else {
            tracing::warn!(
                root = %self.root_id,
                attempts = ID_ATTEMPTS,
                "identity generator keeps returning the root identity; stopping build"
            );
            run.issues.push(BuildIssue::IdentityExhausted {
                root_id: self.root_id.clone(),
                attempts: ID_ATTEMPTS,
            });
            return None;
        };
        run.sink.add_node(&parent.id, &parent_label);
        run.sink.add_node(&child_id, &label);
        run.sink.add_edge(&parent.id, &child_id);
        run.edges.push(Emission::new(
            parent.id,
            parent_label.as_str(),
            child_id.clone(),
            label.as_str(),
        ));

        Some(Context {
            label: Some(label),
            id: child_id,
        })
    }

    fn fresh_id(&self) -> Option<NodeId> {
        (0..ID_ATTEMPTS).map(|_| self.ids.next_id()).find(|id| *id != self.root_id)
    }
}

/// Pushes the child nodes of `node` so they pop in field order, list elements in list order.
fn schedule_children<'a>(
    node: Subtree<'a>,
    parent: &Context,
    depth: usize,
    stack: &mut Vec<Visit<'a>>,
) {
    let start = stack.len();
    let mut push = |node: Subtree<'a>, field: &SmolStr| {
        stack.push(Visit {
            node,
            field: field.clone(),
            depth,
            parent: parent.clone(),
        });
    };

    match node {
        Subtree::Borrowed(node) => {
            for (field, value) in node.fields() {
                let field = SmolStr::new(field);
                match value {
                    FieldValue::Node(child) => push(Subtree::Borrowed(child), &field),
                    FieldValue::NodeList(children) => {
                        for child in children {
                            push(Subtree::Borrowed(child), &field);
                        }
                    }
                    FieldValue::Scalar(_) | FieldValue::Marker(_) => {}
                }
            }
        }
        Subtree::Owned(node) => {
            let (_, fields) = node.into_parts();
            for (field, value) in fields {
                match value {
                    FieldValue::Node(child) => push(Subtree::Owned(child), &field),
                    FieldValue::NodeList(children) => {
                        for child in children {
                            push(Subtree::Owned(child), &field);
                        }
                    }
                    FieldValue::Scalar(_) | FieldValue::Marker(_) => {}
                }
            }
        }
    }

    stack[start..].reverse();
}

/// Parent context handed to every scheduled child. `label` is `None` until the root is named.
#[derive(Debug, Clone)]
struct Context {
    label: Option<SmolStr>,
    id: NodeId,
}

struct Visit<'a> {
    node: Subtree<'a>,
    field: SmolStr,
    depth: usize,
    parent: Context,
}

/// Input nodes are borrowed; a desugared mapping and everything below it is owned.
enum Subtree<'a> {
    Borrowed(&'a TaggedNode),
    Owned(TaggedNode),
}

impl<'a> Subtree<'a> {
    fn get(&self) -> &TaggedNode {
        match self {
            Self::Borrowed(node) => *node,
            Self::Owned(node) => node,
        }
    }

    fn desugar(self, rules: &Rules) -> Result<Self, DesugarError> {
        let node = match self {
            Self::Borrowed(node) => node.clone(),
            Self::Owned(node) => node,
        };
        rules.desugarer().desugar(node).map(Self::Owned)
    }
}

struct Run<'s> {
    sink: &'s mut dyn GraphSink,
    root_label: Option<SmolStr>,
    edges: Vec<Emission>,
    issues: Vec<BuildIssue>,
}

/// Result of one build: the emitted edges in visit order plus anything that was cut off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    root_id: NodeId,
    root_label: Option<String>,
    edges: Vec<Emission>,
    issues: Vec<BuildIssue>,
}

impl BuildOutput {
    pub fn root_id(&self) -> &NodeId {
        &self.root_id
    }

    /// Label of the root node, `None` when nothing in the input was drawable.
    pub fn root_label(&self) -> Option<&str> {
        self.root_label.as_deref()
    }

    pub fn edges(&self) -> &[Emission] {
        &self.edges
    }

    pub fn issues(&self) -> &[BuildIssue] {
        &self.issues
    }

    pub fn is_complete(&self) -> bool {
        self.issues.is_empty()
    }
}

/// A subtree the builder refused to draw. The rest of the tree is still emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildIssue {
    MalformedInput {
        field: SmolStr,
        source: DesugarError,
    },
    DepthLimit {
        type_tag: TypeTag,
        field: SmolStr,
        depth: usize,
    },
    /// The identity generator returned the root identity on every attempt; nothing further
    /// was drawn.
    IdentityExhausted {
        root_id: NodeId,
        attempts: usize,
    },
}

impl fmt::Display for BuildIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput { field, source } => {
                write!(f, "malformed input under field '{field}': {source}")
            }
            Self::DepthLimit {
                type_tag,
                field,
                depth,
            } => write!(
                f,
                "{type_tag} under field '{field}' is nested {depth} levels deep; subtree dropped"
            ),
            Self::IdentityExhausted { root_id, attempts } => write!(
                f,
                "identity generator returned the root id '{root_id}' {attempts} times in a row; build stopped"
            ),
        }
    }
}

impl std::error::Error for BuildIssue {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedInput { source, .. } => Some(source),
            Self::DepthLimit { .. } | Self::IdentityExhausted { .. } => None,
        }
    }
}

/// Builds `root` into a fresh [`TreeGraph`].
pub fn build_graph(
    root: &TaggedNode,
    rules: &Rules,
    ids: &dyn IdentityGenerator,
) -> (TreeGraph, BuildOutput) {
    let mut graph = TreeGraph::new();
    let output = GraphBuilder::new(rules, ids).build(root, &mut graph);
    (graph, output)
}
