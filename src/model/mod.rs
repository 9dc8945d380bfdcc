// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Input side: [`TaggedNode`] trees as produced by a serializer. Output side: node identities,
//! emitted edges and the [`GraphSink`] they are drawn into.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod graph;
pub mod identity;
pub mod ids;
pub mod tagged;

pub use graph::{Emission, GraphEdge, GraphNode, GraphSink, TreeGraph};
pub use identity::{IdentityGenerator, SequentialIds, UuidIds};
pub use ids::{Id, IdError, NodeId, TypeTag, ROOT_NODE_ID};
pub use tagged::{FieldValue, Scalar, TaggedNode};
